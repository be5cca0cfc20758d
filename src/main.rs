use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cart_engine::catalog::{Catalog, CatalogQuery};
use cart_engine::cli::{self, Cli, SessionCommand};
use cart_engine::config::CartConfig;
use cart_engine::domain::cart::{CartCommandHandler, CartError};
use cart_engine::metrics::Metrics;
use cart_engine::persistence::{BackgroundStore, CartStore, InMemoryStore, JsonFileStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = CartConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.storage_dir.clone() {
        config.storage_dir = dir;
    }

    // Structured logging on stderr; RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
        )
        .init();

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_file(path)?,
        None => Catalog::grocery(),
    };
    let metrics = Arc::new(Metrics::new()?);

    if cli.ephemeral {
        tracing::info!("Starting ephemeral cart session");
        let handler = CartCommandHandler::new(InMemoryStore::new()).with_metrics(metrics.clone());
        run_session(handler, &catalog, &metrics).await?;
    } else {
        let file_store = JsonFileStore::new(&config.storage_dir, config.storage_key.clone());
        tracing::info!(path = ?file_store.path(), "Starting cart session");

        let store = BackgroundStore::spawn(file_store, Some(metrics.clone()));
        let handler = CartCommandHandler::new(store).with_metrics(metrics.clone());
        let handler = run_session(handler, &catalog, &metrics).await?;

        // Flush the last snapshot before exiting
        handler.into_store().shutdown().await;
    }

    tracing::info!("Cart session ended");
    Ok(())
}

/// Drive one session from stdin until `quit` or end of input
async fn run_session<S: CartStore>(
    mut handler: CartCommandHandler<S>,
    catalog: &Catalog,
    metrics: &Metrics,
) -> anyhow::Result<CartCommandHandler<S>> {
    if handler.restore()? {
        print!("{}", cli::render_cart(handler.cart()));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match SessionCommand::parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match dispatch(&mut handler, catalog, metrics, &command)? {
            Flow::Continue => {}
            Flow::Stop => break,
        }
    }

    Ok(handler)
}

enum Flow {
    Continue,
    Stop,
}

fn dispatch<S: CartStore>(
    handler: &mut CartCommandHandler<S>,
    catalog: &Catalog,
    metrics: &Metrics,
    command: &SessionCommand,
) -> Result<Flow, CartError> {
    match command {
        SessionCommand::Catalog { .. } => {
            let listing = catalog.query(&CatalogQuery::from(command));
            println!("Categories: {}", catalog.categories().join(", "));
            print!("{}", cli::render_listing(&listing));
            return Ok(Flow::Continue);
        }
        SessionCommand::Add { id } => {
            let Some(item) = catalog.get(*id) else {
                println!("No product with id {id} in the catalog.");
                return Ok(Flow::Continue);
            };
            handler.add_item(item.clone())?;
            println!("Added {} to cart", item.name);
        }
        SessionCommand::Remove { id } => {
            if handler.remove_item(*id)?.is_empty() {
                println!("No cart line for product {id}.");
            }
        }
        SessionCommand::Coupon { code } => {
            handler.apply_coupon(code.clone())?;
        }
        SessionCommand::Undo => {
            if handler.undo_last_action()?.is_empty() {
                println!("Nothing to undo.");
            }
        }
        SessionCommand::Show => {}
        SessionCommand::Metrics => {
            match metrics.render() {
                Ok(text) => print!("{text}"),
                Err(e) => tracing::warn!(error = %e, "Could not render metrics"),
            }
            return Ok(Flow::Continue);
        }
        SessionCommand::Quit => return Ok(Flow::Stop),
    }

    print!("{}", cli::render_cart(handler.cart()));
    Ok(Flow::Continue)
}
