use clap::{Parser, Subcommand};
use std::fmt::Write;
use std::path::PathBuf;

use crate::catalog::{CatalogQuery, PriceSort};
use crate::domain::cart::CartAggregate;
use crate::domain::cart::CartItem;

/// Interactive shopping cart session
#[derive(Parser, Debug)]
#[command(name = "cart-engine", version)]
pub struct Cli {
    /// Config file (default: ~/.config/cart-engine/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the snapshot directory
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Keep the cart in memory only
    #[arg(long)]
    pub ephemeral: bool,
}

/// One line typed into the session
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// List catalog products
    Catalog {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<PriceSort>,
    },
    /// Add a catalog product to the cart
    Add { id: i64 },
    /// Remove the first cart line for a product
    Remove { id: i64 },
    /// Apply a coupon code
    Coupon { code: String },
    /// Undo the last add or remove
    Undo,
    /// Show the cart
    Show,
    /// Print session metrics
    Metrics,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

impl SessionCommand {
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        SessionLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}

impl From<&SessionCommand> for CatalogQuery {
    fn from(command: &SessionCommand) -> Self {
        match command {
            SessionCommand::Catalog { search, category, sort } => CatalogQuery {
                search: search.clone(),
                category: category.clone(),
                sort: *sort,
            },
            _ => CatalogQuery::default(),
        }
    }
}

pub fn render_listing(items: &[&CartItem]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        out.push_str("No products match.\n");
    }
    for item in items {
        let _ = writeln!(out, "{:>4}  {:<24} {:>10.2}  {}", item.id, item.name, item.price, item.category);
    }
    out
}

pub fn render_cart(cart: &CartAggregate) -> String {
    let mut out = String::new();

    if cart.items().is_empty() {
        out.push_str("Your cart is empty.\n");
    }
    for (line, item) in cart.items().iter().enumerate() {
        let _ = writeln!(out, "{:>3}. [{}] {:<24} {:>10.2}", line + 1, item.id, item.name, item.price);
    }

    let totals = cart.totals();
    let _ = writeln!(out, "     Subtotal            {:>10.2}", totals.total);
    if totals.threshold_discount > 0.0 {
        let _ = writeln!(out, "     Threshold discount {:>11}", format!("-{:.2}", totals.threshold_discount));
    }
    if totals.coupon_discount > 0.0 {
        let _ = writeln!(out, "     Coupon discount    {:>11}", format!("-{:.2}", totals.coupon_discount));
    }
    let _ = writeln!(out, "     Payable             {:>10.2}", totals.payable);
    if let Some(code) = cart.coupon_code() {
        let _ = writeln!(out, "     Code applied: {code}");
    }

    out
}
