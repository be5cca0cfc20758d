use prometheus::{Encoder, Gauge, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for the cart session
// ============================================================================
//
// Provides:
// - Commands handled, split into applied and ignored (no-op) by kind
// - Persistence failures by operation (load / save)
// - Current cart shape: lines, undo depth, payable amount
//
// ============================================================================

/// Central metrics registry for a cart session
pub struct Metrics {
    registry: Registry,

    // Command Metrics
    pub commands_applied: IntCounterVec,
    pub commands_ignored: IntCounterVec,

    // Persistence Metrics
    pub persistence_failures: IntCounterVec,

    // Cart State
    pub cart_lines: IntGauge,
    pub history_depth: IntGauge,
    pub payable: Gauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let commands_applied = IntCounterVec::new(
            Opts::new("cart_commands_applied_total", "Commands that changed the cart"),
            &["command"],
        )?;
        registry.register(Box::new(commands_applied.clone()))?;

        let commands_ignored = IntCounterVec::new(
            Opts::new("cart_commands_ignored_total", "Commands that left the cart unchanged"),
            &["command"],
        )?;
        registry.register(Box::new(commands_ignored.clone()))?;

        let persistence_failures = IntCounterVec::new(
            Opts::new("cart_persistence_failures_total", "Snapshot load/save failures"),
            &["operation"],
        )?;
        registry.register(Box::new(persistence_failures.clone()))?;

        let cart_lines = IntGauge::new("cart_lines", "Lines currently in the cart")?;
        registry.register(Box::new(cart_lines.clone()))?;

        let history_depth = IntGauge::new("cart_history_depth", "Undo entries available")?;
        registry.register(Box::new(history_depth.clone()))?;

        let payable = Gauge::new("cart_payable", "Amount payable after all discounts")?;
        registry.register(Box::new(payable.clone()))?;

        Ok(Self {
            registry,
            commands_applied,
            commands_ignored,
            persistence_failures,
            cart_lines,
            history_depth,
            payable,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a handled command
    pub fn record_command(&self, command: &str, applied: bool) {
        if applied {
            self.commands_applied.with_label_values(&[command]).inc();
        } else {
            self.commands_ignored.with_label_values(&[command]).inc();
        }
    }

    /// Helper to record a failed load or save
    pub fn record_persistence_failure(&self, operation: &str) {
        self.persistence_failures.with_label_values(&[operation]).inc();
    }

    /// Helper to publish the cart's shape after a change
    pub fn observe_cart(&self, lines: usize, history_depth: usize, payable: f64) {
        self.cart_lines.set(lines as i64);
        self.history_depth.set(history_depth as i64);
        self.payable.set(payable);
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_command("add_item", true);
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_command() {
        let metrics = Metrics::new().unwrap();
        metrics.record_command("add_item", true);
        metrics.record_command("add_item", true);
        metrics.record_command("undo_last_action", false);

        assert_eq!(metrics.commands_applied.with_label_values(&["add_item"]).get(), 2);
        assert_eq!(metrics.commands_ignored.with_label_values(&["undo_last_action"]).get(), 1);
        assert_eq!(metrics.commands_ignored.with_label_values(&["add_item"]).get(), 0);
    }

    #[test]
    fn test_observe_cart() {
        let metrics = Metrics::new().unwrap();
        metrics.observe_cart(3, 5, 252.0);

        assert_eq!(metrics.cart_lines.get(), 3);
        assert_eq!(metrics.history_depth.get(), 5);
        assert_eq!(metrics.payable.get(), 252.0);
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_persistence_failure("save");

        let text = metrics.render().unwrap();
        assert!(text.contains("cart_persistence_failures_total{operation=\"save\"} 1"));
        assert!(text.contains("cart_lines 0"));
    }
}
