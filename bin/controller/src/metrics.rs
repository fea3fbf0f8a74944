//! Prometheus metrics for the payout controller.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::time::Duration;

/// Aggregated metrics for the controller.
///
/// Metrics are registered with the global metrics registry on creation.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        // Submission metrics
        describe_counter!(
            "payout_submissions_total",
            "Total number of submissions sent to the backend by kind"
        );
        describe_counter!(
            "payout_submissions_success_total",
            "Total number of submissions accepted by the backend by kind"
        );
        describe_counter!(
            "payout_submissions_failure_total",
            "Total number of failed submissions by kind and reason"
        );
        describe_histogram!(
            "payout_submission_duration_seconds",
            "Duration of each backend submission in seconds"
        );

        // Validation metrics
        describe_counter!(
            "payout_validation_rejections_total",
            "Total number of submissions blocked by local validation by reason"
        );

        // Amount metrics
        describe_histogram!(
            "payout_withdrawal_amount_kes",
            "Amount of each accepted withdrawal in KES"
        );
        describe_histogram!(
            "payout_deposit_amount_kes",
            "Amount of each accepted deposit in KES"
        );

        // Balance and history gauges
        describe_gauge!("payout_balance_kes", "Last known account balance in KES");
        describe_gauge!(
            "payout_history_records",
            "Number of transaction records held in memory"
        );
    }

    /// Record a completed backend submission.
    pub fn record_submission(&self, kind: &'static str, success: bool, duration: Duration) {
        counter!("payout_submissions_total", "kind" => kind).increment(1);
        histogram!("payout_submission_duration_seconds", "kind" => kind)
            .record(duration.as_secs_f64());

        if success {
            counter!("payout_submissions_success_total", "kind" => kind).increment(1);
        }
    }

    pub fn record_failure(&self, kind: &'static str, reason: &'static str) {
        counter!("payout_submissions_failure_total", "kind" => kind, "reason" => reason)
            .increment(1);
    }

    pub fn record_validation_rejection(&self, kind: &'static str, reason: &'static str) {
        counter!("payout_validation_rejections_total", "kind" => kind, "reason" => reason)
            .increment(1);
    }

    pub fn record_withdrawal(&self, amount: Decimal) {
        histogram!("payout_withdrawal_amount_kes").record(amount.to_f64().unwrap_or_default());
    }

    pub fn record_deposit(&self, amount: Decimal) {
        histogram!("payout_deposit_amount_kes").record(amount.to_f64().unwrap_or_default());
    }

    pub fn set_balance(&self, amount: Decimal) {
        gauge!("payout_balance_kes").set(amount.to_f64().unwrap_or_default());
    }

    pub fn set_history_size(&self, records: usize) {
        gauge!("payout_history_records").set(records as f64);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
