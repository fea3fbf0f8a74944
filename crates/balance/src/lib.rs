//! Balance tracking for the payout form.
//!
//! This crate provides a [`Monitor`] interface for querying the account
//! balance, with a backend-backed implementation and a locally tracked demo
//! balance, plus the [`BalanceTracker`] the form controller keeps.

pub mod monitor;
pub mod tracker;

pub use monitor::{BalanceMonitor, DemoBalance};
pub use tracker::BalanceTracker;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Where a balance figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSource {
    /// Tracked locally; debited on each successful withdrawal
    Demo,
    /// Reported by the backend
    Backend,
}

/// Account balance at a specific point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: Decimal,
    pub source: BalanceSource,
}

/// Trait for querying the current balance.
pub trait Monitor: Send + Sync {
    fn query_balance(&self) -> impl Future<Output = eyre::Result<Balance>> + Send;
}
