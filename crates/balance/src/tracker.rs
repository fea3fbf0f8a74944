use crate::{monitor::BalanceMonitor, Balance, DemoBalance, Monitor};
use client::Backend;
use rust_decimal::Decimal;
use tracing::info;

/// The balance the form displays and, in demo mode, validates against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceTracker {
    /// Local demo balance; the only mode that blocks withdrawals locally
    Demo(DemoBalance),
    /// Backend balance, cached from the last successful refresh
    Remote { last_known: Option<Decimal> },
    /// No balance shown
    Untracked,
}

impl BalanceTracker {
    pub const fn demo(amount: Decimal) -> Self {
        Self::Demo(DemoBalance::new(amount))
    }

    pub const fn remote() -> Self {
        Self::Remote { last_known: None }
    }

    /// Balance withdrawals are checked against before submission.
    ///
    /// Only a demo balance is enforced locally; otherwise the backend is the
    /// source of truth.
    pub const fn local_limit(&self) -> Option<Decimal> {
        match self {
            Self::Demo(demo) => Some(demo.amount()),
            Self::Remote { .. } | Self::Untracked => None,
        }
    }

    /// Balance to display, if known.
    pub const fn current(&self) -> Option<Decimal> {
        match self {
            Self::Demo(demo) => Some(demo.amount()),
            Self::Remote { last_known } => *last_known,
            Self::Untracked => None,
        }
    }

    /// Whether the backend should be asked again after a withdrawal.
    pub const fn refresh_after_withdrawal(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Apply a successful withdrawal to the demo balance.
    pub fn record_withdrawal(&mut self, amount: Decimal) {
        if let Self::Demo(demo) = self {
            demo.debit(amount);
        }
    }

    /// Re-read the balance.
    ///
    /// On failure the last known value is kept.
    pub async fn refresh<B: Backend>(&mut self, backend: &B) -> eyre::Result<Option<Balance>> {
        let balance = match self {
            Self::Demo(demo) => demo.query_balance().await?,
            Self::Remote { last_known } => {
                let balance = BalanceMonitor::new(backend).query_balance().await?;
                *last_known = Some(balance.amount);
                balance
            }
            Self::Untracked => return Ok(None),
        };

        info!(amount = %balance.amount, source = ?balance.source, "Balance refreshed");
        Ok(Some(balance))
    }
}
