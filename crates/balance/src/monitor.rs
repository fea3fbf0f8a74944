use crate::{Balance, BalanceSource, Monitor};
use client::Backend;
use eyre::Result;
use rust_decimal::Decimal;
use tracing::debug;

/// Balance monitor reading `GET /api/balance`.
pub struct BalanceMonitor<B> {
    backend: B,
}

impl<B> BalanceMonitor<B>
where
    B: Backend,
{
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B> Monitor for BalanceMonitor<B>
where
    B: Backend,
{
    async fn query_balance(&self) -> Result<Balance> {
        debug!("Querying backend balance");

        let amount = self.backend.balance().await?;

        Ok(Balance {
            amount,
            source: BalanceSource::Backend,
        })
    }
}

/// Demo balance held in memory.
///
/// Used by deployments without a balance endpoint: withdrawals above it are
/// rejected locally and successful ones are debited from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoBalance {
    amount: Decimal,
}

impl DemoBalance {
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Subtract a completed withdrawal. Never goes below zero.
    pub fn debit(&mut self, amount: Decimal) {
        self.amount = (self.amount - amount).max(Decimal::ZERO);
        debug!(debited = %amount, remaining = %self.amount, "Debited demo balance");
    }
}

impl Monitor for DemoBalance {
    async fn query_balance(&self) -> Result<Balance> {
        Ok(Balance {
            amount: self.amount,
            source: BalanceSource::Demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_floors_at_zero() {
        let mut demo = DemoBalance::new(Decimal::from(1_000));
        demo.debit(Decimal::from(400));
        assert_eq!(demo.amount(), Decimal::from(600));

        demo.debit(Decimal::from(900));
        assert_eq!(demo.amount(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_demo_monitor_reports_demo_source() {
        let demo = DemoBalance::new(Decimal::from(100_000));
        let balance = demo.query_balance().await.unwrap();
        assert_eq!(balance.amount, Decimal::from(100_000));
        assert_eq!(balance.source, BalanceSource::Demo);
    }
}
