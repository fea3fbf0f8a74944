use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use withdrawal::WithdrawalMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

/// Outcome of one withdrawal or deposit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Backend transaction id, or a local UUID when the backend gave none
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Withdrawal method; `None` for deposits
    pub method: Option<WithdrawalMethod>,
    pub status: TransactionStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Record a withdrawal attempt.
    ///
    /// `timestamp` is the backend's RFC 3339 timestamp if it sent one; the
    /// local clock is used otherwise.
    pub fn withdrawal(
        id: Option<String>,
        amount: Decimal,
        method: WithdrawalMethod,
        status: TransactionStatus,
        message: impl Into<String>,
        timestamp: Option<&str>,
    ) -> Self {
        Self {
            id: id_or_local(id),
            kind: TransactionKind::Withdrawal,
            amount,
            method: Some(method),
            status,
            message: message.into(),
            timestamp: timestamp_or_now(timestamp),
        }
    }

    /// Record a deposit attempt.
    pub fn deposit(
        id: Option<String>,
        amount: Decimal,
        status: TransactionStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id_or_local(id),
            kind: TransactionKind::Deposit,
            amount,
            method: None,
            status,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}

fn id_or_local(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    }
}

fn timestamp_or_now(timestamp: Option<&str>) -> DateTime<Utc> {
    timestamp
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map_or_else(Utc::now, |ts| ts.with_timezone(&Utc))
}
