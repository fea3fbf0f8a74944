pub mod deposit;
pub mod withdraw;

use client::ClientError;
use rust_decimal::Decimal;
use std::future::Future;
use thiserror::Error;

/// Trait for submittable backend actions.
pub trait Action: Send + Sync {
    /// Submit the action to the backend.
    ///
    /// Returns the receipt on `success: true`. Every other outcome is a
    /// [`SubmissionError`]; nothing is retried.
    fn execute(&self) -> impl Future<Output = Result<Receipt, SubmissionError>> + Send;

    /// Get a human-readable description of this action.
    fn description(&self) -> String;
}

/// What the backend reported for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_id: Option<String>,
    /// Submitted amount
    pub amount: Decimal,
    /// Net payout computed by the backend (withdrawals only)
    pub net_amount: Option<Decimal>,
    pub message: Option<String>,
    /// Backend timestamp, unparsed
    pub timestamp: Option<String>,
    /// External checkout page (deposits only)
    pub redirect_url: Option<String>,
}

/// Failure of a submission after it passed local validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The backend could not be reached or answered outside the contract
    #[error("Cannot reach server: {0}")]
    Network(String),

    /// Well-formed response with `success: false`
    #[error("{0}")]
    Backend(String),

    /// Response body not parseable as the expected JSON
    #[error("Unexpected response from server: {0}")]
    MalformedResponse(String),
}

impl SubmissionError {
    /// Short headline for the notification banner.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Network(_) => "Connection Error",
            Self::Backend(_) => "Request Failed",
            Self::MalformedResponse(_) => "Unexpected Response",
        }
    }

    /// Stable label for logs and metrics.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Backend(_) => "backend",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<ClientError> for SubmissionError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Malformed(detail) => Self::MalformedResponse(detail),
            ClientError::Rejected(message) => Self::Backend(message),
            other => Self::Network(other.to_string()),
        }
    }
}
