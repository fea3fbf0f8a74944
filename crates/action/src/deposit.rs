use crate::{Action, Receipt, SubmissionError};
use client::{Backend, DepositBody};
use ::deposit::Deposit;
use tracing::{info, warn};
use withdrawal::format_kes;

/// A validated deposit sent to the checkout endpoint.
pub struct DepositAction<B> {
    backend: B,
    deposit: Deposit,
}

impl<B: Backend> DepositAction<B> {
    pub const fn new(backend: B, deposit: Deposit) -> Self {
        Self { backend, deposit }
    }

    pub fn body(&self) -> DepositBody {
        DepositBody {
            amount: self.deposit.amount,
            return_url: self.deposit.return_url.clone(),
        }
    }
}

impl<B> Action for DepositAction<B>
where
    B: Backend,
{
    async fn execute(&self) -> Result<Receipt, SubmissionError> {
        let response = self.backend.deposit(&self.body()).await.inspect_err(|e| {
            warn!(error = %e, "Deposit request failed");
        })?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Deposit could not be started".to_string());
            warn!(%message, "Deposit rejected by backend");
            return Err(SubmissionError::Backend(message));
        }

        // Without a checkout page the user has nowhere to pay.
        let Some(url) = response.url else {
            return Err(SubmissionError::MalformedResponse(
                "checkout url missing from deposit response".to_string(),
            ));
        };

        info!(
            transaction_id = ?response.transaction_id,
            amount = %self.deposit.amount,
            %url,
            "Deposit accepted, redirecting to checkout."
        );

        Ok(Receipt {
            transaction_id: response.transaction_id,
            amount: response.amount.unwrap_or(self.deposit.amount),
            net_amount: None,
            message: response.message,
            timestamp: None,
            redirect_url: Some(url),
        })
    }

    fn description(&self) -> String {
        format!("Depositing {} via checkout", format_kes(self.deposit.amount))
    }
}
