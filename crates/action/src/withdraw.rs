use crate::{Action, Receipt, SubmissionError};
use client::{Backend, CombinedWithdrawBody, SplitWithdrawBody, WireFormat, WithdrawBody};
use tracing::{info, warn};
use withdrawal::{format_kes, Destination, Withdrawal};

/// A validated withdrawal together with how to send it.
pub struct WithdrawAction<B> {
    backend: B,
    withdrawal: Withdrawal,
    wire_format: WireFormat,
    /// Gateway code forwarded as `paymentMethod`
    payment_method: Option<String>,
}

impl<B: Backend> WithdrawAction<B> {
    pub const fn new(
        backend: B,
        withdrawal: Withdrawal,
        wire_format: WireFormat,
        payment_method: Option<String>,
    ) -> Self {
        Self {
            backend,
            withdrawal,
            wire_format,
            payment_method,
        }
    }

    /// Request body in the configured wire layout.
    pub fn body(&self) -> WithdrawBody {
        build_body(&self.withdrawal, self.wire_format, self.payment_method.clone())
    }
}

impl<B> Action for WithdrawAction<B>
where
    B: Backend,
{
    async fn execute(&self) -> Result<Receipt, SubmissionError> {
        let body = self.body();
        let response = self.backend.withdraw(&body).await.inspect_err(|e| {
            warn!(error = %e, "Withdrawal request failed");
        })?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "Payment processing failed".to_string());
            warn!(%message, "Withdrawal rejected by backend");
            return Err(SubmissionError::Backend(message));
        }

        info!(
            transaction_id = ?response.transaction_id,
            amount = %self.withdrawal.amount,
            net_amount = ?response.net_amount,
            method = %self.withdrawal.method(),
            "Withdrawal accepted."
        );

        Ok(Receipt {
            transaction_id: response.transaction_id,
            amount: self.withdrawal.amount,
            net_amount: response.net_amount,
            message: response.message,
            timestamp: response.timestamp,
            redirect_url: None,
        })
    }

    fn description(&self) -> String {
        format!(
            "Withdrawing {} via {}",
            format_kes(self.withdrawal.amount),
            self.withdrawal.method().as_str().to_uppercase()
        )
    }
}

fn build_body(
    withdrawal: &Withdrawal,
    wire_format: WireFormat,
    payment_method: Option<String>,
) -> WithdrawBody {
    let (account_name, account_number, bank, phone_number) = match &withdrawal.destination {
        Destination::Bank {
            account_name,
            account_number,
            bank_identifier,
        } => (
            account_name.clone(),
            account_number.clone(),
            bank_identifier.clone(),
            String::new(),
        ),
        Destination::MobileMoney { phone_number } => (
            String::new(),
            String::new(),
            String::new(),
            phone_number.clone(),
        ),
    };

    match wire_format {
        WireFormat::Combined => {
            WithdrawBody::Combined(CombinedWithdrawBody {
                amount: withdrawal.amount,
                method: withdrawal.method(),
                account_name,
                account_details: format!("{account_number} - {bank}"),
                phone_number,
            })
        }
        WireFormat::Split => WithdrawBody::Split(SplitWithdrawBody {
            amount: withdrawal.amount,
            withdrawal_method: withdrawal.method(),
            payment_method,
            account_name,
            account_number,
            bank_code: bank,
            phone_number,
        }),
    }
}
