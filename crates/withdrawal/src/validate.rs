//! Pre-flight validation of the withdrawal form.
//!
//! Everything here is synchronous and local. A request that fails validation
//! never reaches the network.

use crate::{
    fee::format_kes,
    types::{AmountLimits, WithdrawalMethod},
};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;
use thiserror::Error;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone number regex"));

fn kes(amount: &Decimal) -> String {
    format_kes(*amount)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount missing, not positive, or outside the configured limits
    #[error("Amount must be between {} and {}", kes(.min), kes(.max))]
    InvalidAmount { min: Decimal, max: Decimal },

    /// Bank withdrawal without account name, account number or bank
    #[error("Please fill all bank details")]
    MissingBankDetails,

    /// Mobile money withdrawal without a 10-digit phone number
    #[error("Enter a valid 10-digit mobile money number")]
    InvalidPhone,

    /// Amount exceeds the locally tracked balance
    #[error("Available: {}", kes(.available))]
    InsufficientBalance { available: Decimal },
}

impl ValidationError {
    /// Short headline for the notification banner.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "Invalid Amount",
            Self::MissingBankDetails => "Missing Details",
            Self::InvalidPhone => "Invalid Phone",
            Self::InsufficientBalance { .. } => "Insufficient Balance",
        }
    }

    /// Stable label for logs and metrics.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::MissingBankDetails => "missing_bank_details",
            Self::InvalidPhone => "invalid_phone",
            Self::InsufficientBalance { .. } => "insufficient_balance",
        }
    }
}

/// Raw withdrawal form contents.
///
/// Only the detail fields matching `method` are inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub amount: Option<Decimal>,
    pub method: WithdrawalMethod,
    pub account_name: String,
    pub account_number: String,
    pub bank_identifier: String,
    pub phone_number: String,
}

/// Where a validated withdrawal is paid out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Bank {
        account_name: String,
        account_number: String,
        bank_identifier: String,
    },
    MobileMoney {
        phone_number: String,
    },
}

impl Destination {
    pub const fn method(&self) -> WithdrawalMethod {
        match self {
            Self::Bank { .. } => WithdrawalMethod::Bank,
            Self::MobileMoney { .. } => WithdrawalMethod::MobileMoney,
        }
    }
}

/// A withdrawal that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub amount: Decimal,
    pub destination: Destination,
}

impl Withdrawal {
    pub const fn method(&self) -> WithdrawalMethod {
        self.destination.method()
    }
}

/// Validates withdrawal requests against amount limits and an optional
/// locally tracked balance.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    limits: AmountLimits,
    balance: Option<Decimal>,
}

impl Validator {
    pub const fn new(limits: AmountLimits) -> Self {
        Self {
            limits,
            balance: None,
        }
    }

    /// Also reject amounts above this balance.
    pub const fn with_balance(mut self, balance: Option<Decimal>) -> Self {
        self.balance = balance;
        self
    }

    pub fn validate(&self, request: &WithdrawalRequest) -> Result<(), ValidationError> {
        self.check(request).map(|_| ())
    }

    /// Validate and convert into a [`Withdrawal`].
    ///
    /// Checks run in order: amount, method details, balance.
    pub fn check(&self, request: &WithdrawalRequest) -> Result<Withdrawal, ValidationError> {
        let amount = check_amount(request.amount, &self.limits)?;

        let destination = match request.method {
            WithdrawalMethod::Bank => {
                let account_name = request.account_name.trim();
                let account_number = request.account_number.trim();
                let bank_identifier = request.bank_identifier.trim();

                if account_name.is_empty() || account_number.is_empty() || bank_identifier.is_empty()
                {
                    return Err(ValidationError::MissingBankDetails);
                }

                Destination::Bank {
                    account_name: account_name.to_string(),
                    account_number: account_number.to_string(),
                    bank_identifier: bank_identifier.to_string(),
                }
            }
            WithdrawalMethod::MobileMoney => {
                if !PHONE_NUMBER.is_match(&request.phone_number) {
                    return Err(ValidationError::InvalidPhone);
                }

                Destination::MobileMoney {
                    phone_number: request.phone_number.clone(),
                }
            }
        };

        if let Some(available) = self.balance {
            if amount > available {
                return Err(ValidationError::InsufficientBalance { available });
            }
        }

        Ok(Withdrawal {
            amount,
            destination,
        })
    }
}

/// Check that an amount is present, positive and within `limits`.
pub fn check_amount(
    amount: Option<Decimal>,
    limits: &AmountLimits,
) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount {
        min: limits.min,
        max: limits.max,
    };

    let amount = amount.ok_or_else(invalid)?;
    if amount <= Decimal::ZERO || !limits.contains(amount) {
        return Err(invalid());
    }

    Ok(amount)
}
