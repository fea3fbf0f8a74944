//! Withdrawal domain logic.
//!
//! This crate provides:
//! - Withdrawal methods, payment gateways, fee table and amount limits
//! - The fee preview calculator
//! - Pre-flight validation of the withdrawal form

pub mod fee;
pub mod types;
pub mod validate;

pub use fee::{compute_fees, format_kes, parse_amount, preview_from_input, FeePreview};
pub use types::{AmountLimits, FeeTable, Field, PaymentGateway, WithdrawalMethod};
pub use validate::{
    check_amount, Destination, ValidationError, Validator, Withdrawal, WithdrawalRequest,
};
