//! Deposit requests for the checkout flow.
//!
//! A deposit sends the user to an external checkout page. This crate validates
//! the deposit form and describes the redirect the backend answers with.

pub mod state;

pub use state::{CheckoutRedirect, Deposit, DepositError, DepositRequest};
