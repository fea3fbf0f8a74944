//! Configuration types for the payout front-end.
//!
//! This crate provides:
//! - Profiles for the supported deployments (demo wallet, gateway payout, checkout)
//! - A builder for overriding profile defaults
//! - Validation of the resulting configuration

pub mod profile;

pub use client::{Endpoints, WireFormat};
pub use profile::{
    BalanceMode, ConfigError, FrontendConfig, FrontendConfigBuilder, GatewayCodes, ProfileType,
};
