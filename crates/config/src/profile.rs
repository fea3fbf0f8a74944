//! Deployment profiles for the payout form.
//!
//! Each profile bundles the withdrawal methods on offer, the fee table, the
//! backend endpoints and wire layout, and how the balance is tracked.

use client::{Endpoints, WireFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use withdrawal::{AmountLimits, FeeTable, PaymentGateway, WithdrawalMethod};

/// Starting balance of the demo wallet profile.
pub const DEMO_STARTING_BALANCE: i64 = 100_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one withdrawal method must be available")]
    NoMethods,

    #[error("Default method {0} is not among the available methods")]
    DefaultMethodUnavailable(WithdrawalMethod),

    #[error("Invalid amount limits: min {min} must be positive and not above max {max}")]
    InvalidLimits { min: Decimal, max: Decimal },

    #[error("Fees must not be negative")]
    NegativeFee,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Deployment profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    /// Local demo balance, combined account details on the wire
    DemoWallet,
    /// Gateway selection forwarded to the backend, split account fields
    Gateway,
    /// Withdrawals plus deposits through an external checkout page
    Checkout,
}

/// How the form learns the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum BalanceMode {
    /// Track a local balance starting at `initial`
    Demo { initial: Decimal },
    /// Ask the backend
    Remote,
    /// Do not show a balance
    Untracked,
}

/// Codes sent as `paymentMethod` for each gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCodes {
    pub primary: String,
    pub alternate: String,
}

impl GatewayCodes {
    pub fn code(&self, gateway: PaymentGateway) -> &str {
        match gateway {
            PaymentGateway::Primary => &self.primary,
            PaymentGateway::Alternate => &self.alternate,
        }
    }
}

impl Default for GatewayCodes {
    fn default() -> Self {
        Self {
            primary: "primary".to_string(),
            alternate: "alternate".to_string(),
        }
    }
}

/// Complete configuration of the payout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub profile: ProfileType,
    /// Methods offered in the method selector
    pub available_methods: Vec<WithdrawalMethod>,
    /// Method active when the form loads or resets
    pub default_method: WithdrawalMethod,
    pub fee_table: FeeTable,
    pub limits: AmountLimits,
    pub endpoints: Endpoints,
    pub wire_format: WireFormat,
    /// Gateway selector; `None` hides it
    pub gateways: Option<GatewayCodes>,
    pub balance: BalanceMode,
    pub deposits_enabled: bool,
    /// Records kept in memory (display is limited separately)
    pub history_capacity: usize,
    /// Seconds a success notification stays visible
    pub success_notice_secs: u64,
    pub request_timeout_secs: u64,
}

impl FrontendConfig {
    /// Demo wallet: local balance, bank and mobile money, combined wire layout.
    pub fn demo_wallet() -> Self {
        Self {
            profile: ProfileType::DemoWallet,
            available_methods: vec![WithdrawalMethod::Bank, WithdrawalMethod::MobileMoney],
            default_method: WithdrawalMethod::Bank,
            fee_table: FeeTable::default(),
            limits: AmountLimits::default(),
            endpoints: Endpoints::default(),
            wire_format: WireFormat::Combined,
            gateways: None,
            balance: BalanceMode::Demo {
                initial: Decimal::from(DEMO_STARTING_BALANCE),
            },
            deposits_enabled: false,
            history_capacity: history::DEFAULT_CAPACITY,
            success_notice_secs: 5,
            request_timeout_secs: 30,
        }
    }

    /// Gateway payout: backend balance, gateway selector, split wire layout.
    pub fn gateway() -> Self {
        Self {
            profile: ProfileType::Gateway,
            wire_format: WireFormat::Split,
            gateways: Some(GatewayCodes::default()),
            balance: BalanceMode::Remote,
            ..Self::demo_wallet()
        }
    }

    /// Checkout: backend balance, split wire layout, deposits enabled.
    pub fn checkout() -> Self {
        Self {
            profile: ProfileType::Checkout,
            wire_format: WireFormat::Split,
            balance: BalanceMode::Remote,
            deposits_enabled: true,
            ..Self::demo_wallet()
        }
    }

    /// Create configuration from profile type.
    pub fn from_profile(profile: ProfileType) -> Self {
        match profile {
            ProfileType::DemoWallet => Self::demo_wallet(),
            ProfileType::Gateway => Self::gateway(),
            ProfileType::Checkout => Self::checkout(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.available_methods.is_empty() {
            return Err(ConfigError::NoMethods);
        }

        if !self.available_methods.contains(&self.default_method) {
            return Err(ConfigError::DefaultMethodUnavailable(self.default_method));
        }

        let AmountLimits { min, max } = self.limits;
        if min <= Decimal::ZERO || min > max {
            return Err(ConfigError::InvalidLimits { min, max });
        }

        if self.fee_table.bank < Decimal::ZERO || self.fee_table.mobile_money < Decimal::ZERO {
            return Err(ConfigError::NegativeFee);
        }

        if self.history_capacity == 0 {
            return Err(ConfigError::Zero("history_capacity"));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }

        Ok(())
    }
}

/// Builder for custom configurations.
#[derive(Debug, Clone)]
pub struct FrontendConfigBuilder {
    config: FrontendConfig,
}

impl FrontendConfigBuilder {
    /// Start with a profile's defaults.
    pub fn new(profile: ProfileType) -> Self {
        Self {
            config: FrontendConfig::from_profile(profile),
        }
    }

    /// Restrict the methods offered. The first one becomes the default.
    pub fn methods(mut self, methods: Vec<WithdrawalMethod>) -> Self {
        if let Some(first) = methods.first() {
            self.config.default_method = *first;
        }
        self.config.available_methods = methods;
        self
    }

    pub fn fee_table(mut self, fee_table: FeeTable) -> Self {
        self.config.fee_table = fee_table;
        self
    }

    pub fn limits(mut self, limits: AmountLimits) -> Self {
        self.config.limits = limits;
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    pub fn wire_format(mut self, wire_format: WireFormat) -> Self {
        self.config.wire_format = wire_format;
        self
    }

    pub fn gateways(mut self, gateways: Option<GatewayCodes>) -> Self {
        self.config.gateways = gateways;
        self
    }

    pub fn balance(mut self, balance: BalanceMode) -> Self {
        self.config.balance = balance;
        self
    }

    pub fn deposits_enabled(mut self, enabled: bool) -> Self {
        self.config.deposits_enabled = enabled;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn success_notice_secs(mut self, secs: u64) -> Self {
        self.config.success_notice_secs = secs;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<FrontendConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
