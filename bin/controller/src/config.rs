use config::{
    BalanceMode, ConfigError, Endpoints, FrontendConfig, FrontendConfigBuilder, GatewayCodes,
    ProfileType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Top-level controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base url of the payment backend
    pub backend_url: String,

    /// Deployment profile the form is built from
    #[serde(default = "default_profile")]
    pub profile: ProfileType,

    /// Starting balance of the demo wallet (demo profile only)
    pub demo_balance: Option<Decimal>,

    /// Transaction records kept in memory
    pub history_capacity: Option<usize>,

    /// Transport timeout for backend requests
    pub request_timeout_secs: Option<u64>,

    /// Seconds a success notification stays visible
    pub success_notice_secs: Option<u64>,

    /// Gateway codes forwarded as `paymentMethod` (gateway profile only)
    pub gateways: Option<GatewayCodes>,

    /// Backend paths, if they differ from `/api/...`
    pub endpoints: Option<Endpoints>,
}

const fn default_profile() -> ProfileType {
    ProfileType::DemoWallet
}

impl Config {
    pub fn new(backend_url: impl Into<String>, profile: ProfileType) -> Self {
        Self {
            backend_url: backend_url.into(),
            profile,
            demo_balance: None,
            history_capacity: None,
            request_timeout_secs: None,
            success_notice_secs: None,
            gateways: None,
            endpoints: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Profile defaults with this file's overrides applied.
    pub fn frontend_config(&self) -> Result<FrontendConfig, ConfigError> {
        let mut builder = FrontendConfigBuilder::new(self.profile);

        if let Some(initial) = self.demo_balance {
            if self.profile == ProfileType::DemoWallet {
                builder = builder.balance(BalanceMode::Demo { initial });
            }
        }
        if let Some(capacity) = self.history_capacity {
            builder = builder.history_capacity(capacity);
        }
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.request_timeout_secs(secs);
        }
        if let Some(secs) = self.success_notice_secs {
            builder = builder.success_notice_secs(secs);
        }
        if let Some(gateways) = &self.gateways {
            if self.profile == ProfileType::Gateway {
                builder = builder.gateways(Some(gateways.clone()));
            }
        }
        if let Some(endpoints) = &self.endpoints {
            builder = builder.endpoints(endpoints.clone());
        }

        builder.build()
    }
}
