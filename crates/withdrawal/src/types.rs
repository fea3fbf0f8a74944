use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel used to pay funds out of the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalMethod {
    #[default]
    #[serde(rename = "bank")]
    Bank,
    #[serde(rename = "mpesa", alias = "mobileMoney")]
    MobileMoney,
}

impl WithdrawalMethod {
    /// Name used on the wire and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::MobileMoney => "mpesa",
        }
    }

    /// Form fields that must be filled in for this method.
    pub const fn required_fields(&self) -> &'static [Field] {
        match self {
            Self::Bank => &[Field::AccountName, Field::AccountNumber, Field::BankIdentifier],
            Self::MobileMoney => &[Field::PhoneNumber],
        }
    }
}

impl fmt::Display for WithdrawalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WithdrawalMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank" => Ok(Self::Bank),
            "mpesa" | "mobile" | "mobile-money" | "mobilemoney" => Ok(Self::MobileMoney),
            other => Err(format!("unknown withdrawal method: {other}")),
        }
    }
}

/// Detail fields of the withdrawal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    AccountName,
    AccountNumber,
    BankIdentifier,
    PhoneNumber,
}

/// Third-party processor forwarded to the backend as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentGateway {
    #[default]
    Primary,
    Alternate,
}

impl std::str::FromStr for PaymentGateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "alternate" => Ok(Self::Alternate),
            other => Err(format!("unknown payment gateway: {other}")),
        }
    }
}

/// Flat fee charged per withdrawal method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTable {
    pub bank: Decimal,
    pub mobile_money: Decimal,
}

impl FeeTable {
    pub const fn fee(&self, method: WithdrawalMethod) -> Decimal {
        match method {
            WithdrawalMethod::Bank => self.bank,
            WithdrawalMethod::MobileMoney => self.mobile_money,
        }
    }
}

impl Default for FeeTable {
    fn default() -> Self {
        Self {
            bank: Decimal::from(50),
            mobile_money: Decimal::from(25),
        }
    }
}

/// Inclusive bounds on a single withdrawal or deposit, in whole KES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLimits {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountLimits {
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min && amount <= self.max
    }
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self {
            min: Decimal::from(100),
            max: Decimal::from(1_000_000),
        }
    }
}
