//! JSON shapes exchanged with the payment backend.
//!
//! Field names follow the backend's camelCase contract exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use withdrawal::WithdrawalMethod;

/// Layout of the `POST /api/withdraw` body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// `method` + `accountDetails: "<number> - <bank>"`
    #[default]
    Combined,
    /// `withdrawalMethod` + `paymentMethod` + `accountNumber` + `bankCode`
    Split,
}

/// `POST /api/withdraw` body.
///
/// The backend accepts two layouts; which one is sent is a deployment choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WithdrawBody {
    Combined(CombinedWithdrawBody),
    Split(SplitWithdrawBody),
}

/// Account number and bank folded into a single `accountDetails` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedWithdrawBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: WithdrawalMethod,
    pub account_name: String,
    pub account_details: String,
    pub phone_number: String,
}

/// Account number and bank code as separate fields, plus the selected gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitWithdrawBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub withdrawal_method: WithdrawalMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
    pub phone_number: String,
}

/// `POST /api/withdraw` response, successful or not.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub transaction_id: Option<String>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub net_amount: Option<Decimal>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
}

/// `POST /api/deposit` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub return_url: String,
}

/// `POST /api/deposit` response. `url` is the external checkout page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub transaction_id: Option<String>,
    pub amount: Option<Decimal>,
    pub url: Option<String>,
    pub message: Option<String>,
}

/// A bank the user can withdraw to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub code: String,
    pub name: String,
}

/// `GET /api/banks` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BanksResponse {
    pub success: bool,
    #[serde(default)]
    pub banks: Vec<Bank>,
    pub message: Option<String>,
}

/// `GET /api/balance` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub balance: Option<Decimal>,
    pub message: Option<String>,
}

/// Accept transaction ids sent either as strings or as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    }))
}
