//! Deposit form validation and the checkout redirect returned on success.

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;
use withdrawal::{check_amount, AmountLimits, ValidationError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepositError {
    /// Amount missing, not positive, or outside the configured limits
    #[error(transparent)]
    Amount(#[from] ValidationError),

    /// Return URL missing or not an absolute http(s) URL
    #[error("Return URL must be an absolute http(s) URL")]
    InvalidReturnUrl,
}

impl DepositError {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Amount(err) => err.title(),
            Self::InvalidReturnUrl => "Invalid Return URL",
        }
    }

    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Amount(err) => err.reason(),
            Self::InvalidReturnUrl => "invalid_return_url",
        }
    }
}

/// Raw deposit form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositRequest {
    pub amount: Option<Decimal>,
    pub return_url: String,
}

/// A deposit that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub amount: Decimal,
    pub return_url: String,
}

/// External checkout page the user is sent to after a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub transaction_id: Option<String>,
    pub url: String,
}

impl DepositRequest {
    pub fn validate(&self, limits: &AmountLimits) -> Result<(), DepositError> {
        self.check(limits).map(|_| ())
    }

    /// Validate and convert into a [`Deposit`].
    pub fn check(&self, limits: &AmountLimits) -> Result<Deposit, DepositError> {
        let amount = check_amount(self.amount, limits)?;

        let return_url = self.return_url.trim();
        if !is_absolute_http_url(return_url) {
            return Err(DepositError::InvalidReturnUrl);
        }

        Ok(Deposit {
            amount,
            return_url: return_url.to_string(),
        })
    }
}

fn is_absolute_http_url(return_url: &str) -> bool {
    if return_url.chars().any(char::is_whitespace) {
        return false;
    }

    Url::parse(return_url).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: i64, return_url: &str) -> DepositRequest {
        DepositRequest {
            amount: Some(Decimal::from(amount)),
            return_url: return_url.to_string(),
        }
    }

    #[test]
    fn test_valid_deposit() {
        let deposit = request(2_500, " https://shop.example/return ")
            .check(&AmountLimits::default())
            .unwrap();

        assert_eq!(deposit.amount, Decimal::from(2_500));
        assert_eq!(deposit.return_url, "https://shop.example/return");
    }

    #[test]
    fn test_amount_limits_apply() {
        let limits = AmountLimits::default();
        for amount in [0, 99, 1_000_001] {
            let err = request(amount, "https://shop.example").validate(&limits).unwrap_err();
            assert_eq!(err.reason(), "invalid_amount");
            assert_eq!(err.title(), "Invalid Amount");
        }
    }

    #[test]
    fn test_return_url_must_be_absolute() {
        let limits = AmountLimits::default();
        for url in ["", "/return", "ftp://shop.example", "https://", "https://shop example"] {
            assert_eq!(
                request(1_000, url).validate(&limits),
                Err(DepositError::InvalidReturnUrl),
                "url={url:?}"
            );
        }
        assert!(request(1_000, "http://localhost:3000/done?x=1")
            .validate(&limits)
            .is_ok());
    }

    #[test]
    fn test_return_url_must_parse_with_host() {
        let limits = AmountLimits::default();
        for url in [
            "https://:443/return",
            "https://shop.example:notaport/",
            "http://[::1/x",
        ] {
            assert_eq!(
                request(1_000, url).validate(&limits),
                Err(DepositError::InvalidReturnUrl),
                "url={url:?}"
            );
        }

        let deposit = request(1_000, "HTTPS://shop.example/return")
            .check(&limits)
            .unwrap();
        assert_eq!(deposit.return_url, "HTTPS://shop.example/return");
        assert!(request(1_000, "http://[::1]:8080/done").validate(&limits).is_ok());
    }
}
