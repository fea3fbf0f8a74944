//! Raw form contents as typed by the user.

use deposit::DepositRequest;
use std::{fmt, str::FromStr};
use withdrawal::{parse_amount, Field, WithdrawalMethod, WithdrawalRequest};

/// Editable inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    AccountName,
    AccountNumber,
    BankIdentifier,
    PhoneNumber,
    ReturnUrl,
}

impl FormField {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::AccountName => "account name",
            Self::AccountNumber => "account number",
            Self::BankIdentifier => "bank",
            Self::PhoneNumber => "phone number",
            Self::ReturnUrl => "return url",
        }
    }
}

impl From<Field> for FormField {
    fn from(field: Field) -> Self {
        match field {
            Field::AccountName => Self::AccountName,
            Field::AccountNumber => Self::AccountNumber,
            Field::BankIdentifier => Self::BankIdentifier,
            Field::PhoneNumber => Self::PhoneNumber,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" => Ok(Self::Amount),
            "name" | "account-name" => Ok(Self::AccountName),
            "account" | "account-number" => Ok(Self::AccountNumber),
            "bank" => Ok(Self::BankIdentifier),
            "phone" => Ok(Self::PhoneNumber),
            "return-url" | "url" => Ok(Self::ReturnUrl),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

/// Untrimmed, unvalidated text of every input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub amount: String,
    pub account_name: String,
    pub account_number: String,
    pub bank_identifier: String,
    pub phone_number: String,
    pub return_url: String,
}

impl FormState {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Amount => self.amount = value,
            FormField::AccountName => self.account_name = value,
            FormField::AccountNumber => self.account_number = value,
            FormField::BankIdentifier => self.bank_identifier = value,
            FormField::PhoneNumber => self.phone_number = value,
            FormField::ReturnUrl => self.return_url = value,
        }
    }

    pub fn withdrawal_request(&self, method: WithdrawalMethod) -> WithdrawalRequest {
        WithdrawalRequest {
            amount: parse_amount(&self.amount),
            method,
            account_name: self.account_name.clone(),
            account_number: self.account_number.clone(),
            bank_identifier: self.bank_identifier.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    pub fn deposit_request(&self) -> DepositRequest {
        DepositRequest {
            amount: parse_amount(&self.amount),
            return_url: self.return_url.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_withdrawal_request_parses_amount() {
        let mut form = FormState::default();
        form.set(FormField::Amount, "5,000");
        form.set(FormField::AccountName, "Jane");

        let request = form.withdrawal_request(WithdrawalMethod::Bank);
        assert_eq!(request.amount, Some(Decimal::from(5_000)));
        assert_eq!(request.account_name, "Jane");

        form.set(FormField::Amount, "abc");
        assert_eq!(form.withdrawal_request(WithdrawalMethod::Bank).amount, None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = FormState::default();
        form.set(FormField::PhoneNumber, "0712345678");
        form.set(FormField::ReturnUrl, "https://shop.example");
        form.reset();
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_field_names() {
        assert_eq!("phone".parse::<FormField>(), Ok(FormField::PhoneNumber));
        assert_eq!("bank".parse::<FormField>(), Ok(FormField::BankIdentifier));
        assert!("pin".parse::<FormField>().is_err());
        assert_eq!(FormField::from(Field::AccountNumber), FormField::AccountNumber);
    }
}
