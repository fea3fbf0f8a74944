//! Fee preview shown while the user types.
//!
//! The preview is a hint only; the backend computes the authoritative fee and
//! net amount.

use crate::types::{FeeTable, WithdrawalMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Amount, fee and net payout for one `(amount, method)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePreview {
    pub amount: Decimal,
    pub fee: Decimal,
    pub net: Decimal,
}

impl FeePreview {
    /// Render as the three `KES ...` labels of the summary panel.
    pub fn labels(&self) -> [String; 3] {
        [
            format_kes(self.amount),
            format_kes(self.fee),
            format_kes(self.net),
        ]
    }
}

/// Compute the fee preview for a numeric amount.
///
/// Negative amounts are treated as zero. `net` never goes below zero.
pub fn compute_fees(amount: Decimal, method: WithdrawalMethod, table: &FeeTable) -> FeePreview {
    let amount = amount.max(Decimal::ZERO);
    let fee = table.fee(method);
    let net = (amount - fee).max(Decimal::ZERO);

    FeePreview { amount, fee, net }
}

/// Compute the fee preview straight from the raw amount field.
///
/// Missing or unparsable input counts as zero.
pub fn preview_from_input(input: &str, method: WithdrawalMethod, table: &FeeTable) -> FeePreview {
    let amount = parse_amount(input).unwrap_or(Decimal::ZERO);
    compute_fees(amount, method, table)
}

/// Parse a user-typed amount. Commas are accepted as thousands separators.
///
/// Returns `None` for empty or non-numeric input, and for commas that do not
/// split the whole part into groups of three.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

    if fraction.contains(',') {
        return None;
    }
    let digits = whole.trim_start_matches(['-', '+']);
    if digits.contains(',') && !is_grouped(digits) {
        return None;
    }

    let cleaned = input.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// `1,234,567`: a leading group of one to three characters, then groups of three.
fn is_grouped(digits: &str) -> bool {
    let mut groups = digits.split(',');
    let leading = groups.next().unwrap_or_default();
    (1..=3).contains(&leading.len()) && groups.all(|group| group.len() == 3)
}

/// Format an amount as `KES 1,234.5`.
pub fn format_kes(amount: Decimal) -> String {
    format!("KES {}", group_thousands(amount))
}

/// Group the integer digits of an amount in threes, keeping at most two
/// fractional digits.
pub fn group_thousands(amount: Decimal) -> String {
    let plain = amount.round_dp(2).normalize().to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_net_is_amount_minus_fee() {
        let table = FeeTable::default();
        for amount in [0, 1, 25, 26, 49, 50, 51, 100, 5_000, 1_000_000] {
            let amount = Decimal::from(amount);
            for method in [WithdrawalMethod::Bank, WithdrawalMethod::MobileMoney] {
                let preview = compute_fees(amount, method, &table);
                let expected = (amount - table.fee(method)).max(Decimal::ZERO);
                assert_eq!(preview.net, expected, "amount={amount} method={method}");
                assert_eq!(preview.fee, table.fee(method));
            }
        }
    }

    #[test]
    fn test_fee_per_method() {
        let table = FeeTable::default();
        let bank = compute_fees(dec("5000"), WithdrawalMethod::Bank, &table);
        let mpesa = compute_fees(dec("5000"), WithdrawalMethod::MobileMoney, &table);

        assert_eq!(bank.fee, dec("50"));
        assert_eq!(bank.net, dec("4950"));
        assert_eq!(mpesa.fee, dec("25"));
        assert_eq!(mpesa.net, dec("4975"));
    }

    #[test]
    fn test_unparsable_input_is_zero() {
        let table = FeeTable::default();
        for input in ["", "   ", "abc", "12abc", "--5"] {
            let preview = preview_from_input(input, WithdrawalMethod::Bank, &table);
            assert_eq!(preview.amount, Decimal::ZERO, "input={input:?}");
            assert_eq!(preview.net, Decimal::ZERO);
            assert_eq!(preview.fee, dec("50"));
        }
    }

    #[test]
    fn test_negative_amount_clamped() {
        let preview = compute_fees(dec("-300"), WithdrawalMethod::MobileMoney, &FeeTable::default());
        assert_eq!(preview.amount, Decimal::ZERO);
        assert_eq!(preview.net, Decimal::ZERO);
    }

    #[test]
    fn test_preview_is_idempotent() {
        let table = FeeTable::default();
        let first = preview_from_input("1234.5", WithdrawalMethod::Bank, &table);
        let second = preview_from_input("1234.5", WithdrawalMethod::Bank, &table);
        assert_eq!(first, second);
        assert_eq!(first.net, dec("1184.5"));
    }

    #[test]
    fn test_parse_amount_accepts_grouping() {
        assert_eq!(parse_amount("5,000"), Some(dec("5000")));
        assert_eq!(parse_amount(" 250.75 "), Some(dec("250.75")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("ten"), None);
    }

    #[test]
    fn test_parse_amount_rejects_misplaced_commas() {
        assert_eq!(parse_amount("1,000,000.50"), Some(dec("1000000.50")));
        assert_eq!(parse_amount("-1,500"), Some(dec("-1500")));
        for input in ["1,0,0", "12,34", ",500", "5,000,", "1000,000", "1.5,0", ","] {
            assert_eq!(parse_amount(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_format_kes() {
        assert_eq!(format_kes(Decimal::ZERO), "KES 0");
        assert_eq!(format_kes(dec("50")), "KES 50");
        assert_eq!(format_kes(dec("4950")), "KES 4,950");
        assert_eq!(format_kes(dec("1000000")), "KES 1,000,000");
        assert_eq!(format_kes(dec("1234.50")), "KES 1,234.5");
        assert_eq!(format_kes(dec("100000.125")), "KES 100,000.12");
        assert_eq!(format_kes(dec("-2500")), "KES -2,500");
    }

    #[test]
    fn test_labels_reset_state() {
        let preview = preview_from_input("", WithdrawalMethod::Bank, &FeeTable::default());
        assert_eq!(preview.labels(), ["KES 0", "KES 50", "KES 0"]);
    }
}
