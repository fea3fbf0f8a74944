//! Plain-text rendering of the form for a terminal.

use crate::view::{DetailSection, Renderer, ViewModel};
use history::{TransactionKind, TransactionStatus};
use std::io::Write;
use tracing::warn;
use withdrawal::{format_kes, PaymentGateway};

/// Writes each snapshot to `out`.
///
/// Consecutive identical snapshots are skipped.
pub struct TerminalRenderer<W> {
    out: W,
    last: Option<ViewModel>,
}

impl<W: Write> TerminalRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &ViewModel) {
        if self.last.as_ref() == Some(view) {
            return;
        }

        if let Err(e) = self.out.write_all(draw(view).as_bytes()).and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to draw form");
        }
        self.last = Some(view.clone());
    }
}

/// Render a snapshot as text.
pub fn draw(view: &ViewModel) -> String {
    let mut lines = Vec::new();

    lines.push("──────────────── Payout ────────────────".to_string());

    let methods = view
        .method_options
        .iter()
        .map(|option| {
            if option.active {
                format!("[{}]", option.method)
            } else {
                option.method.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("Method:   {methods}"));

    if let Some(gateway) = view.gateway {
        let name = match gateway {
            PaymentGateway::Primary => "primary",
            PaymentGateway::Alternate => "alternate",
        };
        lines.push(format!("Gateway:  {name}"));
    }

    if let Some(balance) = &view.balance {
        lines.push(format!("Balance:  {balance}"));
    }

    lines.push(format!("Amount:   {}", view.form.amount));
    match view.detail_section {
        DetailSection::Bank => {
            lines.push(format!("Name:     {}", view.form.account_name));
            lines.push(format!("Account:  {}", view.form.account_number));
            lines.push(format!("Bank:     {}", view.form.bank_identifier));
            if !view.banks.is_empty() {
                let banks = view
                    .banks
                    .iter()
                    .map(|bank| format!("{} ({})", bank.name, bank.code))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("          banks: {banks}"));
            }
        }
        DetailSection::MobileMoney => {
            lines.push(format!("Phone:    {}", view.form.phone_number));
        }
    }

    lines.push(format!(
        "Amount {} | Fee {} | You receive {}",
        view.fee_preview.amount, view.fee_preview.fee, view.fee_preview.net
    ));

    let button = if view.button.loading {
        format!("[ {} ]", view.button.label)
    } else {
        format!("< {} >", view.button.label)
    };
    lines.push(button);

    if let Some(notification) = &view.notification {
        lines.push(format!(
            "{} {}",
            notification.kind.icon(),
            notification.title
        ));
        for line in notification.message.lines() {
            lines.push(format!("  {line}"));
        }
    }

    if let Some(redirect) = &view.redirect {
        lines.push(format!("Checkout: {}", redirect.url));
    }

    if !view.transactions.is_empty() {
        lines.push("Recent transactions:".to_string());
        for record in &view.transactions {
            let kind = match record.kind {
                TransactionKind::Withdrawal => {
                    record.method.map_or("withdrawal", |method| method.as_str())
                }
                TransactionKind::Deposit => "deposit",
            };
            let status = match record.status {
                TransactionStatus::Pending => "pending",
                TransactionStatus::Success => "success",
                TransactionStatus::Failed => "failed",
            };
            lines.push(format!(
                "  {}  {:<8} {:>14}  {:<7}  {}",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                kind,
                format_kes(record.amount),
                status,
                record.id
            ));
        }
    }

    let mut text = lines.join("\n");
    text.push_str("\n\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::FormState,
        view::{ButtonState, FeeLabels, MethodOption, SubmissionState},
    };
    use history::TransactionRecord;
    use rust_decimal::Decimal;
    use withdrawal::{Field, WithdrawalMethod};

    fn view() -> ViewModel {
        ViewModel {
            method_options: vec![
                MethodOption {
                    method: WithdrawalMethod::Bank,
                    active: true,
                },
                MethodOption {
                    method: WithdrawalMethod::MobileMoney,
                    active: false,
                },
            ],
            detail_section: DetailSection::Bank,
            required_fields: vec![Field::AccountName],
            gateway: None,
            form: FormState::default(),
            fee_preview: FeeLabels {
                amount: "KES 0".to_string(),
                fee: "KES 50".to_string(),
                net: "KES 0".to_string(),
            },
            button: SubmissionState::Idle.into(),
            notification: None,
            transactions: vec![TransactionRecord::withdrawal(
                Some("T1".to_string()),
                Decimal::from(5_000),
                WithdrawalMethod::Bank,
                TransactionStatus::Success,
                "ok",
                Some("2025-01-01T09:30:00Z"),
            )],
            balance: Some("KES 100,000".to_string()),
            banks: Vec::new(),
            redirect: None,
            state: SubmissionState::Idle,
        }
    }

    #[test]
    fn test_draw_contains_form_parts() {
        let text = draw(&view());
        assert!(text.contains("[bank] mpesa"));
        assert!(text.contains("Balance:  KES 100,000"));
        assert!(text.contains("Fee KES 50"));
        assert!(text.contains("< Withdraw Funds >"));
        assert!(text.contains("KES 5,000"));
        assert!(text.contains("T1"));
    }

    #[test]
    fn test_processing_button() {
        let mut view = view();
        view.button = ButtonState::from(SubmissionState::Submitting);
        assert!(draw(&view).contains("[ Processing... ]"));
    }

    #[test]
    fn test_identical_snapshots_drawn_once() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let first = view();
        renderer.render(&first);
        renderer.render(&view());

        let mut changed = first.clone();
        changed.button = ButtonState::from(SubmissionState::Submitting);
        renderer.render(&changed);

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.matches("Payout").count(), 2);
    }
}
