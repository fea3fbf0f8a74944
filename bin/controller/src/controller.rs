//! The form controller: owns all state and drives submissions.

use crate::{
    form::{FormField, FormState},
    metrics::Metrics,
    notification::{NotificationKind, NotificationPresenter},
    view::{DetailSection, FeeLabels, MethodOption, Renderer, SubmissionState, ViewModel},
};
use action::{deposit::DepositAction, withdraw::WithdrawAction, Action, Receipt, SubmissionError};
use balance::BalanceTracker;
use client::{Backend, Bank, ClientError};
use config::{BalanceMode, FrontendConfig};
use deposit::{CheckoutRedirect, DepositError};
use history::{History, TransactionRecord, TransactionStatus};
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use withdrawal::{
    format_kes, preview_from_input, FeePreview, PaymentGateway, ValidationError, Validator,
    Withdrawal, WithdrawalMethod,
};

/// Why a submission did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Deposit(#[from] DepositError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Deposits are not available in this profile")]
    DepositsDisabled,
}

/// All mutable state of the form.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub method: WithdrawalMethod,
    pub gateway: Option<PaymentGateway>,
    pub form: FormState,
    pub fee_preview: FeePreview,
    pub submission: SubmissionState,
    pub notifications: NotificationPresenter,
    pub history: History,
    pub balance: BalanceTracker,
    pub banks: Vec<Bank>,
    pub redirect: Option<CheckoutRedirect>,
}

impl ControllerState {
    pub fn new(config: &FrontendConfig) -> Self {
        let method = config.default_method;
        let balance = match config.balance {
            BalanceMode::Demo { initial } => BalanceTracker::demo(initial),
            BalanceMode::Remote => BalanceTracker::remote(),
            BalanceMode::Untracked => BalanceTracker::Untracked,
        };

        Self {
            method,
            gateway: config.gateways.as_ref().map(|_| PaymentGateway::Primary),
            form: FormState::default(),
            fee_preview: preview_from_input("", method, &config.fee_table),
            submission: SubmissionState::Idle,
            notifications: NotificationPresenter::new(Duration::from_secs(
                config.success_notice_secs,
            )),
            history: History::with_capacity(config.history_capacity),
            balance,
            banks: Vec::new(),
            redirect: None,
        }
    }
}

/// Controller for the withdrawal/deposit form.
///
/// Every state change ends with a [`ViewModel`] snapshot handed to the
/// renderer. Submissions take `&mut self`, so only one can be in flight.
pub struct FormController<B, R> {
    config: FrontendConfig,
    backend: B,
    renderer: R,
    state: ControllerState,
    metrics: Metrics,
}

impl<B, R> FormController<B, R>
where
    B: Backend,
    R: Renderer,
{
    pub fn new(config: FrontendConfig, backend: B, renderer: R) -> Self {
        let state = ControllerState::new(&config);
        let mut controller = Self {
            config,
            backend,
            renderer,
            state,
            metrics: Metrics::new(),
        };
        controller.render();
        controller
    }

    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    pub const fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn view(&self) -> ViewModel {
        let state = &self.state;

        ViewModel {
            method_options: self
                .config
                .available_methods
                .iter()
                .map(|&method| MethodOption {
                    method,
                    active: method == state.method,
                })
                .collect(),
            detail_section: DetailSection::from(state.method),
            required_fields: state.method.required_fields().to_vec(),
            gateway: state.gateway,
            form: state.form.clone(),
            fee_preview: FeeLabels::from(&state.fee_preview),
            button: state.submission.into(),
            notification: state.notifications.current().cloned(),
            transactions: state.history.displayed(),
            balance: state.balance.current().map(format_kes),
            banks: state.banks.clone(),
            redirect: state.redirect.clone(),
            state: state.submission,
        }
    }

    pub fn select_method(&mut self, method: WithdrawalMethod) {
        if !self.config.available_methods.contains(&method) {
            debug!(%method, "Method not offered by this profile, ignoring");
            return;
        }

        self.state.method = method;
        self.recompute_fees();
        self.render();
    }

    pub fn select_gateway(&mut self, gateway: PaymentGateway) {
        if self.config.gateways.is_none() {
            debug!(?gateway, "No gateway selector in this profile, ignoring");
            return;
        }

        self.state.gateway = Some(gateway);
        self.render();
    }

    pub fn set_amount(&mut self, input: impl Into<String>) {
        self.set_field(FormField::Amount, input);
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.form.set(field, value);
        if field == FormField::Amount {
            self.recompute_fees();
        }
        self.render();
    }

    pub fn dismiss_notification(&mut self) {
        self.state.notifications.dismiss();
        self.render();
    }

    /// Advance the notification clock; re-renders only if something expired.
    pub fn tick(&mut self, now: Instant) {
        if self.state.notifications.tick(now) {
            self.render();
        }
    }

    /// Validate the form and send the withdrawal.
    ///
    /// Validation failures never reach the network. The button is restored
    /// on every exit path.
    pub async fn submit_withdrawal(&mut self) -> Result<Receipt, SubmitError> {
        self.transition(SubmissionState::Validating);

        let request = self.state.form.withdrawal_request(self.state.method);
        let validator =
            Validator::new(self.config.limits).with_balance(self.state.balance.local_limit());

        let withdrawal = match validator.check(&request) {
            Ok(withdrawal) => withdrawal,
            Err(err) => {
                warn!(reason = err.reason(), error = %err, "Withdrawal blocked by validation");
                self.metrics.record_validation_rejection("withdrawal", err.reason());
                self.state
                    .notifications
                    .notify(err.title(), NotificationKind::Error, err.to_string());
                self.transition(SubmissionState::Idle);
                return Err(err.into());
            }
        };

        self.transition(SubmissionState::Submitting);

        let started = Instant::now();
        let result = {
            let action = WithdrawAction::new(
                &self.backend,
                withdrawal.clone(),
                self.config.wire_format,
                self.payment_method_code(),
            );
            info!(description = %action.description(), "Submitting withdrawal");
            action.execute().await
        };
        self.metrics
            .record_submission("withdrawal", result.is_ok(), started.elapsed());

        match &result {
            Ok(receipt) => self.withdrawal_succeeded(&withdrawal, receipt).await,
            Err(err) => self.withdrawal_failed(&withdrawal, err),
        }

        self.transition(SubmissionState::Idle);
        result.map_err(Into::into)
    }

    /// Validate the deposit inputs and start a checkout.
    pub async fn submit_deposit(&mut self) -> Result<Receipt, SubmitError> {
        if !self.config.deposits_enabled {
            let err = SubmitError::DepositsDisabled;
            self.state
                .notifications
                .notify("Deposit Unavailable", NotificationKind::Error, err.to_string());
            self.render();
            return Err(err);
        }

        self.transition(SubmissionState::Validating);

        let deposit = match self.state.form.deposit_request().check(&self.config.limits) {
            Ok(deposit) => deposit,
            Err(err) => {
                warn!(reason = err.reason(), error = %err, "Deposit blocked by validation");
                self.metrics.record_validation_rejection("deposit", err.reason());
                self.state
                    .notifications
                    .notify(err.title(), NotificationKind::Error, err.to_string());
                self.transition(SubmissionState::Idle);
                return Err(err.into());
            }
        };

        self.transition(SubmissionState::Submitting);

        let started = Instant::now();
        let amount = deposit.amount;
        let result = {
            let action = DepositAction::new(&self.backend, deposit);
            info!(description = %action.description(), "Submitting deposit");
            action.execute().await
        };
        self.metrics
            .record_submission("deposit", result.is_ok(), started.elapsed());

        match &result {
            Ok(receipt) => {
                let record = TransactionRecord::deposit(
                    receipt.transaction_id.clone(),
                    amount,
                    TransactionStatus::Success,
                    receipt
                        .message
                        .clone()
                        .unwrap_or_else(|| "Redirecting to checkout".to_string()),
                );
                let url = receipt.redirect_url.clone().unwrap_or_default();
                self.metrics.record_deposit(amount);

                self.state.notifications.notify(
                    "Deposit Started",
                    NotificationKind::Success,
                    format!(
                        "{} deposit started\nTransaction ID: {}\nContinue at {}",
                        format_kes(amount),
                        record.id,
                        url
                    ),
                );
                self.record(record);
                self.state.redirect = Some(CheckoutRedirect {
                    transaction_id: receipt.transaction_id.clone(),
                    url,
                });
                self.transition(SubmissionState::Succeeded);
                self.reset_form();
            }
            Err(err) => {
                self.metrics.record_failure("deposit", err.reason());
                self.record(TransactionRecord::deposit(
                    None,
                    amount,
                    TransactionStatus::Failed,
                    err.to_string(),
                ));
                self.state.notifications.notify(
                    failure_title(err, "Deposit Failed"),
                    NotificationKind::Error,
                    err.to_string(),
                );
                self.transition(SubmissionState::Failed);
            }
        }

        self.transition(SubmissionState::Idle);
        result.map_err(Into::into)
    }

    /// Re-read the balance and announce it.
    ///
    /// On failure the last known balance stays on screen.
    pub async fn refresh_balance(&mut self) -> eyre::Result<Option<Decimal>> {
        match self.state.balance.refresh(&self.backend).await {
            Ok(Some(balance)) => {
                self.metrics.set_balance(balance.amount);
                self.state.notifications.notify(
                    "Balance Refreshed",
                    NotificationKind::Success,
                    format!("Available: {}", format_kes(balance.amount)),
                );
                self.render();
                Ok(Some(balance.amount))
            }
            Ok(None) => {
                debug!("No balance tracked in this profile");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Balance refresh failed");
                self.state.notifications.notify(
                    "Balance Unavailable",
                    NotificationKind::Error,
                    e.to_string(),
                );
                self.render();
                Err(e)
            }
        }
    }

    /// Fetch the banks offered in the bank selector.
    pub async fn load_banks(&mut self) -> Result<usize, ClientError> {
        match self.backend.banks().await {
            Ok(banks) => {
                info!(count = banks.len(), "Loaded banks");
                self.state.banks = banks;
                self.render();
                Ok(self.state.banks.len())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load banks");
                self.state.notifications.notify(
                    "Banks Unavailable",
                    NotificationKind::Error,
                    e.to_string(),
                );
                self.render();
                Err(e)
            }
        }
    }

    async fn withdrawal_succeeded(&mut self, withdrawal: &Withdrawal, receipt: &Receipt) {
        let method = withdrawal.method();
        let record = TransactionRecord::withdrawal(
            receipt.transaction_id.clone(),
            withdrawal.amount,
            method,
            TransactionStatus::Success,
            receipt
                .message
                .clone()
                .unwrap_or_else(|| "Withdrawal successful".to_string()),
            receipt.timestamp.as_deref(),
        );

        let net = receipt.net_amount.unwrap_or(self.state.fee_preview.net);
        self.metrics.record_withdrawal(withdrawal.amount);
        self.state.notifications.notify(
            "Withdrawal Successful!",
            NotificationKind::Success,
            format!(
                "{} sent via {}\nTransaction ID: {}\nNet Amount: KES {}",
                format_kes(withdrawal.amount),
                method.as_str().to_uppercase(),
                record.id,
                net.normalize()
            ),
        );
        self.record(record);
        self.transition(SubmissionState::Succeeded);
        self.reset_form();

        if self.state.balance.refresh_after_withdrawal() {
            if let Err(e) = self.state.balance.refresh(&self.backend).await {
                warn!(error = %e, "Balance refresh after withdrawal failed");
            }
        } else {
            self.state.balance.record_withdrawal(withdrawal.amount);
        }
        if let Some(balance) = self.state.balance.current() {
            self.metrics.set_balance(balance);
        }
    }

    fn withdrawal_failed(&mut self, withdrawal: &Withdrawal, err: &SubmissionError) {
        self.metrics.record_failure("withdrawal", err.reason());
        self.record(TransactionRecord::withdrawal(
            None,
            withdrawal.amount,
            withdrawal.method(),
            TransactionStatus::Failed,
            err.to_string(),
            None,
        ));
        self.state.notifications.notify(
            failure_title(err, "Withdrawal Failed"),
            NotificationKind::Error,
            err.to_string(),
        );
        self.transition(SubmissionState::Failed);
    }

    fn payment_method_code(&self) -> Option<String> {
        let codes = self.config.gateways.as_ref()?;
        let gateway = self.state.gateway.unwrap_or_default();
        Some(codes.code(gateway).to_string())
    }

    fn record(&mut self, record: TransactionRecord) {
        self.state.history.record(record);
        self.metrics.set_history_size(self.state.history.len());
    }

    fn reset_form(&mut self) {
        self.state.form.reset();
        self.recompute_fees();
        self.render();
    }

    fn recompute_fees(&mut self) {
        self.state.fee_preview = preview_from_input(
            &self.state.form.amount,
            self.state.method,
            &self.config.fee_table,
        );
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state.submission, to = ?next, "Submission state");
        self.state.submission = next;
        self.render();
    }

    fn render(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }
}

/// Backend rejections get a flow-specific title; transport problems keep theirs.
const fn failure_title(err: &SubmissionError, rejected: &'static str) -> &'static str {
    match err {
        SubmissionError::Backend(_) => rejected,
        other => other.title(),
    }
}
