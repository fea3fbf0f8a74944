//! Declarative snapshot of everything the form shows.
//!
//! The controller never draws anything itself. After every state change it
//! builds a [`ViewModel`] and hands it to a [`Renderer`].

use crate::{form::FormState, notification::Notification};
use client::Bank;
use deposit::CheckoutRedirect;
use history::TransactionRecord;
use withdrawal::{FeePreview, Field, PaymentGateway, WithdrawalMethod};

pub const SUBMIT_LABEL: &str = "Withdraw Funds";
pub const PROCESSING_LABEL: &str = "Processing...";

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodOption {
    pub method: WithdrawalMethod,
    pub active: bool,
}

/// Detail inputs shown for the active method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSection {
    Bank,
    MobileMoney,
}

impl From<WithdrawalMethod> for DetailSection {
    fn from(method: WithdrawalMethod) -> Self {
        match method {
            WithdrawalMethod::Bank => Self::Bank,
            WithdrawalMethod::MobileMoney => Self::MobileMoney,
        }
    }
}

/// Fee preview as displayed, e.g. `KES 5,000 / KES 50 / KES 4,950`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeLabels {
    pub amount: String,
    pub fee: String,
    pub net: String,
}

impl From<&FeePreview> for FeeLabels {
    fn from(preview: &FeePreview) -> Self {
        let [amount, fee, net] = preview.labels();
        Self { amount, fee, net }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub label: &'static str,
    pub loading: bool,
}

impl From<SubmissionState> for ButtonState {
    fn from(state: SubmissionState) -> Self {
        if state.is_busy() {
            Self {
                enabled: false,
                label: PROCESSING_LABEL,
                loading: true,
            }
        } else {
            Self {
                enabled: true,
                label: SUBMIT_LABEL,
                loading: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub method_options: Vec<MethodOption>,
    pub detail_section: DetailSection,
    pub required_fields: Vec<Field>,
    /// Gateway selector value; `None` when the profile has no selector
    pub gateway: Option<PaymentGateway>,
    pub form: FormState,
    pub fee_preview: FeeLabels,
    pub button: ButtonState,
    pub notification: Option<Notification>,
    /// Most recent records, newest first
    pub transactions: Vec<TransactionRecord>,
    /// Formatted balance, if one is tracked and known
    pub balance: Option<String>,
    pub banks: Vec<Bank>,
    /// Checkout page to send the user to after a deposit
    pub redirect: Option<CheckoutRedirect>,
    pub state: SubmissionState,
}

impl ViewModel {
    pub fn active_method(&self) -> Option<WithdrawalMethod> {
        self.method_options
            .iter()
            .find(|option| option.active)
            .map(|option| option.method)
    }
}

/// Something that can display a [`ViewModel`].
pub trait Renderer {
    fn render(&mut self, view: &ViewModel);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, view: &ViewModel) {
        (**self).render(view);
    }
}

/// Renderer that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &ViewModel) {}
}
