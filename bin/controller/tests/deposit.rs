use crate::setup::{setup_controller, OFFLINE_URL};
use action::SubmissionError;
use config::FrontendConfig;
use controller::{controller::SubmitError, form::FormField, notification::NotificationKind};
use deposit::DepositError;
use history::{TransactionKind, TransactionStatus};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};


#[tokio::test]
async fn test_deposit_redirects_to_checkout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deposit"))
        .and(body_json(json!({
            "amount": 2500.0,
            "returnUrl": "https://shop.example/return"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "transactionId": "D1",
            "amount": 2500,
            "url": "https://checkout.example/s/1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = setup_controller(&server.uri(), FrontendConfig::checkout());
    controller.set_field(FormField::Amount, "2,500");
    controller.set_field(FormField::ReturnUrl, " https://shop.example/return ");

    let receipt = controller.submit_deposit().await.unwrap();
    assert_eq!(
        receipt.redirect_url.as_deref(),
        Some("https://checkout.example/s/1")
    );

    let view = controller.view();
    let redirect = view.redirect.unwrap();
    assert_eq!(redirect.url, "https://checkout.example/s/1");
    assert_eq!(redirect.transaction_id.as_deref(), Some("D1"));
    assert_eq!(view.transactions.len(), 1);
    assert_eq!(view.transactions[0].kind, TransactionKind::Deposit);
    assert_eq!(view.transactions[0].id, "D1");
    assert_eq!(view.transactions[0].amount, Decimal::from(2_500));
    assert_eq!(
        view.notification.map(|n| n.kind),
        Some(NotificationKind::Success)
    );
    assert!(view.form.amount.is_empty());
}

#[tokio::test]
async fn test_deposits_disabled_outside_checkout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deposit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = setup_controller(&server.uri(), FrontendConfig::demo_wallet());
    controller.set_field(FormField::Amount, "2500");
    controller.set_field(FormField::ReturnUrl, "https://shop.example/return");

    assert_eq!(
        controller.submit_deposit().await.unwrap_err(),
        SubmitError::DepositsDisabled
    );
    assert!(controller.view().transactions.is_empty());
}

#[tokio::test]
async fn test_invalid_return_url_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deposit"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = setup_controller(&server.uri(), FrontendConfig::checkout());
    controller.set_field(FormField::Amount, "2500");
    controller.set_field(FormField::ReturnUrl, "shop.example/return");

    assert_eq!(
        controller.submit_deposit().await.unwrap_err(),
        SubmitError::Deposit(DepositError::InvalidReturnUrl)
    );
    assert_eq!(
        controller.view().notification.map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[tokio::test]
async fn test_rejected_deposit_is_failed_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deposit"))
        .respond_with(
            ResponseTemplate::new(402)
                .set_body_json(json!({"success": false, "message": "Card declined"})),
        )
        .mount(&server)
        .await;

    let mut controller = setup_controller(&server.uri(), FrontendConfig::checkout());
    controller.set_field(FormField::Amount, "2500");
    controller.set_field(FormField::ReturnUrl, "https://shop.example/return");

    let err = controller.submit_deposit().await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::Submission(SubmissionError::Backend("Card declined".to_string()))
    );

    let view = controller.view();
    assert_eq!(view.transactions[0].status, TransactionStatus::Failed);
    assert_eq!(view.notification.unwrap().title, "Deposit Failed");
    assert!(view.redirect.is_none());
    assert!(view.button.enabled);
}

#[tokio::test]
async fn test_offline_deposit() {
    let mut controller = setup_controller(OFFLINE_URL, FrontendConfig::checkout());
    controller.set_field(FormField::Amount, "2500");
    controller.set_field(FormField::ReturnUrl, "https://shop.example/return");

    let err = controller.submit_deposit().await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Submission(SubmissionError::Network(_))
    ));
    assert_eq!(
        controller.view().notification.unwrap().title,
        "Connection Error"
    );
}
