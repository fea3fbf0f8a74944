use crate::setup::{setup_controller, OFFLINE_URL};
use config::FrontendConfig;
use controller::{notification::NotificationKind, session::run};
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};


#[tokio::test(start_paused = true)]
async fn test_success_notice_hides_while_input_is_idle() {
    let mut controller = setup_controller(OFFLINE_URL, FrontendConfig::demo_wallet());
    let (mut input, reader) = tokio::io::duplex(64);

    let typist = tokio::spawn(async move {
        input.write_all(b"balance\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(8)).await;
    });

    run(&mut controller, BufReader::new(reader)).await.unwrap();
    typist.await.unwrap();

    let shown = controller.renderer().views.iter().any(|view| {
        view.notification
            .as_ref()
            .is_some_and(|n| n.title == "Balance Refreshed" && n.kind == NotificationKind::Success)
    });
    assert!(shown);
    assert!(controller.view().notification.is_none());
    assert!(controller.renderer().views.last().unwrap().notification.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_error_notice_survives_idle_ticks() {
    let mut controller = setup_controller(OFFLINE_URL, FrontendConfig::demo_wallet());
    let (mut input, reader) = tokio::io::duplex(64);

    let typist = tokio::spawn(async move {
        input.write_all(b"submit\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        input.write_all(b"quit\n").await.unwrap();
    });

    run(&mut controller, BufReader::new(reader)).await.unwrap();
    typist.await.unwrap();

    let notification = controller.view().notification.unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.title, "Invalid Amount");
}

#[tokio::test]
async fn test_quit_ends_session_before_input_closes() {
    let mut controller = setup_controller(OFFLINE_URL, FrontendConfig::demo_wallet());
    let (mut input, reader) = tokio::io::duplex(64);
    input.write_all(b"amount 1,000\nquit\namount 9\n").await.unwrap();

    run(&mut controller, BufReader::new(reader)).await.unwrap();

    assert_eq!(controller.view().form.amount, "1,000");
    assert_eq!(controller.view().fee_preview.net, "KES 950");
    drop(input);
}
