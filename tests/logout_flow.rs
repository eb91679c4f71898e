//! End-to-end logout flow against the mock page
//!
//! Both branches of the flow are covered: the frontend sometimes raises a
//! confirmation dialog before logging out and sometimes does not.

mod common;

use authflow::page::{HomePage, StepOutcome};
use common::{fast_config, logged_in_home};
use std::sync::Arc;

#[tokio::test]
async fn logout_without_confirmation_is_skipped_and_signs_out() {
    let page = HomePage::new(Arc::new(logged_in_home(false)), fast_config());
    page.open().await.unwrap();
    assert!(page.is_user_logged_in().await);

    let report = page.logout().await.unwrap();

    assert_eq!(report.confirmation, StepOutcome::Skipped);
    assert!(page
        .session()
        .current_url()
        .await
        .unwrap()
        .contains("sign-in"));
}

#[tokio::test]
async fn logout_with_confirmation_is_handled_and_signs_out() {
    let page = HomePage::new(Arc::new(logged_in_home(true)), fast_config());
    page.open().await.unwrap();

    let report = page.logout().await.unwrap();

    assert_eq!(report.confirmation, StepOutcome::Handled);
    assert!(page
        .session()
        .current_url()
        .await
        .unwrap()
        .contains("sign-in"));
}

#[tokio::test]
async fn anonymous_visitor_is_not_logged_in() {
    let driver = authflow::driver::mock::MockDriver::new();
    let page = HomePage::new(Arc::new(driver), fast_config());
    page.open().await.unwrap();

    assert!(!page.is_user_logged_in().await);
    assert_eq!(page.user_name().await.ok(), None);
}
