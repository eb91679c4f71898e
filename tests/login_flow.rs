//! End-to-end login flow against the mock page

mod common;

use authflow::driver::mock::{MockDriver, MockElement};
use authflow::driver::Selector;
use authflow::page::{LoginCredentials, LoginPage};
use authflow::testdata::{CaseStore, TestStatus};
use common::{fast_config, sign_in_app, BASE_URL};
use std::sync::Arc;

#[tokio::test]
async fn login_with_valid_credentials_leaves_the_page() {
    let page = LoginPage::new(Arc::new(sign_in_app()), fast_config());
    page.open().await.unwrap();
    assert!(page.is_on_login_page().await.unwrap());

    page.login(&LoginCredentials::new("Hảo", "123456"))
        .await
        .unwrap();

    assert!(page.is_login_successful().await.unwrap());
    assert_eq!(
        page.session().current_url().await.unwrap(),
        format!("{}/", BASE_URL)
    );
}

#[tokio::test]
async fn login_with_wrong_password_stays_and_reports() {
    let page = LoginPage::new(Arc::new(sign_in_app()), fast_config());
    page.open().await.unwrap();

    page.login(&LoginCredentials::new("Hảo", "sai_mat_khau"))
        .await
        .unwrap();

    assert!(!page.is_login_successful().await.unwrap());
    assert!(page.is_on_login_page().await.unwrap());
    assert_eq!(
        page.login_error().await,
        "Tài khoản hoặc mật khẩu không đúng"
    );
}

#[tokio::test]
async fn error_getters_are_empty_when_nothing_is_wrong() {
    let page = LoginPage::new(Arc::new(sign_in_app()), fast_config());
    page.open().await.unwrap();

    assert_eq!(page.login_error().await, "");
    assert_eq!(page.field_error("username").await, "");
    assert_eq!(page.field_error("password").await, "");
}

#[tokio::test]
async fn fallback_expressions_resolve_via_test_ids_when_present() {
    // This page only exposes the test-id hooks; the structural selectors in
    // the fallback lists never match, so everything must resolve via test id.
    let driver = MockDriver::new();
    let username = Selector::test_id("username-input");
    let password = Selector::test_id("password-input");
    let submit = Selector::test_id("login-submit");

    driver.add_element(MockElement::new([username.clone()]));
    driver.add_element(MockElement::new([password.clone()]));
    driver.add_element(MockElement::new([submit.clone()]));

    driver.on_click(submit, move |state| {
        let user = state.filled_value(&username).unwrap_or_default();
        let pass = state.filled_value(&password).unwrap_or_default();
        if user == "Hảo" && pass == "123456" {
            state.url = format!("{}/", BASE_URL);
        }
    });

    let page = LoginPage::new(Arc::new(driver), fast_config());
    page.open().await.unwrap();

    page.login(&LoginCredentials::new("Hảo", "123456"))
        .await
        .unwrap();
    assert!(page.is_login_successful().await.unwrap());
}

#[tokio::test]
async fn login_with_credentials_from_case_store() {
    let store: CaseStore = r#"{
        "login": {
            "test_cases": [
                {
                    "id": "DN_01",
                    "test_status": "passed",
                    "pre_condition": { "username": "Hảo", "password": "123456" },
                    "steps": ["Mở trang đăng nhập", "Nhập thông tin", "Nhấn Đăng nhập"]
                }
            ]
        }
    }"#
    .parse()
    .unwrap();

    let cases = store.cases_by_status("login", TestStatus::Passed);
    assert_eq!(cases.len(), 1);

    let data = cases[0].effective_data();
    let credentials = LoginCredentials::new(
        data.username.unwrap_or_default(),
        data.password.unwrap_or_default(),
    );

    let page = LoginPage::new(Arc::new(sign_in_app()), fast_config());
    page.open().await.unwrap();
    page.login(&credentials).await.unwrap();

    assert!(page.is_login_successful().await.unwrap());
}

#[tokio::test]
async fn register_link_navigates_away() {
    let driver = sign_in_app();
    driver.on_click(Selector::css("a[href*=\"sign-up\"]"), |state| {
        state.url = format!("{}/sign-up", BASE_URL);
    });

    let page = LoginPage::new(Arc::new(driver), fast_config());
    page.open().await.unwrap();

    page.open_register().await.unwrap();
    assert!(page
        .session()
        .current_url()
        .await
        .unwrap()
        .contains("sign-up"));
}
