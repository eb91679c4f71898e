//! End-to-end registration flow against the mock page

mod common;

use authflow::page::{RegisterPage, RegistrationData};
use authflow::testdata::random_registration;
use common::{fast_config, sign_up_app, BASE_URL};
use std::sync::Arc;

#[tokio::test]
async fn registration_with_fresh_data_redirects_to_login() {
    let page = RegisterPage::new(Arc::new(sign_up_app()), fast_config());
    page.open().await.unwrap();
    assert!(page.is_on_register_page().await.unwrap());

    page.register(&random_registration()).await.unwrap();

    assert!(page.is_registration_successful().await.unwrap());
    assert_eq!(
        page.session().current_url().await.unwrap(),
        format!("{}/sign-in", BASE_URL)
    );
}

#[tokio::test]
async fn mismatched_confirm_password_flags_the_field() {
    let page = RegisterPage::new(Arc::new(sign_up_app()), fast_config());
    page.open().await.unwrap();

    let data = RegistrationData {
        confirm_password: "khac_mat_khau".to_string(),
        ..random_registration()
    };
    page.register(&data).await.unwrap();

    assert!(!page.is_registration_successful().await.unwrap());
    assert!(page.has_field_error("confirmPassword").await);
    assert_eq!(
        page.field_error("confirmPassword").await,
        "Mật khẩu không khớp"
    );
}

#[tokio::test]
async fn field_errors_are_empty_before_submit() {
    let page = RegisterPage::new(Arc::new(sign_up_app()), fast_config());
    page.open().await.unwrap();

    for field in ["username", "password", "confirmPassword", "fullName", "email"] {
        assert_eq!(page.field_error(field).await, "", "field: {field}");
        assert!(!page.has_field_error(field).await, "field: {field}");
    }
}

#[tokio::test]
async fn empty_fields_are_left_untouched() {
    use authflow::driver::Selector;

    let driver = Arc::new(sign_up_app());
    let page = RegisterPage::new(driver.clone(), fast_config());
    page.open().await.unwrap();

    let data = RegistrationData {
        email: String::new(),
        ..random_registration()
    };
    page.fill_form(&data).await.unwrap();

    driver.with_state(|s| {
        assert_eq!(s.filled_value(&Selector::css("input[name=\"email\"]")), None);
        assert_eq!(
            s.filled_value(&Selector::css("input[name=\"hoTen\"]")),
            Some(data.full_name.clone())
        );
    });
}

#[tokio::test]
async fn generated_registration_data_is_consistent() {
    let data = random_registration();

    assert!(data.username.starts_with("test_user_"));
    assert_eq!(data.password, data.confirm_password);
    assert!(data.email.ends_with("@example.com"));
    assert!(!data.full_name.is_empty());
}
