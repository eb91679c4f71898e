//! Register page object
//!
//! Wraps the `/sign-up` page. Adds per-field error lookup and a success
//! classification that mirrors the application's redirect-to-login behavior.

use super::selector::SelectorMap;
use super::session::PageSession;
use super::RegistrationData;
use crate::config::Config;
use crate::driver::{BrowserDriver, Selector};
use crate::Result;
use std::sync::Arc;
use tracing::instrument;

/// Path of the registration page
const REGISTER_PATH: &str = "/sign-up";

/// Page object for the registration page
#[derive(Debug)]
pub struct RegisterPage {
    session: PageSession,
    selectors: SelectorMap,
}

impl RegisterPage {
    /// Create a register page over a fresh session on the given tab
    pub fn new(driver: Arc<dyn BrowserDriver>, config: Config) -> Self {
        Self::with_session(PageSession::new(driver, config))
    }

    /// Create a register page over an existing session
    pub fn with_session(session: PageSession) -> Self {
        Self {
            session,
            selectors: Self::selector_map(),
        }
    }

    fn selector_map() -> SelectorMap {
        let mut map = SelectorMap::new();

        map.insert(
            "usernameInput",
            vec![
                Selector::test_id("username-input"),
                Selector::css("input[name=\"taiKhoan\"]"),
                Selector::css("input#taiKhoan"),
                Selector::css("input[placeholder*=\"Tài khoản\"]"),
            ],
        );
        map.insert(
            "passwordInput",
            vec![
                Selector::test_id("password-input"),
                Selector::css("input[name=\"matKhau\"]"),
                Selector::css("input#matKhau"),
            ],
        );
        map.insert(
            "confirmPasswordInput",
            vec![
                Selector::test_id("confirm-password-input"),
                Selector::css("input[name=\"nhapLaiMatKhau\"]"),
                Selector::css("input#nhapLaiMatKhau"),
            ],
        );
        map.insert(
            "fullNameInput",
            vec![
                Selector::test_id("full-name-input"),
                Selector::css("input[name=\"hoTen\"]"),
                Selector::css("input#hoTen"),
                Selector::css("input[placeholder*=\"Họ tên\"]"),
            ],
        );
        map.insert(
            "emailInput",
            vec![
                Selector::test_id("email-input"),
                Selector::css("input[name=\"email\"]"),
                Selector::css("input#email"),
                Selector::css("input[type=\"email\"]"),
            ],
        );
        map.insert(
            "registerButton",
            vec![
                Selector::test_id("register-submit"),
                Selector::css("button[type=\"submit\"]"),
                Selector::text("Đăng ký"),
            ],
        );
        map.insert(
            "loginLink",
            vec![
                Selector::test_id("login-link"),
                Selector::css("a[href*=\"sign-in\"]"),
                Selector::css("a[href*=\"login\"]"),
                Selector::text("Đăng nhập"),
            ],
        );
        map.insert(
            "errorMessage",
            vec![
                Selector::test_id("register-error"),
                Selector::css(".error"),
                Selector::css(".text-danger"),
                Selector::css(".invalid-feedback"),
            ],
        );
        map.insert(
            "usernameError",
            vec![
                Selector::css("input[name=\"taiKhoan\"] ~ .error"),
                Selector::css("input[name=\"taiKhoan\"] + .error"),
            ],
        );
        map.insert(
            "passwordError",
            vec![
                Selector::css("input[name=\"matKhau\"] ~ .error"),
                Selector::css("input[name=\"matKhau\"] + .error"),
            ],
        );
        map.insert(
            "confirmPasswordError",
            vec![Selector::css("input[name=\"nhapLaiMatKhau\"] ~ .error")],
        );
        map.insert(
            "fullNameError",
            vec![
                Selector::css("input[name=\"hoTen\"] ~ .error"),
                Selector::css("input[name=\"hoTen\"] + .error"),
            ],
        );
        map.insert(
            "emailError",
            vec![
                Selector::css("input[name=\"email\"] ~ .error"),
                Selector::css("input[name=\"email\"] + .error"),
            ],
        );
        map.insert(
            "successMessage",
            vec![
                Selector::css(".success"),
                Selector::css(".alert-success"),
            ],
        );
        map.insert(
            "formTitle",
            vec![
                Selector::css("h1"),
                Selector::css("h2"),
                Selector::css(".title"),
            ],
        );

        map
    }

    /// The underlying session
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Navigate to the registration page
    pub async fn open(&self) -> Result<()> {
        self.session.navigate(REGISTER_PATH).await
    }

    /// Fill the registration form, skipping empty fields
    #[instrument(skip(self, data))]
    pub async fn fill_form(&self, data: &RegistrationData) -> Result<()> {
        let fields = [
            ("usernameInput", &data.username),
            ("passwordInput", &data.password),
            ("confirmPasswordInput", &data.confirm_password),
            ("fullNameInput", &data.full_name),
            ("emailInput", &data.email),
        ];

        for (field, value) in fields {
            if !value.is_empty() {
                self.session.fill(self.selectors.get(field)?, value).await?;
            }
        }

        Ok(())
    }

    /// Click the register button
    pub async fn submit(&self) -> Result<()> {
        self.session
            .click(self.selectors.get("registerButton")?)
            .await
    }

    /// Run the full registration flow
    pub async fn register(&self, data: &RegistrationData) -> Result<()> {
        self.fill_form(data).await?;
        self.submit().await
    }

    /// Whether the current location is the registration page
    pub async fn is_on_register_page(&self) -> Result<bool> {
        let url = self.session.current_url().await?;
        Ok(url.contains("sign-up") || url.contains("register") || url.contains("dang-ky"))
    }

    /// Whether the submit redirected to the login page
    pub async fn is_registration_successful(&self) -> Result<bool> {
        self.session.settle().await;
        let url = self.session.current_url().await?;
        Ok(url.contains("sign-in") || url.contains("login") || url.contains("dang-nhap"))
    }

    /// Error text attached to a field, "" when absent
    ///
    /// Fields: "username", "password", "confirmPassword", "fullName", "email".
    pub async fn field_error(&self, field: &str) -> String {
        let Ok(entry) = self.selectors.error_entry(field) else {
            return String::new();
        };
        self.session.optional_text(entry, None).await
    }

    /// Whether a field currently shows an error; never fails
    pub async fn has_field_error(&self, field: &str) -> bool {
        let Ok(entry) = self.selectors.error_entry(field) else {
            return false;
        };
        self.session.is_visible(entry).await
    }

    /// Page-level registration error text, "" when none appears in time
    pub async fn register_error(&self) -> String {
        let Ok(entry) = self.selectors.get("errorMessage") else {
            return String::new();
        };
        self.session.optional_text(entry, None).await
    }

    /// Success banner text, "" when none appears in time
    pub async fn success_message(&self) -> String {
        let Ok(entry) = self.selectors.get("successMessage") else {
            return String::new();
        };
        self.session.optional_text(entry, None).await
    }

    /// Follow the login link
    pub async fn open_login(&self) -> Result<()> {
        self.session.click(self.selectors.get("loginLink")?).await
    }

    /// Heading text of the registration form
    pub async fn form_title(&self) -> Result<String> {
        self.session.read_text(self.selectors.get("formTitle")?).await
    }
}
