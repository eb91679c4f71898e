//! Login page object
//!
//! Wraps the `/sign-in` page of the target application. Selector fallbacks
//! prefer stable test ids, then the structural name/id attributes of the
//! Vietnamese-language UI, then display text.

use super::selector::SelectorMap;
use super::session::PageSession;
use super::LoginCredentials;
use crate::config::Config;
use crate::driver::{BrowserDriver, Selector};
use crate::Result;
use std::sync::Arc;
use tracing::instrument;

/// Path of the login page
const LOGIN_PATH: &str = "/sign-in";

/// Page object for the login page
#[derive(Debug)]
pub struct LoginPage {
    session: PageSession,
    selectors: SelectorMap,
}

impl LoginPage {
    /// Create a login page over a fresh session on the given tab
    pub fn new(driver: Arc<dyn BrowserDriver>, config: Config) -> Self {
        Self::with_session(PageSession::new(driver, config))
    }

    /// Create a login page over an existing session
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
                Selector::css("input[type=\"password\"]"),
            ],
        );
        map.insert(
            "rememberMeCheckbox",
            vec![
                Selector::test_id("remember-me"),
                Selector::css("input[name=\"rememberMe\"]"),
                Selector::css("input[type=\"checkbox\"]"),
            ],
        );
        map.insert(
            "loginButton",
            vec![
                Selector::test_id("login-submit"),
                Selector::css("button[type=\"submit\"]"),
                Selector::text("Đăng nhập"),
            ],
        );
        map.insert(
            "registerLink",
            vec![
                Selector::test_id("register-link"),
                Selector::css("a[href*=\"sign-up\"]"),
                Selector::css("a[href*=\"register\"]"),
                Selector::text("Đăng ký"),
            ],
        );
        map.insert(
            "forgotPasswordLink",
            vec![
                Selector::test_id("forgot-password-link"),
                Selector::css("a[href*=\"forgot-password\"]"),
                Selector::text("Quên mật khẩu"),
            ],
        );
        map.insert(
            "errorMessage",
            vec![
                Selector::test_id("login-error"),
                Selector::css(".error"),
                Selector::css(".text-danger"),
                Selector::css(".alert-danger"),
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
            "passwordToggle",
            vec![
                Selector::test_id("password-toggle"),
                Selector::css(".password-toggle"),
                Selector::css("button[aria-label*=\"password\"]"),
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

    /// Navigate to the login page
    pub async fn open(&self) -> Result<()> {
        self.session.navigate(LOGIN_PATH).await
    }

    /// Run the login flow: fill credentials, toggle remember-me, submit
    ///
    /// Empty username or password fields are left untouched so validation
    /// scenarios can submit partially filled forms.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<()> {
        if !credentials.username.is_empty() {
            self.session
                .fill(self.selectors.get("usernameInput")?, &credentials.username)
                .await?;
        }
        if !credentials.password.is_empty() {
            self.session
                .fill(self.selectors.get("passwordInput")?, &credentials.password)
                .await?;
        }

        if credentials.remember_me {
            self.session
                .click(self.selectors.get("rememberMeCheckbox")?)
                .await?;
        }

        self.session.click(self.selectors.get("loginButton")?).await
    }

    /// Whether the submit left the login page
    ///
    /// Waits the settle delay, then classifies the location: success means
    /// the URL no longer contains "sign-in" or "login".
    pub async fn is_login_successful(&self) -> Result<bool> {
        self.session.settle().await;
        let url = self.session.current_url().await?;
        Ok(!url.contains("sign-in") && !url.contains("login"))
    }

    /// Whether the current location is the login page
    pub async fn is_on_login_page(&self) -> Result<bool> {
        let url = self.session.current_url().await?;
        Ok(url.contains("sign-in") || url.contains("login"))
    }

    /// Page-level login error text, "" when none appears in time
    pub async fn login_error(&self) -> String {
        let Ok(entry) = self.selectors.get("errorMessage") else {
            return String::new();
        };
        self.session.optional_text(entry, None).await
    }

    /// Error text attached to a field ("username", "password"), "" when absent
    pub async fn field_error(&self, field: &str) -> String {
        let Ok(entry) = self.selectors.error_entry(field) else {
            return String::new();
        };
        self.session.optional_text(entry, None).await
    }

    /// Follow the register link
    pub async fn open_register(&self) -> Result<()> {
        self.session.click(self.selectors.get("registerLink")?).await
    }

    /// Follow the forgot-password link
    pub async fn open_forgot_password(&self) -> Result<()> {
        self.session
            .click(self.selectors.get("forgotPasswordLink")?)
            .await
    }

    /// Click the password visibility toggle
    pub async fn toggle_password_visibility(&self) -> Result<()> {
        self.session
            .click(self.selectors.get("passwordToggle")?)
            .await
    }

    /// Whether the password input currently shows its text
    pub async fn is_password_visible(&self) -> Result<bool> {
        let value = self
            .session
            .attribute(self.selectors.get("passwordInput")?, "type")
            .await?;
        Ok(value.as_deref() == Some("text"))
    }

    /// Submit the form with the Enter key instead of the button
    pub async fn submit_with_enter(&self) -> Result<()> {
        self.session.press_key("Enter").await
    }

    /// Focus a form field ("username", "password")
    pub async fn focus_field(&self, field: &str) -> Result<()> {
        self.session
            .focus(self.selectors.get(&format!("{}Input", field))?)
            .await
    }

    /// Hover a form field ("username", "password")
    pub async fn hover_field(&self, field: &str) -> Result<()> {
        self.session
            .hover(self.selectors.get(&format!("{}Input", field))?)
            .await
    }

    /// Heading text of the login form
    pub async fn form_title(&self) -> Result<String> {
        self.session.read_text(self.selectors.get("formTitle")?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::{MockDriver, MockElement};

    fn fast_config() -> Config {
        Config {
            base_url: "http://localhost:3000".to_string(),
            default_timeout_ms: 300,
            error_wait_ms: 200,
            settle_delay_ms: 10,
            ..Config::default()
        }
    }

    /// Bare sign-in form, no submit behavior. Flow outcomes (credential
    /// checks, error boxes) are exercised by the scenario tests in `tests/`.
    fn sign_in_form() -> MockDriver {
        let driver = MockDriver::new();
        driver.add_element(MockElement::new([Selector::css("input[name=\"taiKhoan\"]")]));
        driver.add_element(
            MockElement::new([Selector::css("input[name=\"matKhau\"]")])
                .attribute("type", "password"),
        );
        driver.add_element(MockElement::new([Selector::css("button[type=\"submit\"]")]));
        driver
    }

    fn page_over(driver: MockDriver) -> LoginPage {
        LoginPage::new(Arc::new(driver), fast_config())
    }

    #[tokio::test]
    async fn test_open_navigates_to_sign_in() {
        let page = page_over(sign_in_form());
        page.open().await.unwrap();
        assert!(page.is_on_login_page().await.unwrap());
        assert_eq!(
            page.session().current_url().await.unwrap(),
            "http://localhost:3000/sign-in"
        );
    }

    #[tokio::test]
    async fn test_login_error_empty_without_error_element() {
        let page = page_over(sign_in_form());
        page.open().await.unwrap();

        assert_eq!(page.login_error().await, "");
    }

    #[tokio::test]
    async fn test_empty_fields_are_not_filled() {
        let driver = Arc::new(sign_in_form());
        let page = LoginPage::new(driver.clone(), fast_config());
        page.open().await.unwrap();

        page.login(&LoginCredentials::new("", "123456")).await.unwrap();

        let username = Selector::css("input[name=\"taiKhoan\"]");
        let password = Selector::css("input[name=\"matKhau\"]");
        driver.with_state(|s| {
            assert_eq!(s.filled_value(&username), None);
            assert_eq!(s.filled_value(&password), Some("123456".to_string()));
        });
    }

    #[tokio::test]
    async fn test_password_visibility_toggle() {
        let driver = sign_in_form();
        let toggle = Selector::css(".password-toggle");
        let password = Selector::css("input[name=\"matKhau\"]");
        driver.add_element(MockElement::new([toggle.clone()]));
        driver.on_click(toggle, move |state| {
            state.set_attribute(&password, "type", "text");
        });

        let page = page_over(driver);
        page.open().await.unwrap();

        assert!(!page.is_password_visible().await.unwrap());
        page.toggle_password_visibility().await.unwrap();
        assert!(page.is_password_visible().await.unwrap());
    }

    #[tokio::test]
    async fn test_submit_with_enter_presses_key() {
        let driver = Arc::new(sign_in_form());
        let page = LoginPage::new(driver.clone(), fast_config());
        page.open().await.unwrap();

        page.submit_with_enter().await.unwrap();

        let keys = driver.with_state(|s| s.pressed_keys.clone());
        assert_eq!(keys, vec!["Enter".to_string()]);
    }
}
