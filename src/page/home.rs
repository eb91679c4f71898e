//! Home page object
//!
//! The landing page doubles as the logged-in shell: avatar, user name and the
//! logout menu only exist once a session is established. Logout may or may
//! not raise a confirmation dialog, so the flow reports which branch ran.

use super::selector::SelectorMap;
use super::session::PageSession;
use super::StepOutcome;
use crate::config::Config;
use crate::driver::{BrowserDriver, Selector};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Path of the landing page
const HOME_PATH: &str = "/";

/// Page object for the landing page
#[derive(Debug)]
pub struct HomePage {
    session: PageSession,
    selectors: SelectorMap,
}

/// What the logout flow did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutReport {
    /// Whether a confirmation dialog appeared and was accepted
    pub confirmation: StepOutcome,
}

impl HomePage {
    /// Create a home page over a fresh session on the given tab
    pub fn new(driver: Arc<dyn BrowserDriver>, config: Config) -> Self {
        Self::with_session(PageSession::new(driver, config))
    }

    /// Create a home page over an existing session
    pub fn with_session(session: PageSession) -> Self {
        Self {
            session,
            selectors: Self::selector_map(),
        }
    }

    fn selector_map() -> SelectorMap {
        let mut map = SelectorMap::new();

        map.insert(
            "loginButton",
            vec![
                Selector::test_id("nav-login"),
                Selector::css("a[href*=\"sign-in\"]"),
                Selector::text("Đăng nhập"),
            ],
        );
        map.insert(
            "registerButton",
            vec![
                Selector::test_id("nav-register"),
                Selector::css("a[href*=\"sign-up\"]"),
                Selector::text("Đăng ký"),
            ],
        );
        map.insert(
            "userAvatar",
            vec![
                Selector::test_id("user-avatar"),
                Selector::css(".avatar"),
                Selector::css("[class*=\"avatar\"]"),
            ],
        );
        map.insert(
            "userName",
            vec![
                Selector::test_id("user-name"),
                Selector::css(".user-name"),
                Selector::css("[class*=\"username\"]"),
            ],
        );
        map.insert(
            "logoutButton",
            vec![
                Selector::test_id("logout-button"),
                Selector::css("[class*=\"logout\"]"),
                Selector::text("Đăng xuất"),
            ],
        );
        map.insert(
            "logoutConfirmButton",
            vec![
                Selector::test_id("logout-confirm"),
                Selector::text("Đồng ý"),
                Selector::text("OK"),
            ],
        );
        map.insert(
            "logoutModal",
            vec![
                Selector::test_id("logout-modal"),
                Selector::css(".modal"),
                Selector::css("[role=\"dialog\"]"),
            ],
        );
        map.insert(
            "profileLink",
            vec![
                Selector::test_id("profile-link"),
                Selector::css("a[href*=\"profile\"]"),
            ],
        );

        map
    }

    /// The underlying session
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// Navigate to the landing page
    pub async fn open(&self) -> Result<()> {
        self.session.navigate(HOME_PATH).await
    }

    /// Follow the navigation link to the login page
    pub async fn open_login(&self) -> Result<()> {
        self.session.click(self.selectors.get("loginButton")?).await
    }

    /// Follow the navigation link to the registration page
    pub async fn open_register(&self) -> Result<()> {
        self.session
            .click(self.selectors.get("registerButton")?)
            .await
    }

    /// Whether a user session is active, judged by the avatar; never fails
    pub async fn is_user_logged_in(&self) -> bool {
        let Ok(entry) = self.selectors.get("userAvatar") else {
            return false;
        };
        self.session.is_visible(entry).await
    }

    /// Displayed name of the logged-in user
    pub async fn user_name(&self) -> Result<String> {
        self.session.read_text(self.selectors.get("userName")?).await
    }

    /// Run the logout flow
    ///
    /// Opens the avatar menu, clicks logout, then accepts the confirmation
    /// dialog when one appears. A missing dialog is the normal fast path and
    /// is reported as [`StepOutcome::Skipped`]; a dialog that appeared but
    /// could not be accepted is an error.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<LogoutReport> {
        self.session.click(self.selectors.get("userAvatar")?).await?;
        self.session
            .click(self.selectors.get("logoutButton")?)
            .await?;

        let confirmation = self
            .session
            .try_optional_click(self.selectors.get("logoutConfirmButton")?)
            .await?;
        debug!(?confirmation, "logout submitted");

        self.session.settle().await;
        Ok(LogoutReport { confirmation })
    }

    /// Follow the profile link
    pub async fn open_profile(&self) -> Result<()> {
        self.session.click(self.selectors.get("profileLink")?).await
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

    /// Minimal logged-in shell: avatar and user name, no logout wiring.
    /// Both logout branches are covered by the scenario tests in `tests/`.
    fn logged_in_shell() -> MockDriver {
        let driver = MockDriver::new();
        driver.add_element(MockElement::new([Selector::css(".avatar")]));
        driver.add_element(MockElement::new([Selector::css(".user-name")]).text("Hảo"));
        driver
    }

    #[tokio::test]
    async fn test_logged_in_detection() {
        let page = HomePage::new(Arc::new(logged_in_shell()), fast_config());
        page.open().await.unwrap();

        assert!(page.is_user_logged_in().await);
        assert_eq!(page.user_name().await.unwrap(), "Hảo");
    }

    #[tokio::test]
    async fn test_logged_out_detection() {
        let driver = MockDriver::new();
        driver.add_element(MockElement::new([Selector::text("Đăng nhập")]));
        let page = HomePage::new(Arc::new(driver), fast_config());
        page.open().await.unwrap();

        assert!(!page.is_user_logged_in().await);
    }
}
