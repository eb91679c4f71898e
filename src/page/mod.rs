//! Page abstraction layer
//!
//! [`PageSession`](session::PageSession) provides the uniform verb vocabulary
//! over a browser driver; the variant modules ([`login`], [`register`],
//! [`home`]) specialize it with per-page selector maps and user-flow
//! operations.

pub mod selector;
pub mod session;

pub mod login;
pub mod register;
pub mod home;

pub use home::{HomePage, LogoutReport};
pub use login::LoginPage;
pub use register::RegisterPage;
pub use selector::SelectorMap;
pub use session::PageSession;

use serde::{Deserialize, Serialize};

/// Credentials for the login flow; call-scoped, never persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginCredentials {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Same credentials with the remember-me checkbox toggled on
    pub fn with_remember_me(mut self) -> Self {
        self.remember_me = true;
        self
    }
}

/// Input for the registration flow; call-scoped, never persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationData {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub email: String,
}

/// How an optional flow step ended
///
/// Optional UI affordances (e.g. a logout confirmation dialog) either appear
/// and get handled, or never appear and get skipped. An element that appeared
/// but could not be handled is an error, not an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The optional element appeared and the step ran against it
    Handled,
    /// The optional element never appeared within its wait; step skipped
    Skipped,
}
