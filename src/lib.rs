//! Authflow: page-object browser automation for authentication flow testing
//!
//! This library wraps a browser driver capability (Chrome DevTools Protocol or
//! an in-memory mock) behind a uniform, timeout-bounded page vocabulary, and
//! builds the login/register/home page objects of the target application on
//! top of it.

pub mod error;
pub mod config;

pub mod driver;
pub mod page;
pub mod testdata;
pub mod util;

// Re-exports
pub use error::{Error, Result};

/// Authflow library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
