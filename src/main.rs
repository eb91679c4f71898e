//! Smoke-test entry point
//!
//! Connects to a running Chrome instance over CDP, drives the login flow of
//! the target application and reports the outcome. Meant as a quick liveness
//! check against a deployed frontend; the real scenario coverage lives in the
//! test suite.
//!
//! Environment variables:
//! - `AUTHFLOW_BASE_URL`: application under test (default: http://localhost:3000)
//! - `AUTHFLOW_CDP_ENDPOINT`: CDP endpoint (default: ws://localhost:9222)
//! - `AUTHFLOW_USERNAME` / `AUTHFLOW_PASSWORD`: credentials for the smoke login
//! - `RUST_LOG`: log level (default: info)

use anyhow::Context;
use authflow::config::Config;
use authflow::driver::{BrowserDriver, CdpDriver};
use authflow::page::{HomePage, LoginCredentials, LoginPage, PageSession};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    info!("authflow smoke v{}", authflow::VERSION);

    let config = Config::from_env().context("loading configuration from environment")?;
    info!(
        "configuration loaded: base_url={}, cdp_endpoint={}",
        config.base_url, config.cdp_endpoint
    );

    let username = std::env::var("AUTHFLOW_USERNAME").unwrap_or_else(|_| "Hảo".to_string());
    let password = std::env::var("AUTHFLOW_PASSWORD").unwrap_or_else(|_| "123456".to_string());

    let driver = CdpDriver::open_tab(&config.cdp_endpoint)
        .await
        .context("attaching to the browser")?;
    driver
        .set_viewport(config.viewport_width, config.viewport_height)
        .await?;
    let driver: Arc<dyn BrowserDriver> = Arc::new(driver);
    info!("browser tab opened");

    let session = PageSession::new(driver.clone(), config.clone());
    let login = LoginPage::with_session(session.clone());

    login.open().await?;
    info!("login page loaded: {}", session.current_url().await?);

    login
        .login(&LoginCredentials::new(username.clone(), password))
        .await?;

    if login.is_login_successful().await? {
        info!("login succeeded for '{}'", username);

        let home = HomePage::with_session(session.clone());
        if home.is_user_logged_in().await {
            let report = home.logout().await?;
            info!("logout completed, confirmation: {:?}", report.confirmation);
        }
    } else {
        let message = login.login_error().await;
        error!("login failed for '{}': {}", username, message);
        let shot = session.screenshot("smoke-login-failure").await?;
        error!("screenshot saved to {}", shot.display());
    }

    driver.close().await?;
    info!("smoke run complete");
    Ok(())
}
