//! Shared fixtures for the flow tests
//!
//! Each fixture builds a mock page modelling one screen of the application,
//! with click effects wired the way the real frontend behaves.

#![allow(dead_code)]

use authflow::config::Config;
use authflow::driver::mock::{MockDriver, MockElement};
use authflow::driver::Selector;

pub const BASE_URL: &str = "http://localhost:3000";

/// Config with timeouts short enough for mock-backed tests
pub fn fast_config() -> Config {
    Config {
        base_url: BASE_URL.to_string(),
        default_timeout_ms: 300,
        error_wait_ms: 200,
        settle_delay_ms: 10,
        ..Config::default()
    }
}

/// Sign-in screen: credential inputs plus a submit button that validates
/// against the known account and either navigates home or raises an error.
pub fn sign_in_app() -> MockDriver {
    let driver = MockDriver::new();
    let username = Selector::css("input[name=\"taiKhoan\"]");
    let password = Selector::css("input[name=\"matKhau\"]");
    let submit = Selector::css("button[type=\"submit\"]");

    driver.add_element(MockElement::new([username.clone()]));
    driver.add_element(MockElement::new([password.clone()]).attribute("type", "password"));
    driver.add_element(MockElement::new([submit.clone()]));
    driver.add_element(MockElement::new([Selector::css("a[href*=\"sign-up\"]")]));

    driver.on_click(submit, move |state| {
        let user = state.filled_value(&username).unwrap_or_default();
        let pass = state.filled_value(&password).unwrap_or_default();

        if user == "Hảo" && pass == "123456" {
            state.url = format!("{}/", BASE_URL);
        } else {
            state.elements.push(
                MockElement::new([Selector::css(".error")])
                    .text("Tài khoản hoặc mật khẩu không đúng"),
            );
        }
    });

    driver
}

/// Sign-up screen: registration inputs plus a submit button that checks the
/// confirm-password field and either redirects to sign-in or flags the field.
pub fn sign_up_app() -> MockDriver {
    let driver = MockDriver::new();
    let password = Selector::css("input[name=\"matKhau\"]");
    let confirm = Selector::css("input[name=\"nhapLaiMatKhau\"]");
    let submit = Selector::css("button[type=\"submit\"]");

    for selector in [
        Selector::css("input[name=\"taiKhoan\"]"),
        password.clone(),
        confirm.clone(),
        Selector::css("input[name=\"hoTen\"]"),
        Selector::css("input[name=\"email\"]"),
    ] {
        driver.add_element(MockElement::new([selector]));
    }
    driver.add_element(MockElement::new([submit.clone()]));

    driver.on_click(submit, move |state| {
        let pass = state.filled_value(&password).unwrap_or_default();
        let conf = state.filled_value(&confirm).unwrap_or_default();

        if pass == conf && !pass.is_empty() {
            state.url = format!("{}/sign-in", BASE_URL);
        } else {
            state.elements.push(
                MockElement::new([Selector::css("input[name=\"nhapLaiMatKhau\"] ~ .error")])
                    .text("Mật khẩu không khớp"),
            );
        }
    });

    driver
}

/// Logged-in home screen. Clicking the avatar reveals the logout entry;
/// `with_confirmation` decides whether logout raises a dialog first.
pub fn logged_in_home(with_confirmation: bool) -> MockDriver {
    let driver = MockDriver::new();
    let avatar = Selector::css(".avatar");
    let logout = Selector::text("Đăng xuất");
    let confirm = Selector::text("Đồng ý");

    driver.add_element(MockElement::new([avatar.clone()]));
    driver.add_element(MockElement::new([Selector::css(".user-name")]).text("Hảo"));
    driver.add_element(MockElement::new([logout.clone()]).hidden());

    {
        let logout = logout.clone();
        driver.on_click(avatar, move |state| {
            state.show(&logout);
        });
    }

    if with_confirmation {
        driver.add_element(MockElement::new([confirm.clone()]).hidden());
        {
            let confirm = confirm.clone();
            driver.on_click(logout, move |state| {
                state.show(&confirm);
            });
        }
        driver.on_click(confirm, |state| {
            state.url = format!("{}/sign-in", BASE_URL);
        });
    } else {
        driver.on_click(logout, |state| {
            state.url = format!("{}/sign-in", BASE_URL);
        });
    }

    driver
}
