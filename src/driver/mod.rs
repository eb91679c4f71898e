//! Browser driver capability layer
//!
//! Defines the abstract driver interface the page layer is written against,
//! plus the two implementations: a Chrome DevTools Protocol driver and an
//! in-memory mock for tests.

pub mod traits;
pub mod types;
pub mod scripts;
pub mod connection;
pub mod cdp;
pub mod mock;

pub use cdp::CdpDriver;
pub use mock::MockDriver;
pub use traits::{BrowserDriver, Cookie, Selector};
