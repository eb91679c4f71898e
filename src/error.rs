//! Unified error types for Authflow

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Authflow
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket errors
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol errors
    #[error("CDP error: {0}")]
    Cdp(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No expression in a selector fallback list matched the live document
    #[error("selector unresolved for field '{field}', tried: {tried:?}")]
    SelectorUnresolved {
        /// Logical field name from the selector map
        field: String,
        /// Expressions tried, in declared order
        tried: Vec<String>,
    },

    /// Unknown logical field name for a page variant
    #[error("unknown selector field: {0}")]
    UnknownField(String),

    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Timeout
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Navigation failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Test-data store error
    #[error("Test-data store error: {0}")]
    DataStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new WebSocket error
    pub fn websocket<S: Into<String>>(msg: S) -> Self {
        Error::WebSocket(msg.into())
    }

    /// Create a new CDP error
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// Create a new selector resolution error
    pub fn selector_unresolved<S: Into<String>>(field: S, tried: Vec<String>) -> Self {
        Error::SelectorUnresolved {
            field: field.into(),
            tried,
        }
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(id: S) -> Self {
        Error::ElementNotFound(id.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new navigation error
    pub fn navigation<S: Into<String>>(msg: S) -> Self {
        Error::Navigation(msg.into())
    }

    /// Create a new test-data store error
    pub fn data_store<S: Into<String>>(msg: S) -> Self {
        Error::DataStore(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// True for failures that resolution-tolerant verbs collapse into defaults
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Error::SelectorUnresolved { .. }
                | Error::ElementNotFound(_)
                | Error::Timeout(_)
                | Error::UnknownField(_)
        )
    }
}
