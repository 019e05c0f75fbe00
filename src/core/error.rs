//! Custom error types for awisnap
//!
//! One taxonomy for the whole capture pipeline. Every variant carries the
//! phase and selector (or file) context needed to diagnose AWI UI-contract
//! drift from the message alone.

use thiserror::Error;

/// Main error type for awisnap operations
#[derive(Error, Debug)]
pub enum AwiError {
    /// A required configuration field is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The version-specific login marker did not appear within the wait budget
    #[error("Navigation timeout during {phase}: '{selector}' did not appear within {timeout_secs}s")]
    NavigationTimeout {
        phase: &'static str,
        selector: &'static str,
        timeout_secs: u64,
    },

    /// The login submit control (or a required login field) is missing
    #[error("Login control not found: {0}")]
    LoginControlNotFound(String),

    /// The dashboard container did not appear within the wait budget
    #[error("Dashboard timeout: '{selector}' did not appear within {timeout_secs}s")]
    DashboardTimeout {
        selector: &'static str,
        timeout_secs: u64,
    },

    /// A screenshot could not be written
    #[error("Capture error: {0}")]
    Capture(String),

    /// Browser engine errors
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for awisnap operations
pub type Result<T> = std::result::Result<T, AwiError>;

impl AwiError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a login-control error
    pub fn login_control(msg: impl Into<String>) -> Self {
        Self::LoginControlNotFound(msg.into())
    }

    /// Create a capture error
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }
}
