//! Core module - shared infrastructure for awisnap
//!
//! Configuration assembly/validation and error handling used throughout the
//! application.

pub mod config;
pub mod error;

pub use config::{AeVersion, AwiConfig, CliOverrides, RawConfig};
pub use error::{AwiError, Result};
