//! awisnap - AWI dashboard screenshot capture
//!
//! Logs into an Automation Engine web interface (AWI), navigates to a named
//! dashboard, and writes one PNG for the dashboard plus one per widget.
//!
//! # Architecture
//!
//! - **Core**: configuration assembly/validation and error handling
//! - **Browser**: headless chromium session lifecycle (chromiumoxide)
//! - **Login**: version-specific login flows for the v12.3 and v21 AWIs
//! - **Capture**: render settle and ordered dashboard/widget rasterization
//! - **Runner**: one-run orchestration with guaranteed session release
//!
//! # Usage
//!
//! ```rust,no_run
//! use awisnap::{run_capture, CliOverrides, RawConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let overrides = CliOverrides {
//!         dashboard: Some("sales".to_string()),
//!         ..Default::default()
//!     };
//!     let config = RawConfig::resolve(&overrides)?.validate()?;
//!     let summary = run_capture(&config).await?;
//!     println!("{} widgets captured", summary.widget_files.len());
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod capture;
pub mod core;
pub mod login;
pub mod runner;

// Re-export commonly used items
pub use crate::capture::CaptureSummary;
pub use crate::core::{AeVersion, AwiConfig, AwiError, CliOverrides, RawConfig, Result};
pub use crate::runner::run_capture;
