//! Version-specific AWI login
//!
//! The v12.3 and v21 AWIs render structurally different login forms, so each
//! variant carries its own URL shape, selectors, and fill procedure.

mod strategy;

pub use strategy::LoginStrategy;
