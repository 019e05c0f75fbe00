//! Browser session management
//!
//! Owns the headless chromium process driven over the Chrome DevTools
//! Protocol for the duration of one capture run.

mod session;

pub use session::{wait_for_element, BrowserSession, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
