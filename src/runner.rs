//! Capture run orchestration
//!
//! One run moves through launch, authenticate, capture, close. A failure in
//! any phase skips the rest but still closes the session: the phase result is
//! captured first, `close` runs unconditionally, and the phase error wins
//! over any close error.

use chromiumoxide::Page;

use crate::browser::BrowserSession;
use crate::capture::{self, CaptureSummary};
use crate::core::config::AwiConfig;
use crate::core::error::Result;
use crate::login::LoginStrategy;

/// Run one full capture: login to the AWI and screenshot the configured
/// dashboard plus each of its widgets.
pub async fn run_capture(config: &AwiConfig) -> Result<CaptureSummary> {
    let mut session = BrowserSession::launch(config).await?;
    let outcome = drive(session.page(), config).await;
    let closed = session.close().await;

    let summary = outcome?;
    closed?;
    Ok(summary)
}

async fn drive(page: &Page, config: &AwiConfig) -> Result<CaptureSummary> {
    let strategy = LoginStrategy::for_version(config.version);
    strategy.authenticate(page, config).await?;
    println!("Login done, loading dashboard now...");
    capture::run(page, config).await
}
