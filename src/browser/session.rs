//! Browser session lifecycle
//!
//! One session wraps one chromium process and one page, exclusively owned for
//! the run and never reused. The runner guarantees `close` runs on every exit
//! path; `Drop` aborts the CDP handler task as a backstop so a failed run
//! cannot leak the event loop.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::core::config::AwiConfig;
use crate::core::error::{AwiError, Result};

/// Fixed viewport: wide enough that dashboards lay out without scrollbars.
pub const VIEWPORT_WIDTH: u32 = 2560;
pub const VIEWPORT_HEIGHT: u32 = 1600;

/// Interval between DOM probes in [`wait_for_element`].
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A running headless browser with its single page.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Launch a sandboxless headless chromium with a fixed viewport.
    ///
    /// `--disable-setuid-sandbox` and `--disable-dev-shm-usage` keep the
    /// process alive inside containers, where /dev/shm is typically capped
    /// at 64MB.
    pub async fn launch(config: &AwiConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .viewport(Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
                device_scale_factor: Some(1.0),
                ..Viewport::default()
            });
        if let Some(path) = &config.browser_executable {
            builder = builder.chrome_executable(path.clone());
        }
        let browser_config = builder
            .build()
            .map_err(|e| AwiError::config(format!("invalid browser configuration: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });
        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// The single page this run drives. No other component mutates it.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser and release the OS process.
    pub async fn close(&mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// Bounded wait for a selector to appear.
///
/// chromiumoxide has no built-in selector wait, so this polls the DOM on a
/// fixed interval until the budget elapses. Returns `None` on timeout; the
/// caller maps the miss to its phase-specific error.
pub async fn wait_for_element(page: &Page, selector: &str, timeout: Duration) -> Option<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Some(element);
        }
        if Instant::now() >= deadline {
            return None;
        }
        sleep(POLL_INTERVAL).await;
    }
}
