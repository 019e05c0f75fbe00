//! Ordered dashboard and widget rasterization.
//!
//! The dashboard screenshot is always written before any widget screenshot,
//! and widget files are numbered contiguously from 0 in DOM discovery order.
//! All files land in the current working directory; re-runs overwrite.

use std::path::PathBuf;

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::{Element, Page};

use crate::browser::wait_for_element;
use crate::core::config::AwiConfig;
use crate::core::error::{AwiError, Result};

/// Dashboard container element.
pub const DASHBOARD_SELECTOR: &str = "div.uc4-dashboard-layout";

/// Widget containers nested under the dashboard: dashboard -> grid-slot ->
/// widget-container, in document order.
pub const WIDGET_SELECTOR: &str =
    "div.uc4-dashboard-layout > div.v-gridlayout-slot > div.v-widgetcontainer";

/// Files written by one capture run, dashboard first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSummary {
    pub dashboard_file: PathBuf,
    pub widget_files: Vec<PathBuf>,
}

pub fn dashboard_file(dashboard: &str) -> PathBuf {
    PathBuf::from(format!("{dashboard}.png"))
}

pub fn widget_file(dashboard: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{dashboard}_widget_{index}.png"))
}

/// Wait for the dashboard to render, then capture it and every widget.
///
/// If the container never appears this fails with `DashboardTimeout` and zero
/// files are produced. Zero widgets is a valid outcome (empty dashboard).
pub async fn run(page: &Page, config: &AwiConfig) -> Result<CaptureSummary> {
    let dashboard = wait_for_element(page, DASHBOARD_SELECTOR, config.element_wait())
        .await
        .ok_or(AwiError::DashboardTimeout {
            selector: DASHBOARD_SELECTOR,
            timeout_secs: config.element_timeout,
        })?;

    // Park the pointer in the corner so hover overlays cannot bleed into the
    // shots.
    park_pointer(page).await?;

    println!(
        "Dashboard loading, waiting {} sec for widget data before capturing",
        config.wait_for_widgets
    );
    tokio::time::sleep(config.widget_settle()).await;

    let dashboard_path = dashboard_file(&config.dashboard);
    save_png(&dashboard, &dashboard_path).await?;
    println!("Dashboard captured to {}", dashboard_path.display());

    let widgets = page.find_elements(WIDGET_SELECTOR).await.unwrap_or_default();
    let total = widgets.len();
    println!("Found {total} widgets, capturing...");

    let mut widget_files = Vec::with_capacity(total);
    for (index, widget) in widgets.iter().enumerate() {
        let path = widget_file(&config.dashboard, index);
        save_png(widget, &path).await?;
        println!("Widget {} / {total} done.", index + 1);
        widget_files.push(path);
    }

    Ok(CaptureSummary {
        dashboard_file: dashboard_path,
        widget_files,
    })
}

async fn save_png(element: &Element, path: &PathBuf) -> Result<()> {
    element
        .save_screenshot(CaptureScreenshotFormat::Png, path)
        .await
        .map_err(|e| AwiError::capture(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}

async fn park_pointer(page: &Page) -> Result<()> {
    let params = DispatchMouseEventParams::builder()
        .r#type(DispatchMouseEventType::MouseMoved)
        .x(0.0)
        .y(0.0)
        .build()
        .map_err(AwiError::capture)?;
    page.execute(params).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_file_name() {
        assert_eq!(dashboard_file("sales"), PathBuf::from("sales.png"));
    }

    #[test]
    fn test_widget_files_numbered_from_zero() {
        let files: Vec<_> = (0..3).map(|i| widget_file("sales", i)).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("sales_widget_0.png"),
                PathBuf::from("sales_widget_1.png"),
                PathBuf::from("sales_widget_2.png"),
            ]
        );
    }
}
