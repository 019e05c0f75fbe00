//! Dashboard capture
//!
//! Waits for render completion, then rasterizes the dashboard container and
//! each contained widget, in document order.

mod dashboard;

pub use dashboard::{
    dashboard_file, run, widget_file, CaptureSummary, DASHBOARD_SELECTOR, WIDGET_SELECTOR,
};
