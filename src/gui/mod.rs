//! GUI module - Chart viewer window and display modes

mod app;
mod chart_viewer;

pub use app::{display, DisplayMode};
pub use chart_viewer::ChartViewer;
