//! Chart Display
//! Hands a rendered figure to a window or the system image viewer.

use crate::charts::{BarFigure, ChartError};
use crate::gui::ChartViewer;
use clap::ValueEnum;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// How the chart is shown after it has been saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Native window, blocks until it is closed
    Window,
    /// Open the saved PNG with the system default application
    Open,
    /// Headless: only save the PNG
    #[default]
    None,
}

/// Show the figure according to `mode`. `png` is the already rendered chart.
pub fn display(figure: &BarFigure, png: &Path, mode: DisplayMode) -> Result<(), ChartError> {
    match mode {
        DisplayMode::Window => run_viewer(figure),
        DisplayMode::Open => {
            info!("opening {}", png.display());
            open::that(png)?;
            Ok(())
        }
        DisplayMode::None => Ok(()),
    }
}

/// Run the viewer window until the user closes it.
pub fn run_viewer(figure: &BarFigure) -> Result<(), ChartError> {
    let (width, height) = figure.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_title(figure.title.clone()),
        ..Default::default()
    };

    info!("showing chart window");
    let viewer = ChartViewer::new(figure.clone());
    eframe::run_native(
        "vgsales_report",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| ChartError::Viewer(e.to_string()))
}
