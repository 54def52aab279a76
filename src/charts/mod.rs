//! Charts module - Figure model and chart rendering

mod figure;
mod renderer;

pub use figure::{BarFigure, PublisherPalette, Rgb};
pub use renderer::{ChartError, ChartRenderer};
