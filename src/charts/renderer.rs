//! Static Chart Renderer
//! Draws a `BarFigure` to PNG with the plotters bitmap backend.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. One filled bar per category, colored per bar
//! 3. Vertical text annotation just above each bar
//! 4. Axis descriptions and rotated category ticks

use super::figure::{BarFigure, Rgb};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;
use tracing::info;

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 22.0;
const TICK_SIZE: f64 = 14.0;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No bars to plot")]
    Empty,
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
    #[error("Chart viewer failed: {0}")]
    Viewer(String),
    #[error("Failed to open chart: {0}")]
    Open(#[from] std::io::Error),
}

fn drawing<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Closest quarter-turn text transform for a counter-clockwise angle in degrees.
pub fn quarter_turn(degrees: f64) -> FontTransform {
    match ((degrees / 90.0).round() as i64).rem_euclid(4) {
        1 => FontTransform::Rotate270,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate90,
        _ => FontTransform::None,
    }
}

/// Category axis range for `n` bars.
///
/// Integer ranges in plotters are inclusive, so `0..n - 1` yields exactly `n` segments.
/// A single-value range maps every point to one pixel, so one bar keeps `0..1`.
pub fn category_range(n: usize) -> std::ops::Range<usize> {
    0..n.saturating_sub(1).max(1)
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the figure to a PNG file.
    ///
    /// The drawing area lives for this call only and is presented before returning.
    pub fn render_png(figure: &BarFigure, path: &Path) -> Result<(), ChartError> {
        if figure.bars.is_empty() {
            return Err(ChartError::Empty);
        }

        let root = BitMapBackend::new(path, figure.size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let n = figure.bars.len();
        let labels: Vec<&str> = figure.bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, (FONT, TITLE_SIZE))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(category_range(n).into_segmented(), 0f64..figure.y_max())
            .map_err(drawing)?;

        let tick_style = TextStyle::from((FONT, TICK_SIZE).into_font())
            .transform(quarter_turn(figure.x_tick_rotation));
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_style(tick_style)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => {
                    labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
                }
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
                let color: RGBColor = bar.color.into();
                let mut rect = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), bar.height),
                    ],
                    color.filled(),
                );
                rect.set_margin(0, 0, 8, 8);
                rect
            }))
            .map_err(drawing)?;

        // Vertical text reads upward from the anchor, centered on the bar.
        let annotation_style = TextStyle::from((FONT, figure.annotation_font_size).into_font())
            .transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(figure.bars.iter().enumerate().map(|(i, bar)| {
                Text::new(
                    bar.annotation.clone(),
                    (SegmentValue::CenterOf(i), bar.annotation_y()),
                    annotation_style.clone(),
                )
            }))
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        info!("chart written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::{TAB20, X_LABEL, Y_LABEL};
    use plotters::coord::ranged1d::DiscreteRanged;
    use plotters::coord::types::RangedCoordusize;

    #[test]
    fn category_axis_has_one_slot_per_bar() {
        for n in [2, 3, 10] {
            let axis: RangedCoordusize = category_range(n).into();
            assert_eq!(axis.size(), n);
        }
        let single: RangedCoordusize = category_range(1).into();
        assert_eq!(single.size(), 2);
    }

    #[test]
    fn rotation_rounds_to_quarter_turns() {
        assert!(matches!(quarter_turn(0.0), FontTransform::None));
        assert!(matches!(quarter_turn(30.0), FontTransform::None));
        assert!(matches!(quarter_turn(45.0), FontTransform::Rotate270));
        assert!(matches!(quarter_turn(90.0), FontTransform::Rotate270));
        assert!(matches!(quarter_turn(180.0), FontTransform::Rotate180));
        assert!(matches!(quarter_turn(-90.0), FontTransform::Rotate90));
    }

    #[test]
    fn palette_colors_convert_to_plotters() {
        let color: RGBColor = TAB20[0].into();
        assert_eq!((color.0, color.1, color.2), (31, 119, 180));
    }

    #[test]
    fn empty_figure_is_rejected_before_drawing() {
        let figure = BarFigure {
            title: "t".to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            bars: Vec::new(),
            size: (100, 100),
            x_tick_rotation: 45.0,
            annotation_font_size: 10.0,
        };
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.png");

        let err = ChartRenderer::render_png(&figure, &path).unwrap_err();
        assert!(matches!(err, ChartError::Empty));
        assert!(!path.exists());
    }
}
