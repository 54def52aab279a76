//! Chart Viewer Window
//! Shows a `BarFigure` interactively using egui_plot.

use crate::charts::{BarFigure, Rgb};
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar as PlotBar, BarChart, Plot, PlotPoint, Text};

/// Bar width in category units.
const BAR_WIDTH: f64 = 0.8;

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// Format an x-axis grid mark as its category label.
///
/// Marks between categories get no label.
pub fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Single-figure viewer application.
pub struct ChartViewer {
    figure: BarFigure,
}

impl ChartViewer {
    pub fn new(figure: BarFigure) -> Self {
        Self { figure }
    }

    /// Draw the bar chart with its annotations.
    pub fn show(&self, ui: &mut egui::Ui) {
        let figure = &self.figure;
        let labels: Vec<String> = figure.bars.iter().map(|b| b.label.clone()).collect();

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&figure.title).strong().size(18.0));
        });

        Plot::new("top_sales_by_year")
            .x_axis_label(figure.x_label.clone())
            .y_axis_label(figure.y_label.clone())
            .include_y(0.0)
            .include_y(figure.y_max())
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                let bars: Vec<PlotBar> = figure
                    .bars
                    .iter()
                    .enumerate()
                    .map(|(i, bar)| {
                        PlotBar::new(i as f64, bar.height)
                            .width(BAR_WIDTH)
                            .fill(Color32::from(bar.color))
                            .name(&bar.label)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));

                for (i, bar) in figure.bars.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, bar.annotation_y()),
                            RichText::new(&bar.annotation)
                                .size(figure.annotation_font_size as f32 + 2.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(Color32::BLACK),
                    );
                }
            });
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_on_category_centers() {
        let labels = vec!["2008".to_string(), "2009".to_string()];
        assert_eq!(category_label(&labels, 0.0), "2008");
        assert_eq!(category_label(&labels, 1.0), "2009");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn colors_convert_to_egui() {
        assert_eq!(Color32::from(Rgb(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
