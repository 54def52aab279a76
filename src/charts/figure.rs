//! Bar Figure Module
//! Explicit figure model for the yearly sales chart, shared by the PNG
//! renderer and the interactive viewer.

use crate::data::Table;
use crate::stats::YearTotal;
use std::collections::{HashMap, HashSet};

/// Plain RGB color, converted per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fallback bar color when a publisher has no palette entry.
pub const GRAY: Rgb = Rgb(128, 128, 128);

/// Qualitative 20-color palette (tab20).
pub const TAB20: [Rgb; 20] = [
    Rgb(31, 119, 180),  // Blue
    Rgb(174, 199, 232), // Light Blue
    Rgb(255, 127, 14),  // Orange
    Rgb(255, 187, 120), // Light Orange
    Rgb(44, 160, 44),   // Green
    Rgb(152, 223, 138), // Light Green
    Rgb(214, 39, 40),   // Red
    Rgb(255, 152, 150), // Light Red
    Rgb(148, 103, 189), // Purple
    Rgb(197, 176, 213), // Light Purple
    Rgb(140, 86, 75),   // Brown
    Rgb(196, 156, 148), // Light Brown
    Rgb(227, 119, 194), // Pink
    Rgb(247, 182, 210), // Light Pink
    Rgb(127, 127, 127), // Grey
    Rgb(199, 199, 199), // Light Grey
    Rgb(188, 189, 34),  // Olive
    Rgb(219, 219, 141), // Light Olive
    Rgb(23, 190, 207),  // Cyan
    Rgb(158, 218, 229), // Light Cyan
];

pub const X_LABEL: &str = "Year";
pub const Y_LABEL: &str = "Total Global Sales (in millions)";

/// Annotation offset above the bar top, in data units.
pub const ANNOTATION_OFFSET: f64 = 1.0;

/// Chart title for a chart of the `limit` strongest years.
pub fn chart_title(limit: usize) -> String {
    format!("Top {limit} Games by Global Sales (by Year)")
}

/// Pick the palette entry at fraction `position / total` of the palette.
pub fn tab20_at(position: usize, total: usize) -> Rgb {
    if total == 0 {
        return TAB20[0];
    }
    let idx = position * TAB20.len() / total;
    TAB20[idx.min(TAB20.len() - 1)]
}

/// Publisher to color assignment over the whole table.
#[derive(Debug, Clone, Default)]
pub struct PublisherPalette {
    colors: HashMap<String, Rgb>,
}

impl PublisherPalette {
    /// Assign colors to distinct publishers in first-seen row order.
    pub fn from_table(table: &Table) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let publishers: Vec<&str> = table
            .records()
            .iter()
            .filter_map(|r| r.publisher.as_deref())
            .filter(|p| seen.insert(*p))
            .collect();

        let total = publishers.len();
        let colors = publishers
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p.to_string(), tab20_at(i, total)))
            .collect();
        Self { colors }
    }

    /// Color for a publisher, gray when unassigned.
    pub fn color_for(&self, publisher: Option<&str>) -> Rgb {
        publisher
            .and_then(|p| self.colors.get(p))
            .copied()
            .unwrap_or(GRAY)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

/// One bar with its label and annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub height: f64,
    pub color: Rgb,
    pub annotation: String,
}

impl Bar {
    /// Data-space y position of the annotation baseline.
    pub fn annotation_y(&self) -> f64 {
        self.height + ANNOTATION_OFFSET
    }
}

/// Vertical bar chart over categorical labels.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    /// Pixel size of the rendered figure.
    pub size: (u32, u32),
    pub x_tick_rotation: f64,
    pub annotation_font_size: f64,
}

impl BarFigure {
    /// Chart of summed sales per year, bars in the order of `totals`.
    ///
    /// Color and annotation come from the first table row of each year.
    /// `limit` is the requested year count and only shapes the title.
    pub fn top_sales_by_year(
        table: &Table,
        totals: &[YearTotal],
        palette: &PublisherPalette,
        limit: usize,
    ) -> Self {
        let bars = totals
            .iter()
            .map(|total| {
                let first = table.first_with_year(total.year);
                Bar {
                    label: total.year.to_string(),
                    height: total.total_sales,
                    color: palette.color_for(first.and_then(|r| r.publisher.as_deref())),
                    annotation: first
                        .and_then(|r| r.name.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();

        Self {
            title: chart_title(limit),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            bars,
            size: (1000, 600),
            x_tick_rotation: 45.0,
            annotation_font_size: 10.0,
        }
    }

    /// Upper y bound that leaves room for the tallest annotation.
    pub fn y_max(&self) -> f64 {
        let top = self
            .bars
            .iter()
            .map(Bar::annotation_y)
            .fold(0.0_f64, f64::max);
        if top <= 0.0 {
            1.0
        } else {
            top * 1.15
        }
    }
}
