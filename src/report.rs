//! Text Report Module
//! Prints null counts and aggregate tables, rendered as Polars DataFrames.

use crate::data::NullCount;
use crate::stats::{TopGame, YearTotal};
use polars::prelude::*;
use std::io::Write;
use thiserror::Error;

/// Rows shown per aggregate table.
pub const DEFAULT_HEAD_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build report table: {0}")]
    Table(#[from] PolarsError),
}

/// Writes the analysis tables to any output stream.
pub struct Reporter<W: Write> {
    out: W,
    head_rows: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, head_rows: usize) -> Self {
        Self { out, head_rows }
    }

    /// Print missing values per column.
    pub fn null_counts(&mut self, heading: &str, counts: &[NullCount]) -> Result<(), ReportError> {
        let df = DataFrame::new(vec![
            Column::new(
                "column".into(),
                counts.iter().map(|c| c.column.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "missing".into(),
                counts.iter().map(|c| c.nulls as u64).collect::<Vec<_>>(),
            ),
        ])?;
        writeln!(self.out, "{heading}\n{df}")?;
        Ok(())
    }

    /// Print the first rows of a best-seller table keyed by `key_name`.
    pub fn top_games(
        &mut self,
        heading: &str,
        key_name: &str,
        games: &[TopGame],
    ) -> Result<(), ReportError> {
        let shown = &games[..games.len().min(self.head_rows)];
        let df = DataFrame::new(vec![
            Column::new(
                key_name.into(),
                shown.iter().map(|g| g.key).collect::<Vec<_>>(),
            ),
            Column::new(
                "name".into(),
                shown.iter().map(|g| g.name.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "global_sales".into(),
                shown.iter().map(|g| g.global_sales).collect::<Vec<_>>(),
            ),
        ])?;
        writeln!(self.out, "\n{heading}\n{df}")?;
        Ok(())
    }

    /// Print summed sales for the plotted years.
    pub fn year_totals(&mut self, heading: &str, totals: &[YearTotal]) -> Result<(), ReportError> {
        let df = DataFrame::new(vec![
            Column::new(
                "year".into(),
                totals.iter().map(|t| t.year).collect::<Vec<_>>(),
            ),
            Column::new(
                "total_sales".into(),
                totals.iter().map(|t| t.total_sales).collect::<Vec<_>>(),
            ),
        ])?;
        writeln!(self.out, "\n{heading}\n{df}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(key: i32, name: &str, sales: f64) -> TopGame {
        TopGame {
            key,
            name: Some(name.to_string()),
            global_sales: sales,
        }
    }

    #[test]
    fn null_counts_list_every_column() {
        let mut reporter = Reporter::new(Vec::new(), DEFAULT_HEAD_ROWS);
        let counts = vec![
            NullCount {
                column: "year".to_string(),
                nulls: 271,
            },
            NullCount {
                column: "genre".to_string(),
                nulls: 0,
            },
        ];
        reporter
            .null_counts("Missing values before cleaning:", &counts)
            .expect("report");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert!(text.starts_with("Missing values before cleaning:"));
        assert!(text.contains("year"));
        assert!(text.contains("genre"));
        assert!(text.contains("271"));
    }

    #[test]
    fn top_games_are_truncated_to_head_rows() {
        let games: Vec<TopGame> = (0..8)
            .map(|i| game(2010 - i, &format!("Game{i}"), 1.0 + i as f64))
            .collect();
        let mut reporter = Reporter::new(Vec::new(), 5);
        reporter
            .top_games("Top Games by Year:", "year", &games)
            .expect("report");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert!(text.contains("Top Games by Year:"));
        assert!(text.contains("Game4"));
        assert!(!text.contains("Game5"));
        assert!(text.contains("2010"));
    }

    #[test]
    fn sections_print_in_call_order() {
        let mut reporter = Reporter::new(Vec::new(), DEFAULT_HEAD_ROWS);
        reporter
            .top_games("Top Games by Year:", "year", &[game(2001, "B", 8.0)])
            .expect("year");
        reporter
            .top_games("Top Games by Decade:", "decade", &[game(2000, "B", 8.0)])
            .expect("decade");
        reporter
            .year_totals(
                "Top Years by Total Sales:",
                &[YearTotal {
                    year: 2001,
                    total_sales: 14.0,
                }],
            )
            .expect("totals");

        let text = String::from_utf8(reporter.into_inner()).expect("utf8");
        let year = text.find("Top Games by Year:").expect("year heading");
        let decade = text.find("Top Games by Decade:").expect("decade heading");
        let totals = text.find("Top Years by Total Sales:").expect("totals heading");
        assert!(year < decade && decade < totals);
        assert!(text.contains("decade"));
        assert!(text.contains("14"));
    }
}
