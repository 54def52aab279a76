//! Data Cleaner Module
//! Fills missing `year` and `publisher` values with fixed heuristics.

use super::table::{NullCount, Table};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

/// Placeholder for releases without a known publisher.
pub const UNKNOWN_PUBLISHER: &str = "Unknown";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CleanerError {
    #[error("Cannot fill {missing} missing years: the year column has no values")]
    NoYearValues { missing: usize },
}

/// Null counts around a cleaning pass.
#[derive(Debug, Clone)]
pub struct CleaningSummary {
    pub nulls_before: Vec<NullCount>,
    pub nulls_after: Vec<NullCount>,
    pub years_filled: usize,
    pub publishers_filled: usize,
    /// Year used for the fill, if any fill was needed.
    pub fill_year: Option<i32>,
}

/// Handles data cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Most frequent non-null year. Ties resolve to the smallest year.
    pub fn year_mode(table: &Table) -> Option<i32> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in table.records().iter().filter_map(|r| r.year) {
            *counts.entry(year).or_default() += 1;
        }

        // BTreeMap iterates ascending, so keeping the first maximum picks the smallest year.
        let mut mode: Option<(i32, usize)> = None;
        for (year, count) in counts {
            if mode.map_or(true, |(_, best)| count > best) {
                mode = Some((year, count));
            }
        }
        mode.map(|(year, _)| year)
    }

    /// Fill missing years with the mode and missing publishers with "Unknown".
    pub fn clean(table: &mut Table) -> Result<CleaningSummary, CleanerError> {
        let nulls_before = table.null_counts();

        let missing_years = table.records().iter().filter(|r| r.year.is_none()).count();
        let fill_year = if missing_years > 0 {
            let Some(mode) = Self::year_mode(table) else {
                warn!("year column is entirely empty");
                return Err(CleanerError::NoYearValues {
                    missing: missing_years,
                });
            };
            for record in table.records_mut() {
                record.year.get_or_insert(mode);
            }
            Some(mode)
        } else {
            None
        };

        let mut publishers_filled = 0;
        for record in table.records_mut() {
            if record.publisher.is_none() {
                record.publisher = Some(UNKNOWN_PUBLISHER.to_string());
                publishers_filled += 1;
            }
        }

        info!(
            "filled {} years (mode {:?}) and {} publishers",
            missing_years, fill_year, publishers_filled
        );

        Ok(CleaningSummary {
            nulls_before,
            nulls_after: table.null_counts(),
            years_filled: missing_years,
            publishers_filled,
            fill_year,
        })
    }
}
