//! Sales Aggregator Module
//! Group-wise reductions over the cleaned sales table.

use crate::data::table::{GameRecord, Table, DECADE_COL, YEAR_COL};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Number of years shown in the sales chart.
pub const DEFAULT_TOP_YEARS: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Row {row} has no value in '{column}'; clean the table first")]
    NullKey { row: usize, column: &'static str },
    #[error("No global_sales values in group {key}")]
    NoSales { key: i32 },
    #[error("The decade column has not been derived")]
    DecadesNotDerived,
}

/// Best-selling game within one group.
#[derive(Debug, Clone, PartialEq)]
pub struct TopGame {
    /// Year or decade the group is keyed by.
    pub key: i32,
    pub name: Option<String>,
    pub global_sales: f64,
}

/// Summed sales for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTotal {
    pub year: i32,
    pub total_sales: f64,
}

/// Computes group-wise aggregates.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Best-selling game per year, newest year first.
    pub fn top_games_by_year(table: &Table) -> Result<Vec<TopGame>, AggregateError> {
        let mut games = Self::top_games_by(table, YEAR_COL, |r| r.year)?;
        games.reverse();
        Ok(games)
    }

    /// Best-selling game per decade, oldest decade first.
    pub fn top_games_by_decade(table: &Table) -> Result<Vec<TopGame>, AggregateError> {
        if !table.has_column(DECADE_COL) {
            return Err(AggregateError::DecadesNotDerived);
        }
        Self::top_games_by(table, DECADE_COL, |r| r.decade)
    }

    /// Years with the highest summed sales, largest first.
    ///
    /// Equal totals keep ascending year order.
    pub fn top_years_by_total_sales(
        table: &Table,
        limit: usize,
    ) -> Result<Vec<YearTotal>, AggregateError> {
        let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
        for (row, record) in table.records().iter().enumerate() {
            let year = record.year.ok_or(AggregateError::NullKey {
                row,
                column: YEAR_COL,
            })?;
            *totals.entry(year).or_default() += record.global_sales.unwrap_or(0.0);
        }

        let mut totals: Vec<YearTotal> = totals
            .into_iter()
            .map(|(year, total_sales)| YearTotal { year, total_sales })
            .collect();
        totals.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
        totals.truncate(limit);

        debug!("top {} years by total sales: {:?}", limit, totals);
        Ok(totals)
    }

    /// Select the max-sales record per key, ascending by key.
    ///
    /// The first record wins ties; records without sales never win.
    fn top_games_by(
        table: &Table,
        column: &'static str,
        key_of: impl Fn(&GameRecord) -> Option<i32>,
    ) -> Result<Vec<TopGame>, AggregateError> {
        let mut best: BTreeMap<i32, Option<(usize, f64)>> = BTreeMap::new();

        for (row, record) in table.records().iter().enumerate() {
            let key = key_of(record).ok_or(AggregateError::NullKey { row, column })?;
            let slot = best.entry(key).or_insert(None);
            if let Some(sales) = record.global_sales {
                if slot.map_or(true, |(_, top)| sales > top) {
                    *slot = Some((row, sales));
                }
            }
        }

        best.into_iter()
            .map(|(key, selected)| {
                let (row, global_sales) = selected.ok_or(AggregateError::NoSales { key })?;
                Ok(TopGame {
                    key,
                    name: table.records()[row].name.clone(),
                    global_sales,
                })
            })
            .collect()
    }
}
