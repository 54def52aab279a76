//! Stats module - group-wise sales aggregation

mod aggregator;

pub use aggregator::{SalesAggregator, TopGame, YearTotal, DEFAULT_TOP_YEARS};
