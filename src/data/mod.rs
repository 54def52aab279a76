//! Data module - CSV loading, typed table and cleaning

mod cleaner;
mod loader;
pub mod table;

pub use cleaner::DataCleaner;
pub use loader::DataLoader;
pub use table::{NullCount, Table};
