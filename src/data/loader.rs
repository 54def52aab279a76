//! CSV Data Loader Module
//! Reads the sales CSV with Polars and maps it onto the typed `Table`.

use super::table::{ColumnSlot, GameRecord, Table, REQUIRED_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Rows scanned for schema inference.
const INFER_SCHEMA_LENGTH: usize = 10000;

/// Tokens read as missing values, matching common spreadsheet exports.
const NULL_TOKENS: [&str; 6] = ["", "N/A", "NA", "NaN", "null", "NULL"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into a typed table.
    pub fn load_csv(path: &Path) -> Result<Table, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
            .with_null_values(Some(null_values))
            .finish()?
            .collect()?;

        info!(
            "loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Self::from_dataframe(&df)
    }

    /// Convert a DataFrame into a table, casting the known columns.
    pub fn from_dataframe(df: &DataFrame) -> Result<Table, LoaderError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let mut table = Table::with_columns(&columns);
        let mut records = vec![GameRecord::default(); df.height()];
        for record in &mut records {
            record.extra = vec![None; table.extra_columns().len()];
        }

        for column in &columns {
            let Some(slot) = ColumnSlot::typed(column).or_else(|| {
                table
                    .extra_columns()
                    .iter()
                    .position(|c| c == column)
                    .map(ColumnSlot::Extra)
            }) else {
                continue;
            };
            debug!("mapping column '{}' -> {:?}", column, slot);
            let series = df.column(column)?;

            // Numeric columns must convert fully; text left in them is a parse error.
            match slot {
                ColumnSlot::Year | ColumnSlot::Decade => {
                    let ints = series.strict_cast(&DataType::Int32)?;
                    let ca = ints.i32()?;
                    for (record, value) in records.iter_mut().zip(ca.into_iter()) {
                        if slot == ColumnSlot::Year {
                            record.year = value;
                        } else {
                            record.decade = value;
                        }
                    }
                }
                ColumnSlot::GlobalSales => {
                    let floats = series.strict_cast(&DataType::Float64)?;
                    let ca = floats.f64()?;
                    for (record, value) in records.iter_mut().zip(ca.into_iter()) {
                        record.global_sales = value.filter(|v| !v.is_nan());
                    }
                }
                _ => {
                    let strings = series.cast(&DataType::String)?;
                    let ca = strings.str()?;
                    for (record, value) in records.iter_mut().zip(ca.into_iter()) {
                        let value = value.map(str::to_string);
                        match slot {
                            ColumnSlot::Name => record.name = value,
                            ColumnSlot::Platform => record.platform = value,
                            ColumnSlot::Publisher => record.publisher = value,
                            ColumnSlot::Extra(idx) => record.extra[idx] = value,
                            _ => {}
                        }
                    }
                }
            }
        }

        for record in records {
            table.push(record);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("sales.csv");
        let mut file = std::fs::File::create(&path).expect("create csv");
        file.write_all(contents.as_bytes()).expect("write csv");
        path
    }

    #[test]
    fn loads_typed_and_passthrough_columns() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "rank,name,platform,year,genre,publisher,global_sales\n\
             1,Wii Sports,Wii,2006,Sports,Nintendo,82.74\n\
             2,Super Mario Bros.,NES,,Platform,,40.24\n",
        );

        let table = DataLoader::load_csv(&path).expect("load");
        assert_eq!(table.len(), 2);
        assert_eq!(table.extra_columns(), &["rank".to_string(), "genre".to_string()]);

        let first = &table.records()[0];
        assert_eq!(first.name.as_deref(), Some("Wii Sports"));
        assert_eq!(first.platform.as_deref(), Some("Wii"));
        assert_eq!(first.year, Some(2006));
        assert_eq!(first.publisher.as_deref(), Some("Nintendo"));
        assert_eq!(first.global_sales, Some(82.74));
        assert_eq!(first.extra[1].as_deref(), Some("Sports"));

        let second = &table.records()[1];
        assert_eq!(second.year, None);
        assert_eq!(second.publisher, None);
    }

    #[test]
    fn na_tokens_are_missing_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\n\
             A,2001,X,5.0\n\
             B,N/A,N/A,8.0\n",
        );

        let table = DataLoader::load_csv(&path).expect("load");
        let b = &table.records()[1];
        assert_eq!(b.year, None);
        assert_eq!(b.publisher, None);
    }

    #[test]
    fn float_years_are_truncated() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\nA,2006.0,X,1.5\nB,,Y,2.5\n",
        );

        let table = DataLoader::load_csv(&path).expect("load");
        assert_eq!(table.records()[0].year, Some(2006));
        assert_eq!(table.records()[1].year, None);
    }

    #[test]
    fn text_in_numeric_columns_is_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\nA,2001,X,5.0\nB,unknown,Y,abc\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn text_sales_value_is_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\nA,2001,X,5.0\nB,2002,Y,lots\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn ragged_row_is_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\nA,2001,X,5.0\nB,2002,Y,8.0,extra,fields\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn unterminated_quote_is_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(
            &dir,
            "name,year,publisher,global_sales\nA,2001,X,5.0\n\"B,2002,Y,8.0\nC,2003,Z,1.0\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Parse(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = DataLoader::load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_csv(&dir, "name,year,global_sales\nA,2001,1.0\n");

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "publisher"));
    }
}
