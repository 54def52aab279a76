//! Sales Table Module
//! Typed record schema for the game sales dataset, plus passthrough columns.

/// Column names the analysis depends on.
pub const NAME_COL: &str = "name";
pub const PLATFORM_COL: &str = "platform";
pub const YEAR_COL: &str = "year";
pub const PUBLISHER_COL: &str = "publisher";
pub const GLOBAL_SALES_COL: &str = "global_sales";
pub const DECADE_COL: &str = "decade";

/// Columns that must be present in the input CSV.
pub const REQUIRED_COLUMNS: [&str; 4] = [NAME_COL, YEAR_COL, PUBLISHER_COL, GLOBAL_SALES_COL];

/// Where a column of the source header is stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot {
    Name,
    Platform,
    Year,
    Publisher,
    GlobalSales,
    Decade,
    /// Index into `GameRecord::extra`.
    Extra(usize),
}

impl ColumnSlot {
    /// Map a header name to its typed slot, or `None` for passthrough columns.
    pub fn typed(name: &str) -> Option<Self> {
        match name {
            NAME_COL => Some(Self::Name),
            PLATFORM_COL => Some(Self::Platform),
            YEAR_COL => Some(Self::Year),
            PUBLISHER_COL => Some(Self::Publisher),
            GLOBAL_SALES_COL => Some(Self::GlobalSales),
            DECADE_COL => Some(Self::Decade),
            _ => None,
        }
    }
}

/// One game release.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub year: Option<i32>,
    pub publisher: Option<String>,
    /// Millions of units sold worldwide.
    pub global_sales: Option<f64>,
    pub decade: Option<i32>,
    /// Values of the passthrough columns, aligned with `Table::extra_columns`.
    pub extra: Vec<Option<String>>,
}

impl GameRecord {
    /// Check whether the value stored in `slot` is missing.
    pub fn is_null(&self, slot: ColumnSlot) -> bool {
        match slot {
            ColumnSlot::Name => self.name.is_none(),
            ColumnSlot::Platform => self.platform.is_none(),
            ColumnSlot::Year => self.year.is_none(),
            ColumnSlot::Publisher => self.publisher.is_none(),
            ColumnSlot::GlobalSales => self.global_sales.map_or(true, f64::is_nan),
            ColumnSlot::Decade => self.decade.is_none(),
            ColumnSlot::Extra(idx) => self.extra.get(idx).map_or(true, Option::is_none),
        }
    }
}

/// Number of missing values in one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullCount {
    pub column: String,
    pub nulls: usize,
}

/// Decade a year falls into, using floor division.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Ordered game records sharing one column layout.
#[derive(Debug, Clone, Default)]
pub struct Table {
    layout: Vec<(String, ColumnSlot)>,
    extra_columns: Vec<String>,
    records: Vec<GameRecord>,
}

impl Table {
    /// Build a table from header names in source order.
    ///
    /// Names without a typed slot become passthrough columns.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut layout = Vec::with_capacity(columns.len());
        let mut extra_columns = Vec::new();

        for column in columns {
            let name = column.as_ref();
            let slot = ColumnSlot::typed(name).unwrap_or_else(|| {
                extra_columns.push(name.to_string());
                ColumnSlot::Extra(extra_columns.len() - 1)
            });
            layout.push((name.to_string(), slot));
        }

        Self {
            layout,
            extra_columns,
            records: Vec::new(),
        }
    }

    /// Append a record. Its `extra` vector is padded to the passthrough width.
    pub fn push(&mut self, mut record: GameRecord) {
        record.extra.resize(self.extra_columns.len(), None);
        self.records.push(record);
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [GameRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in source order (plus `decade` once derived).
    pub fn column_names(&self) -> Vec<&str> {
        self.layout.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.layout.iter().any(|(col, _)| col == name)
    }

    /// Count missing values per column, in column order.
    pub fn null_counts(&self) -> Vec<NullCount> {
        self.layout
            .iter()
            .map(|(column, slot)| NullCount {
                column: column.clone(),
                nulls: self.records.iter().filter(|r| r.is_null(*slot)).count(),
            })
            .collect()
    }

    /// Add the derived `decade` column from `year`.
    ///
    /// Re-deriving overwrites the previous values and keeps a single column.
    pub fn derive_decades(&mut self) {
        for record in &mut self.records {
            record.decade = record.year.map(decade_of);
        }
        if !self.has_column(DECADE_COL) {
            self.layout
                .push((DECADE_COL.to_string(), ColumnSlot::Decade));
        }
    }

    /// First record (in table order) with the given year.
    pub fn first_with_year(&self, year: i32) -> Option<&GameRecord> {
        self.records.iter().find(|r| r.year == Some(year))
    }
}
