//! Wide date-keyed tables.
//!
//! [`RawTable`] is what the loader produces: string-valued columns keyed by
//! the raw `observation_date` text. [`SeriesTable`] is what the cleaner
//! produces: `Float64` columns keyed by a `Date` column, sorted ascending.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use ndarray::Array2;
use polars::prelude::*;

/// Name of the key column in every table.
pub const DATE_COLUMN: &str = "observation_date";

/// Outer-joined source data before type casting.
#[derive(Debug, Clone)]
pub struct RawTable {
    frame: DataFrame,
    columns: Vec<String>,
}

impl RawTable {
    pub(crate) const fn new(frame: DataFrame, columns: Vec<String>) -> Self {
        Self { frame, columns }
    }

    /// Underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Value column names, in source order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub(crate) fn into_parts(self) -> (DataFrame, Vec<String>) {
        (self.frame, self.columns)
    }
}

/// Cleaned table: `Float64` value columns keyed by an ascending `Date` column.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    frame: DataFrame,
    columns: Vec<String>,
}

impl SeriesTable {
    pub(crate) const fn from_frame(frame: DataFrame, columns: Vec<String>) -> Self {
        Self { frame, columns }
    }

    /// Build a table directly from dates and value columns.
    ///
    /// Rows are sorted by date. Every column must have one entry per date.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len() + 1);
        data.push(Column::new(DATE_COLUMN.into(), dates));

        for (name, values) in columns {
            if names.contains(&name) {
                return Err(DataError::DuplicateColumn(name));
            }
            data.push(Column::new(name.as_str().into(), values));
            names.push(name);
        }

        let frame = DataFrame::new(data)?.sort([DATE_COLUMN], SortMultipleOptions::default())?;
        Ok(Self::from_frame(frame, names))
    }

    /// Underlying frame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Value column names, in source order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Observation dates, ascending.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        self.frame
            .column(DATE_COLUMN)?
            .date()?
            .as_date_iter()
            .map(|date| {
                date.ok_or_else(|| DataError::DateParse {
                    value: String::new(),
                    reason: "null observation date".to_string(),
                })
            })
            .collect()
    }

    /// First and last observation date.
    pub fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let dates = self.dates()?;
        Ok(dates.first().copied().zip(dates.last().copied()))
    }

    /// Values of a column, `None` where the source had no observation.
    pub fn values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if !self.columns.iter().any(|c| c == name) {
            return Err(DataError::UnknownColumn(name.to_string()));
        }
        Ok(self.frame.column(name)?.f64()?.into_iter().collect())
    }

    /// Present (non-missing, finite) values of a column, in date order.
    pub fn observed(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self
            .values(name)?
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect())
    }

    /// Dense `rows x columns` matrix with `NaN` for missing values.
    pub fn to_matrix(&self) -> Result<Array2<f64>> {
        let mut matrix = Array2::<f64>::from_elem((self.height(), self.columns.len()), f64::NAN);
        for (j, name) in self.columns.iter().enumerate() {
            for (i, value) in self.values(name)?.into_iter().enumerate() {
                if let Some(v) = value {
                    matrix[[i, j]] = v;
                }
            }
        }
        Ok(matrix)
    }
}
