//! Cleaning of the joined table.
//!
//! Casting is strict: a present value that does not parse as a float is an
//! error, never a silent null. The last row is always dropped because the
//! most recent FRED period is usually incomplete.

use crate::error::{DataError, Result};
use crate::table::{DATE_COLUMN, RawTable, SeriesTable};
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

/// Format of the `observation_date` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cast values to floats, parse dates, sort, and drop the trailing row.
///
/// # Errors
/// Fails if a value is non-numeric, a date does not parse, or the table is
/// empty.
pub fn clean(raw: RawTable) -> Result<SeriesTable> {
    let (mut frame, columns) = raw.into_parts();

    for name in &columns {
        let cast = frame
            .column(name)?
            .strict_cast(&DataType::Float64)
            .map_err(|e| DataError::NonNumeric {
                column: name.clone(),
                reason: e.to_string(),
            })?;
        frame.with_column(cast)?;
    }

    let dates = parse_dates(frame.column(DATE_COLUMN)?.str()?)?;
    frame.with_column(Column::new(DATE_COLUMN.into(), dates))?;
    let frame = frame.sort([DATE_COLUMN], SortMultipleOptions::default())?;

    debug!(rows = frame.height(), "cast values and parsed dates");

    let table = drop_last_row(SeriesTable::from_frame(frame, columns))?;
    info!(
        rows = table.height(),
        columns = table.column_names().len(),
        "cleaned series table"
    );
    Ok(table)
}

/// Drop exactly the last (maximum-date) row.
///
/// # Errors
/// Returns [`DataError::EmptyTable`] when there is no row to drop.
pub fn drop_last_row(table: SeriesTable) -> Result<SeriesTable> {
    let height = table.height();
    if height == 0 {
        return Err(DataError::EmptyTable);
    }
    let frame = table.frame().slice(0, height - 1);
    Ok(SeriesTable::from_frame(frame, table.column_names().to_vec()))
}

fn parse_dates(raw: &StringChunked) -> Result<Vec<NaiveDate>> {
    raw.into_iter()
        .map(|value| {
            let value = value.unwrap_or_default();
            NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| DataError::DateParse {
                value: value.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(dates: Vec<&str>, values: Vec<Option<&str>>) -> RawTable {
        let frame = DataFrame::new(vec![
            Column::new(DATE_COLUMN.into(), dates),
            Column::new("x".into(), values),
        ])
        .unwrap();
        RawTable::new(frame, vec!["x".to_string()])
    }

    #[test]
    fn test_clean_casts_and_drops_last() {
        let table = clean(raw(
            vec!["2024-01-01", "2024-02-01", "2024-03-01"],
            vec![Some("1.5"), None, Some("3")],
        ))
        .unwrap();

        assert_eq!(table.height(), 2);
        assert_eq!(table.values("x").unwrap(), vec![Some(1.5), None]);
        assert_eq!(
            table.dates().unwrap(),
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_clean_drops_maximum_date_even_if_unsorted() {
        let table = clean(raw(
            vec!["2024-03-01", "2024-01-01", "2024-02-01"],
            vec![Some("3"), Some("1"), Some("2")],
        ))
        .unwrap();

        assert_eq!(table.values("x").unwrap(), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_clean_rejects_non_numeric() {
        let result = clean(raw(vec!["2024-01-01", "2024-02-01"], vec![Some("."), Some("2")]));
        assert!(matches!(
            result,
            Err(DataError::NonNumeric { column, .. }) if column == "x"
        ));
    }

    #[test]
    fn test_clean_rejects_bad_date() {
        let result = clean(raw(vec!["2024-01-01", "01/02/2024"], vec![Some("1"), Some("2")]));
        assert!(matches!(
            result,
            Err(DataError::DateParse { value, .. }) if value == "01/02/2024"
        ));
    }

    #[test]
    fn test_clean_empty_table() {
        let result = clean(raw(vec![], vec![]));
        assert!(matches!(result, Err(DataError::EmptyTable)));
    }

    #[test]
    fn test_drop_last_row_single_row() {
        let table = SeriesTable::from_columns(
            vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()],
            vec![("x".to_string(), vec![Some(1.0)])],
        )
        .unwrap();
        let dropped = drop_last_row(table).unwrap();
        assert!(dropped.is_empty());
        assert!(matches!(drop_last_row(dropped), Err(DataError::EmptyTable)));
    }
}
