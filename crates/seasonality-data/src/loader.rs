//! CSV loading and outer-join alignment of the source series.
//!
//! Each source contributes one column. Rows are aligned on the
//! `observation_date` key with a full outer join, so the joined table covers
//! the union of all source dates and holds nulls where a source has no
//! observation.

use crate::error::{DataError, Result};
use crate::source::SourceSpec;
use crate::table::{DATE_COLUMN, RawTable};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};

/// Read one CSV source into a two-column frame.
///
/// The result has a `String` key column named [`DATE_COLUMN`] and a `String`
/// value column named after `spec.column`. Empty cells become nulls.
///
/// # Errors
/// Fails if the file cannot be read, lacks an `observation_date` header,
/// does not have exactly one value column, or repeats a date.
pub fn load_source(spec: &SourceSpec) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&spec.path)
        .map_err(|source| DataError::Read {
            path: spec.path.clone(),
            source,
        })?;

    let headers = reader.headers()?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| DataError::MissingColumn {
            path: spec.path.clone(),
            column: DATE_COLUMN.to_string(),
        })?;

    let value_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != date_idx)
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();
    let value_idx = match value_columns.as_slice() {
        [(idx, _)] => *idx,
        _ => {
            return Err(DataError::UnexpectedColumns {
                path: spec.path.clone(),
                found: value_columns.into_iter().map(|(_, name)| name).collect(),
            });
        }
    };

    let mut dates: Vec<String> = Vec::new();
    let mut values: Vec<Option<String>> = Vec::new();
    let mut seen = HashSet::new();
    for record in reader.records() {
        let record = record?;
        let date = record.get(date_idx).unwrap_or_default();
        if !seen.insert(date.to_string()) {
            return Err(DataError::DuplicateDate {
                path: spec.path.clone(),
                date: date.to_string(),
            });
        }
        dates.push(date.to_string());
        values.push(
            record
                .get(value_idx)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
    }

    debug!(
        path = %spec.path.display(),
        column = %spec.column,
        rows = dates.len(),
        "loaded source"
    );

    Ok(DataFrame::new(vec![
        Column::new(DATE_COLUMN.into(), dates),
        Column::new(spec.column.as_str().into(), values),
    ])?)
}

/// Load every source and outer-join them on the date key.
///
/// Columns follow the order of `specs`; rows are sorted by the key text,
/// which for ISO dates is chronological order.
///
/// # Errors
/// Fails on the first source that cannot be loaded, on duplicate column
/// names, or when `specs` is empty.
pub fn load_sources(specs: &[SourceSpec]) -> Result<RawTable> {
    let (first, rest) = specs.split_first().ok_or(DataError::NoSources)?;

    let mut seen = HashSet::new();
    for spec in specs {
        if spec.column == DATE_COLUMN || !seen.insert(spec.column.as_str()) {
            return Err(DataError::DuplicateColumn(spec.column.clone()));
        }
    }

    let mut joined = load_source(first)?.lazy();
    for spec in rest {
        let frame = load_source(spec)?;
        joined = joined.join(
            frame.lazy(),
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );
    }

    let mut selection = vec![col(DATE_COLUMN)];
    selection.extend(specs.iter().map(|spec| col(spec.column.as_str())));

    let frame = joined
        .select(selection)
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    info!(
        rows = frame.height(),
        columns = specs.len(),
        "joined source series"
    );

    let columns = specs.iter().map(|spec| spec.column.clone()).collect();
    Ok(RawTable::new(frame, columns))
}
