//! Integration tests for loading and cleaning the six energy-sector sources.

use chrono::{Months, NaiveDate};
use seasonality_data::{DataError, EnergySeries, clean, load_sources};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a FRED-style monthly CSV starting at `start` with `n` observations.
fn write_fred_csv(dir: &Path, series: EnergySeries, start: NaiveDate, n: u32, scale: f64) {
    let mut contents = String::from("observation_date,FRED_ID\n");
    for i in 0..n {
        let date = start.checked_add_months(Months::new(i)).unwrap();
        contents.push_str(&format!("{},{:.3}\n", date.format("%Y-%m-%d"), scale * (i as f64 + 1.0)));
    }
    fs::write(dir.join(series.file_name()), contents).unwrap();
}

fn write_all(dir: &Path) {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    for (k, series) in EnergySeries::all().into_iter().enumerate() {
        // Stagger start dates so the outer join has to fill gaps.
        let start = base.checked_add_months(Months::new(k as u32)).unwrap();
        write_fred_csv(dir, series, start, 24, k as f64 + 1.0);
    }
}

#[test]
fn test_load_and_clean_six_sources() {
    let dir = TempDir::new().unwrap();
    write_all(dir.path());

    let raw = load_sources(&EnergySeries::sources(dir.path())).unwrap();
    // Union of staggered ranges: 24 + 5 months.
    assert_eq!(raw.height(), 29);

    let table = clean(raw).unwrap();
    assert_eq!(table.height(), 28);

    let expected: Vec<String> = EnergySeries::all()
        .iter()
        .map(|s| s.column_name().to_string())
        .collect();
    assert_eq!(table.column_names(), expected.as_slice());

    let dates = table.dates().unwrap();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());

    // The maximum date (2002-05-01) belonged to oil_price only and is gone.
    assert_eq!(
        *dates.last().unwrap(),
        NaiveDate::from_ymd_opt(2002, 4, 1).unwrap()
    );

    // employees starts first and ends first: trailing rows are missing.
    let employees = table.values("employees").unwrap();
    assert_eq!(employees[0], Some(1.0));
    assert!(employees[24..].iter().all(Option::is_none));

    // oil_price starts five months late.
    let oil = table.values("oil_price").unwrap();
    assert!(oil[..5].iter().all(Option::is_none));
    assert_eq!(oil[5], Some(6.0));
}

#[test]
fn test_missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_all(dir.path());
    fs::remove_file(dir.path().join(EnergySeries::Production.file_name())).unwrap();

    let result = load_sources(&EnergySeries::sources(dir.path()));
    match result {
        Err(DataError::Read { path, .. }) => {
            assert!(path.ends_with(EnergySeries::Production.file_name()));
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn test_fred_missing_marker_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_all(dir.path());
    fs::write(
        dir.path().join(EnergySeries::OilPrice.file_name()),
        "observation_date,DCOILWTICO\n2000-06-01,.\n2000-07-01,30.1\n",
    )
    .unwrap();

    let raw = load_sources(&EnergySeries::sources(dir.path())).unwrap();
    assert!(matches!(
        clean(raw),
        Err(DataError::NonNumeric { column, .. }) if column == "oil_price"
    ));
}

#[test]
fn test_missing_data_dir_names_file() {
    let result = load_sources(&EnergySeries::sources(Path::new("/nonexistent/energy")));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("All_Employees_Oil_Gas_Extraction.csv"));
}
