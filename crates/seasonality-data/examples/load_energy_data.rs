//! Load and clean the energy-sector CSVs and print a short overview.
//!
//! Run with: cargo run -p seasonality-data --example load_energy_data -- [data_dir]

use seasonality_data::{DEFAULT_DATA_DIR, EnergySeries, clean, load_sources};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

    println!("=== Seasonality Data Demo ===\n");
    println!("Data directory: {data_dir}\n");

    for series in EnergySeries::all() {
        println!("  {:<24} <- {}", series.column_name(), series.file_name());
    }

    let raw = load_sources(&EnergySeries::sources(&data_dir))?;
    println!("\nJoined table: {} rows", raw.height());

    let table = clean(raw)?;
    println!("Cleaned table: {} rows (trailing period dropped)", table.height());

    if let Some((first, last)) = table.date_range()? {
        println!("Date range: {first} .. {last}\n");
    }

    for name in table.column_names() {
        let observed = table.observed(name)?;
        println!(
            "  {:<24} {:>5} observations, {:>5} missing",
            name,
            observed.len(),
            table.height() - observed.len()
        );
    }

    Ok(())
}
