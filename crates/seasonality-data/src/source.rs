//! Source definitions for the energy-sector series.
//!
//! All series are FRED (Federal Reserve Economic Data) CSV exports with an
//! `observation_date` column followed by a single value column named after
//! the FRED series id. The loader renames that value column to the semantic
//! name listed here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default directory holding the energy-sector CSV files.
pub const DEFAULT_DATA_DIR: &str = "data/energy_data";

/// The six energy-sector series analysed by Seasonality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergySeries {
    /// All employees, oil and gas extraction
    Employees,

    /// City average price of electricity per kWh
    CityAverage,

    /// Industrial production, electric and gas utilities
    Production,

    /// Manufacturers' new orders, lighting equipment
    OrdersLighting,

    /// Manufacturers' new orders, mining, oil and gas field machinery
    OrdersMiningOilGas,

    /// WTI crude oil spot price
    OilPrice,
}

impl EnergySeries {
    /// Returns all series in table column order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Employees,
            Self::CityAverage,
            Self::Production,
            Self::OrdersLighting,
            Self::OrdersMiningOilGas,
            Self::OilPrice,
        ]
    }

    /// Returns the CSV file name of the series.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Employees => "All_Employees_Oil_Gas_Extraction.csv",
            Self::CityAverage => "City_Average_Price_Per_kWH.csv",
            Self::Production => "Industrial_Production_Utilities_Electric_Gas.csv",
            Self::OrdersLighting => "Manufacturer_New_Orders_Lighting_Equipment.csv",
            Self::OrdersMiningOilGas => "Manufacturer_New_Orders_Mining_Oil_Gas.csv",
            Self::OilPrice => "WTI_Oil_Prices.csv",
        }
    }

    /// Returns the semantic column name of the series.
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::CityAverage => "city_average",
            Self::Production => "production",
            Self::OrdersLighting => "orders_lighting",
            Self::OrdersMiningOilGas => "orders_mining_oil_gas",
            Self::OilPrice => "oil_price",
        }
    }

    /// Builds the source spec for this series under `data_dir`.
    pub fn source(&self, data_dir: impl AsRef<Path>) -> SourceSpec {
        SourceSpec::new(data_dir.as_ref().join(self.file_name()), self.column_name())
    }

    /// Builds source specs for every series under `data_dir`, in column order.
    pub fn sources(data_dir: impl AsRef<Path>) -> Vec<SourceSpec> {
        Self::all()
            .iter()
            .map(|series| series.source(data_dir.as_ref()))
            .collect()
    }
}

impl fmt::Display for EnergySeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// A CSV file paired with the column name its values receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Path to the CSV file.
    pub path: PathBuf,

    /// Semantic column name in the joined table.
    pub column: String,
}

impl SourceSpec {
    /// Create a new source spec.
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }
}
