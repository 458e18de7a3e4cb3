//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading versioned
//! rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::RateTable;

/// Loads and provides access to every rate table version.
///
/// # Directory Structure
///
/// ```text
/// config/vn/
/// └── rates/
///     ├── 2023-07-01.yaml  # One file per table version
///     └── 2024-07-01.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let table = loader.rate_table_for(date).unwrap();
/// println!("Base salary: {}", table.base_salary);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Tables sorted by effective date, oldest first. Never empty.
    tables: Vec<RateTable>,
}

impl ConfigLoader {
    /// Loads every rate table under `<path>/rates/`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The rates directory is missing or holds no `.yaml` files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any table fails [`RateTable::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rates_dir = path.as_ref().join("rates");
        let tables = Self::load_rates(&rates_dir)?;
        Self::from_tables(tables)
    }

    /// Builds a loader from tables already in memory.
    ///
    /// Each table is validated; at least one is required.
    pub fn from_tables(mut tables: Vec<RateTable>) -> EngineResult<Self> {
        if tables.is_empty() {
            return Err(EngineError::InvalidRateTable {
                message: "at least one rate table is required".to_string(),
            });
        }
        for table in &tables {
            table.validate()?;
        }
        tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Ok(Self { tables })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<RateTable>(&path)?;
                debug!(
                    path = %path.display(),
                    effective_date = %table.effective_date,
                    "Loaded rate table"
                );
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns all tables, oldest first.
    pub fn tables(&self) -> &[RateTable] {
        &self.tables
    }

    /// Returns the most recent table.
    pub fn latest(&self) -> &RateTable {
        // `from_tables` guarantees at least one table.
        &self.tables[self.tables.len() - 1]
    }

    /// Gets the table in effect on a given date.
    ///
    /// Finds the most recent table whose effective date is on or before
    /// `date`.
    pub fn rate_table_for(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.tables
            .iter()
            .rfind(|table| table.effective_date <= date)
            .ok_or(EngineError::RateTableNotFound { date })
    }
}
