//! Rate table configuration for the salary engine.
//!
//! Rate tables are plain data loaded from YAML, one file per legal
//! version, and injected into every calculation. Nothing in the engine
//! reads rates from global state.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vn").unwrap();
//! println!("Latest table: {}", config.latest().effective_date);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeeRates, EmployerRates, RateTable, SolverSettings, TaxBracket};

#[cfg(test)]
pub(crate) use types::test_rate_table;
