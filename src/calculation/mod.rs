//! Calculation logic for the salary engine.
//!
//! This module contains the insurance and income tax rules, the
//! gross-to-net calculator, the net-to-gross solver built on top of it, and
//! the currency-aware [`compute_salary`] entry point. Every function is a
//! pure function of its inputs and the injected [`RateTable`](crate::config::RateTable).

mod gross_to_net;
mod income_tax;
mod insurance;
mod net_to_gross;
mod salary;

pub use gross_to_net::compute_net_from_gross;
pub use income_tax::{IncomeTaxResult, calculate_income_tax, progressive_tax};
pub use insurance::{InsuranceBases, employee_insurance, employer_contributions, insurance_bases};
pub use net_to_gross::{compute_gross_from_net, seed_gross};
pub use salary::compute_salary;
