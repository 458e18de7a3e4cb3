//! Core data models for the salary engine.
//!
//! This module contains the request and result types exchanged with callers.

mod salary_breakdown;
mod salary_request;

pub use salary_breakdown::{
    BracketDetail, EmployeeInsurance, EmployerContributions, SalaryBreakdown, SalaryResult,
};
pub use salary_request::{
    CalculationMode, Currency, InsuranceBasis, MAX_AMOUNT, Nationality, Region, SalaryRequest,
    TaxMethod,
};
