//! Salary engine for Vietnamese payroll.
//!
//! This crate converts between gross and net monthly salary under the
//! statutory insurance contribution rules and personal income tax brackets
//! held in a versioned rate table, and exposes the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
