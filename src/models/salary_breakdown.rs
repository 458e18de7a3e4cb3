//! Calculation output models.
//!
//! [`SalaryBreakdown`] is the local-currency detail produced by the
//! calculators; [`SalaryResult`] wraps it with the request-currency echo
//! that forms, history and export views consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// Employee insurance contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInsurance {
    /// Base for social and health insurance, after floor and cap.
    pub base_si_hi: Decimal,
    /// Base for unemployment insurance, after floor and cap.
    pub base_ui: Decimal,
    /// Social insurance.
    pub social: Decimal,
    /// Health insurance.
    pub health: Decimal,
    /// Unemployment insurance.
    pub unemployment: Decimal,
    /// Sum of the three contributions.
    pub total: Decimal,
}

/// Employer contributions on top of gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Social insurance.
    pub social: Decimal,
    /// Health insurance.
    pub health: Decimal,
    /// Unemployment insurance.
    pub unemployment: Decimal,
    /// Trade-union fee; zero unless requested.
    pub union_fee: Decimal,
    /// Sum of all employer contributions.
    pub total: Decimal,
}

/// Income and tax falling into one progressive bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDetail {
    /// Display label of the bracket.
    pub label: String,
    /// Marginal rate of the bracket.
    pub rate: Decimal,
    /// Taxable income falling into this bracket.
    pub income_in_bracket: Decimal,
    /// Tax on `income_in_bracket`.
    pub tax_in_bracket: Decimal,
}

/// Full local-currency breakdown of one salary.
///
/// `tax_details` always has one entry per configured bracket, zero-filled
/// past the point where taxable income runs out (and entirely zero under
/// flat tax).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Gross salary.
    pub gross: Decimal,
    /// Net salary, never negative.
    pub net: Decimal,
    /// Employee insurance contributions.
    pub insurance: EmployeeInsurance,
    /// Gross minus employee insurance.
    pub income_before_tax: Decimal,
    /// Personal plus dependent deductions; zero under flat tax.
    pub deductions: Decimal,
    /// Income the tax rate or brackets were applied to.
    pub taxable_income: Decimal,
    /// Personal income tax.
    pub personal_income_tax: Decimal,
    /// Per-bracket tax detail.
    pub tax_details: Vec<BracketDetail>,
    /// Employee insurance plus personal income tax.
    pub total_deductions: Decimal,
    /// Employer contributions.
    pub employer: EmployerContributions,
    /// Gross plus employer contributions.
    pub total_employer_cost: Decimal,
    /// Whether the gross figure met the solver tolerance (always true
    /// for a gross-to-net calculation).
    pub converged: bool,
    /// Solver rounds used; zero for a gross-to-net calculation.
    pub iterations: u32,
}

/// The result handed back to callers of
/// [`compute_salary`](crate::calculation::compute_salary).
///
/// `gross` and `net` are in the request currency; everything inside
/// `breakdown` is in local currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// Gross salary in the request currency.
    pub gross: Decimal,
    /// Net salary in the request currency.
    pub net: Decimal,
    /// Local-currency detail.
    pub breakdown: SalaryBreakdown,
    /// Request currency.
    pub currency: Currency,
    /// The request amount, unconverted.
    pub original_amount: Decimal,
    /// True when the request was gross-to-net.
    pub is_gross_mode: bool,
    /// Number of dependents declared.
    pub dependents: u32,
    /// Exchange rate used for conversion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}
