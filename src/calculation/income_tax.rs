//! Personal income tax calculation.
//!
//! Progressive tax walks the configured brackets in ascending order after
//! personal and dependent deductions. Flat tax applies a single rate to
//! income after insurance with no deductions.

use rust_decimal::Decimal;

use crate::config::{RateTable, TaxBracket};
use crate::models::{BracketDetail, SalaryRequest, TaxMethod};

/// The result of a personal income tax calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxResult {
    /// Personal plus dependent deductions; zero under flat tax.
    pub deductions: Decimal,
    /// Income the rate or brackets were applied to.
    pub taxable_income: Decimal,
    /// Total tax.
    pub tax: Decimal,
    /// One entry per configured bracket.
    pub details: Vec<BracketDetail>,
}

/// Applies progressive brackets to a taxable income.
///
/// Every bracket produces a detail entry, including those above the
/// income, which carry zero income and zero tax.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::progressive_tax;
/// use salary_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let brackets = &loader.latest().tax_brackets;
///
/// // 5,000,000 x 5% + 2,000,000 x 10%
/// let (tax, details) = progressive_tax(Decimal::new(7_000_000, 0), brackets);
/// assert_eq!(tax, Decimal::new(450_000, 0));
/// assert_eq!(details.len(), brackets.len());
/// ```
pub fn progressive_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> (Decimal, Vec<BracketDetail>) {
    let mut total = Decimal::ZERO;

    let details: Vec<BracketDetail> = brackets
        .iter()
        .map(|bracket| {
            let above_lower = (taxable_income - bracket.lower_bound).max(Decimal::ZERO);
            let income_in_bracket = match bracket.width() {
                Some(width) => above_lower.min(width),
                None => above_lower,
            };
            let tax_in_bracket = income_in_bracket * bracket.rate;
            total += tax_in_bracket;

            BracketDetail {
                label: bracket.label.clone(),
                rate: bracket.rate,
                income_in_bracket,
                tax_in_bracket,
            }
        })
        .collect();

    (total, details)
}

/// Computes personal income tax on income after employee insurance.
///
/// Foreign nationals are taxed as residents; the non-resident flat regime
/// is not modelled.
pub fn calculate_income_tax(
    income_before_tax: Decimal,
    request: &SalaryRequest,
    rates: &RateTable,
) -> IncomeTaxResult {
    match request.tax_method {
        TaxMethod::Flat => {
            let taxable_income = income_before_tax.max(Decimal::ZERO);
            IncomeTaxResult {
                deductions: Decimal::ZERO,
                taxable_income,
                tax: taxable_income * rates.flat_tax_rate,
                details: zero_details(&rates.tax_brackets),
            }
        }
        TaxMethod::Progressive => {
            let deductions = rates.personal_deduction
                + Decimal::from(request.dependents) * rates.dependent_deduction;
            let taxable_income = (income_before_tax - deductions).max(Decimal::ZERO);
            let (tax, details) = progressive_tax(taxable_income, &rates.tax_brackets);
            IncomeTaxResult {
                deductions,
                taxable_income,
                tax,
                details,
            }
        }
    }
}

fn zero_details(brackets: &[TaxBracket]) -> Vec<BracketDetail> {
    brackets
        .iter()
        .map(|bracket| BracketDetail {
            label: bracket.label.clone(),
            rate: bracket.rate,
            income_in_bracket: Decimal::ZERO,
            tax_in_bracket: Decimal::ZERO,
        })
        .collect()
}
