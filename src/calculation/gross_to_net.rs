//! Gross-to-net salary calculation.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{MAX_AMOUNT, SalaryBreakdown, SalaryRequest};

use super::income_tax::calculate_income_tax;
use super::insurance::{employee_insurance, employer_contributions, insurance_bases};

/// Computes the full breakdown for a gross salary in local currency.
///
/// The function is total: a negative gross is treated as zero, a gross
/// above [`MAX_AMOUNT`] is treated as the ceiling, and a net that would
/// fall below zero (insurance on the regional floor exceeding a tiny
/// gross) is reported as zero. Request fields are used as given; see
/// [`SalaryRequest::validate`] for the checks callers should run first.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_net_from_gross;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let request = SalaryRequest {
///     amount: Decimal::new(20_000_000, 0),
///     mode: CalculationMode::GrossToNet,
///     currency: Currency::Vnd,
///     exchange_rate: None,
///     insurance_basis: InsuranceBasis::Official,
///     custom_insurance_base: None,
///     tax_method: TaxMethod::Progressive,
///     region: Region::One,
///     dependents: 1,
///     nationality: Nationality::Domestic,
///     include_employer_union_fee: false,
/// };
///
/// let breakdown = compute_net_from_gross(request.amount, &request, loader.latest());
/// assert_eq!(breakdown.net, Decimal::new(17_775_000, 0));
/// ```
pub fn compute_net_from_gross(
    gross: Decimal,
    request: &SalaryRequest,
    rates: &RateTable,
) -> SalaryBreakdown {
    let gross = gross.clamp(Decimal::ZERO, MAX_AMOUNT);

    let bases = insurance_bases(gross, request, rates);
    let insurance = employee_insurance(bases, request, rates);

    let income_before_tax = gross - insurance.total;
    let income_tax = calculate_income_tax(income_before_tax, request, rates);

    // Clamped: a gross below the floored insurance cost nets to zero.
    let net = (income_before_tax - income_tax.tax).max(Decimal::ZERO);

    let employer = employer_contributions(gross, bases, request, rates);
    let total_employer_cost = gross + employer.total;

    SalaryBreakdown {
        gross,
        net,
        total_deductions: insurance.total + income_tax.tax,
        insurance,
        income_before_tax,
        deductions: income_tax.deductions,
        taxable_income: income_tax.taxable_income,
        personal_income_tax: income_tax.tax,
        tax_details: income_tax.details,
        employer,
        total_employer_cost,
        converged: true,
        iterations: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_rate_table;
    use crate::models::{
        CalculationMode, Currency, InsuranceBasis, Nationality, Region, TaxMethod,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_request() -> SalaryRequest {
        SalaryRequest {
            amount: Decimal::ZERO,
            mode: CalculationMode::GrossToNet,
            currency: Currency::Vnd,
            exchange_rate: None,
            insurance_basis: InsuranceBasis::Official,
            custom_insurance_base: None,
            tax_method: TaxMethod::Progressive,
            region: Region::One,
            dependents: 1,
            nationality: Nationality::Domestic,
            include_employer_union_fee: false,
        }
    }

    /// Worked example: 20M gross, region I, one dependent.
    #[test]
    fn test_progressive_20_million_one_dependent() {
        let result = compute_net_from_gross(dec("20000000"), &create_test_request(), &test_rate_table());

        assert_eq!(result.gross, dec("20000000"));
        assert_eq!(result.insurance.social, dec("1600000"));
        assert_eq!(result.insurance.health, dec("300000"));
        assert_eq!(result.insurance.unemployment, dec("200000"));
        assert_eq!(result.insurance.total, dec("2100000"));
        assert_eq!(result.income_before_tax, dec("17900000"));
        assert_eq!(result.deductions, dec("15400000"));
        assert_eq!(result.taxable_income, dec("2500000"));
        assert_eq!(result.personal_income_tax, dec("125000"));
        assert_eq!(result.total_deductions, dec("2225000"));
        assert_eq!(result.net, dec("17775000"));
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_flat_tax_20_million() {
        let mut request = create_test_request();
        request.tax_method = TaxMethod::Flat;

        let result = compute_net_from_gross(dec("20000000"), &request, &test_rate_table());

        assert_eq!(result.personal_income_tax, dec("1790000"));
        assert_eq!(result.net, dec("16110000"));
        assert_eq!(result.tax_details.len(), 7);
    }

    #[test]
    fn test_employer_cost_for_20_million() {
        let mut request = create_test_request();
        request.include_employer_union_fee = true;

        let result = compute_net_from_gross(dec("20000000"), &request, &test_rate_table());

        // 3.5M + 600k + 200k + 400k
        assert_eq!(result.employer.total, dec("4700000"));
        assert_eq!(result.total_employer_cost, dec("24700000"));
    }

    #[test]
    fn test_high_salary_caps_si_hi_contributions() {
        let result = compute_net_from_gross(dec("200000000"), &create_test_request(), &test_rate_table());

        assert_eq!(result.insurance.social, dec("3744000"));
        assert_eq!(result.insurance.health, dec("702000"));
        // UI capped at 20 x 5,220,000
        assert_eq!(result.insurance.unemployment, dec("1044000"));
    }

    #[test]
    fn test_zero_gross_nets_zero_not_negative() {
        let result = compute_net_from_gross(Decimal::ZERO, &create_test_request(), &test_rate_table());

        // Insurance is still assessed on the regional floor.
        assert_eq!(result.insurance.base_si_hi, dec("5220000"));
        assert_eq!(result.net, Decimal::ZERO);
        assert_eq!(result.personal_income_tax, Decimal::ZERO);
        assert!(result.income_before_tax < Decimal::ZERO);
    }

    #[test]
    fn test_negative_gross_treated_as_zero() {
        let result = compute_net_from_gross(dec("-1000"), &create_test_request(), &test_rate_table());

        assert_eq!(result.gross, Decimal::ZERO);
        assert_eq!(result.net, Decimal::ZERO);
    }

    #[test]
    fn test_gross_above_ceiling_is_clamped() {
        let mut request = create_test_request();
        request.include_employer_union_fee = true;

        let result = compute_net_from_gross(Decimal::MAX, &request, &test_rate_table());

        assert_eq!(result.gross, MAX_AMOUNT);
        assert!(result.net > Decimal::ZERO);
        assert!(result.total_employer_cost > MAX_AMOUNT);
        assert_eq!(result.gross - result.net, result.total_deductions);
    }

    #[test]
    fn test_income_below_deductions_pays_no_tax() {
        let result = compute_net_from_gross(dec("12000000"), &create_test_request(), &test_rate_table());

        assert_eq!(result.personal_income_tax, Decimal::ZERO);
        assert_eq!(result.net, dec("10740000"));
        assert!(result.tax_details.iter().all(|d| d.tax_in_bracket.is_zero()));
    }

    #[test]
    fn test_total_deductions_equals_gross_minus_net() {
        let result = compute_net_from_gross(dec("45000000"), &create_test_request(), &test_rate_table());

        assert_eq!(result.gross - result.net, result.total_deductions);
    }
}
