//! Salary calculation entry point.
//!
//! Converts the request amount to local currency, runs the forward
//! calculator or the inverse solver depending on the mode, and converts
//! the headline figures back to the request currency.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{CalculationMode, MAX_AMOUNT, SalaryRequest, SalaryResult};

use super::gross_to_net::compute_net_from_gross;
use super::net_to_gross::compute_gross_from_net;

/// Computes a salary result for a request.
///
/// The echoed input figure (`gross` in gross-to-net mode, `net` otherwise)
/// is the unconverted request amount; the computed figure is the local
/// result divided by the exchange rate. The breakdown is always in local
/// currency.
///
/// The request is not validated here. A foreign-currency request without a
/// positive exchange rate is treated as if the amount were already local,
/// and a converted amount beyond [`MAX_AMOUNT`] is computed at the ceiling.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_salary;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let request = SalaryRequest {
///     amount: Decimal::new(1_000, 0),
///     mode: CalculationMode::GrossToNet,
///     currency: Currency::Usd,
///     exchange_rate: Some(Decimal::new(25_000, 0)),
///     insurance_basis: InsuranceBasis::Official,
///     custom_insurance_base: None,
///     tax_method: TaxMethod::Progressive,
///     region: Region::One,
///     dependents: 0,
///     nationality: Nationality::Domestic,
///     include_employer_union_fee: false,
/// };
///
/// let result = compute_salary(&request, loader.latest());
/// assert_eq!(result.gross, Decimal::new(1_000, 0));
/// assert_eq!(result.breakdown.gross, Decimal::new(25_000_000, 0));
/// ```
pub fn compute_salary(request: &SalaryRequest, rates: &RateTable) -> SalaryResult {
    let factor = request.conversion_factor();
    let amount_local = request
        .amount
        .max(Decimal::ZERO)
        .checked_mul(factor)
        .map_or(MAX_AMOUNT, |amount| amount.min(MAX_AMOUNT));

    let (breakdown, gross, net) = match request.mode {
        CalculationMode::GrossToNet => {
            let breakdown = compute_net_from_gross(amount_local, request, rates);
            let net = to_request_currency(breakdown.net, factor);
            (breakdown, request.amount, net)
        }
        CalculationMode::NetToGross => {
            let breakdown = compute_gross_from_net(amount_local, request, rates);
            let gross = to_request_currency(breakdown.gross, factor);
            (breakdown, gross, request.amount)
        }
    };

    SalaryResult {
        gross,
        net,
        breakdown,
        currency: request.currency,
        original_amount: request.amount,
        is_gross_mode: request.mode == CalculationMode::GrossToNet,
        dependents: request.dependents,
        exchange_rate: (!request.currency.is_local()).then_some(factor),
    }
}

fn to_request_currency(local: Decimal, factor: Decimal) -> Decimal {
    if factor == Decimal::ONE {
        local
    } else {
        local.checked_div(factor).unwrap_or(Decimal::MAX)
    }
}
