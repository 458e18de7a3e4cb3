//! Statutory insurance calculation.
//!
//! Social (SI), health (HI) and unemployment (UI) insurance are assessed
//! on a base that is floored at the regional minimum wage and capped by
//! two independent ceilings: a multiple of the national base salary for
//! SI/HI and a multiple of the regional minimum wage for UI.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::{EmployeeInsurance, EmployerContributions, InsuranceBasis, SalaryRequest};

/// Insurance bases after flooring and capping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceBases {
    /// Base for social and health insurance.
    pub si_hi: Decimal,
    /// Base for unemployment insurance.
    pub ui: Decimal,
}

/// Determines the SI/HI and UI insurance bases for a gross salary.
///
/// The starting figure is the gross salary, or the declared custom base
/// when the request uses [`InsuranceBasis::Custom`] and supplies one. It is
/// floored at the regional minimum wage and then capped separately for
/// each base.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::insurance_bases;
/// use salary_engine::config::ConfigLoader;
/// # use salary_engine::models::*;
/// # use rust_decimal::Decimal;
/// # let request = SalaryRequest {
/// #     amount: Decimal::ZERO, mode: CalculationMode::GrossToNet, currency: Currency::Vnd,
/// #     exchange_rate: None, insurance_basis: InsuranceBasis::Official,
/// #     custom_insurance_base: None, tax_method: TaxMethod::Progressive, region: Region::One,
/// #     dependents: 0, nationality: Nationality::Domestic, include_employer_union_fee: false,
/// # };
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let bases = insurance_bases(Decimal::new(100_000_000, 0), &request, loader.latest());
/// assert_eq!(bases.si_hi, Decimal::new(46_800_000, 0));
/// assert_eq!(bases.ui, Decimal::new(100_000_000, 0));
/// ```
pub fn insurance_bases(gross: Decimal, request: &SalaryRequest, rates: &RateTable) -> InsuranceBases {
    let declared = match (request.insurance_basis, request.custom_insurance_base) {
        (InsuranceBasis::Custom, Some(custom)) => custom,
        _ => gross,
    };

    let floored = declared.max(rates.minimum_wage(request.region));

    InsuranceBases {
        si_hi: floored.min(rates.si_hi_cap()),
        ui: floored.min(rates.ui_cap(request.region)),
    }
}

/// Computes the employee's insurance contributions.
///
/// Foreign nationals use the foreign UI rate, which is zero in the
/// shipped tables.
pub fn employee_insurance(
    bases: InsuranceBases,
    request: &SalaryRequest,
    rates: &RateTable,
) -> EmployeeInsurance {
    let employee = &rates.employee_rates;

    let social = bases.si_hi * employee.social_insurance;
    let health = bases.si_hi * employee.health_insurance;
    let unemployment = bases.ui * employee.unemployment_insurance(request.nationality);

    EmployeeInsurance {
        base_si_hi: bases.si_hi,
        base_ui: bases.ui,
        social,
        health,
        unemployment,
        total: social + health + unemployment,
    }
}

/// Computes the employer's contributions.
///
/// The trade-union fee, when requested, is assessed on the gross salary
/// capped at the SI/HI ceiling. It ignores the regional floor
/// and any custom insurance base.
pub fn employer_contributions(
    gross: Decimal,
    bases: InsuranceBases,
    request: &SalaryRequest,
    rates: &RateTable,
) -> EmployerContributions {
    let employer = &rates.employer_rates;

    let social = bases.si_hi * employer.social_insurance;
    let health = bases.si_hi * employer.health_insurance;
    let unemployment = bases.ui * employer.unemployment_insurance(request.nationality);
    let union_fee = if request.include_employer_union_fee {
        gross.min(rates.si_hi_cap()) * employer.union_fee
    } else {
        Decimal::ZERO
    };

    EmployerContributions {
        social,
        health,
        unemployment,
        union_fee,
        total: social + health + unemployment + union_fee,
    }
}
