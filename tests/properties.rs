//! Property tests for the salary calculators against the shipped rate table.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

use salary_engine::calculation::{compute_gross_from_net, compute_net_from_gross};
use salary_engine::config::{ConfigLoader, RateTable};
use salary_engine::models::{
    CalculationMode, Currency, InsuranceBasis, Nationality, Region, SalaryRequest, TaxMethod,
};

fn rates() -> RateTable {
    ConfigLoader::load("./config/vn")
        .expect("Failed to load config")
        .latest()
        .clone()
}

fn region(index: u8) -> Region {
    Region::try_from(index % 4 + 1).unwrap()
}

fn request(
    region_index: u8,
    dependents: u32,
    foreign: bool,
    flat: bool,
    mode: CalculationMode,
) -> SalaryRequest {
    SalaryRequest {
        amount: Decimal::ZERO,
        mode,
        currency: Currency::Vnd,
        exchange_rate: None,
        insurance_basis: InsuranceBasis::Official,
        custom_insurance_base: None,
        tax_method: if flat { TaxMethod::Flat } else { TaxMethod::Progressive },
        region: region(region_index),
        dependents,
        nationality: if foreign {
            Nationality::Foreign
        } else {
            Nationality::Domestic
        },
        include_employer_union_fee: false,
    }
}

/// `None` keeps the official basis; `Some(base)` declares a custom one.
fn with_basis(mut request: SalaryRequest, custom_base: Option<u64>, union_fee: bool) -> SalaryRequest {
    if let Some(base) = custom_base {
        request.insurance_basis = InsuranceBasis::Custom;
        request.custom_insurance_base = Some(Decimal::from(base));
    }
    request.include_employer_union_fee = union_fee;
    request
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    /// Net from a gross, solved back to gross, lands within 1,000 VND.
    /// The gross range spans every bracket boundary and both caps. A custom
    /// base up to 80M keeps the fixed insurance below 6M, so net stays
    /// positive.
    #[test]
    fn prop_net_to_gross_round_trips(
        gross in 6_000_000u64..250_000_000,
        region_index in 0u8..4,
        dependents in 0u32..4,
        foreign in proptest::bool::ANY,
        flat in proptest::bool::ANY,
        custom_base in proptest::option::of(1u64..80_000_000),
        union_fee in proptest::bool::ANY,
    ) {
        let rates = rates();
        let gross = Decimal::from(gross);
        let forward_request = with_basis(
            request(region_index, dependents, foreign, flat, CalculationMode::GrossToNet),
            custom_base,
            union_fee,
        );
        let forward = compute_net_from_gross(gross, &forward_request, &rates);

        let inverse_request = with_basis(
            request(region_index, dependents, foreign, flat, CalculationMode::NetToGross),
            custom_base,
            union_fee,
        );
        let inverse = compute_gross_from_net(forward.net, &inverse_request, &rates);

        prop_assert!(inverse.converged, "target {} did not converge", forward.net);
        prop_assert!(
            (inverse.gross - gross).abs() <= Decimal::from(1_000),
            "gross {} solved back to {}", gross, inverse.gross
        );
    }

    /// Raising gross never lowers net.
    #[test]
    fn prop_net_is_monotonic_in_gross(
        gross in 0u64..200_000_000,
        step in 1u64..20_000_000,
        region_index in 0u8..4,
        dependents in 0u32..4,
        foreign in proptest::bool::ANY,
        flat in proptest::bool::ANY,
        custom_base in proptest::option::of(1u64..80_000_000),
    ) {
        let rates = rates();
        let req = with_basis(
            request(region_index, dependents, foreign, flat, CalculationMode::GrossToNet),
            custom_base,
            false,
        );

        let lower = compute_net_from_gross(Decimal::from(gross), &req, &rates);
        let higher = compute_net_from_gross(Decimal::from(gross + step), &req, &rates);

        prop_assert!(higher.net >= lower.net, "net({}) = {} > net({}) = {}",
            gross, lower.net, gross + step, higher.net);
    }

    /// Above 20 x base salary, SI and HI stop growing with gross.
    #[test]
    fn prop_si_hi_capped_for_high_salaries(
        gross in 46_800_000u64..1_000_000_000,
        region_index in 0u8..4,
    ) {
        let rates = rates();
        let req = request(region_index, 0, false, false, CalculationMode::GrossToNet);
        let result = compute_net_from_gross(Decimal::from(gross), &req, &rates);

        let cap = Decimal::from(20) * rates.base_salary;
        prop_assert_eq!(result.insurance.social, cap * rates.employee_rates.social_insurance);
        prop_assert_eq!(result.insurance.health, cap * rates.employee_rates.health_insurance);
    }

    /// Bracket detail always has one row per bracket and sums to the taxable income.
    #[test]
    fn prop_bracket_detail_is_complete(
        gross in 0u64..500_000_000,
        dependents in 0u32..5,
        flat in proptest::bool::ANY,
    ) {
        let rates = rates();
        let req = request(0, dependents, false, flat, CalculationMode::GrossToNet);
        let result = compute_net_from_gross(Decimal::from(gross), &req, &rates);

        prop_assert_eq!(result.tax_details.len(), rates.tax_brackets.len());
        if !flat {
            let total: Decimal = result.tax_details.iter().map(|d| d.income_in_bracket).sum();
            prop_assert_eq!(total, result.taxable_income);
            let tax: Decimal = result.tax_details.iter().map(|d| d.tax_in_bracket).sum();
            prop_assert_eq!(tax, result.personal_income_tax);
        }
    }

    /// Foreign nationals never pay unemployment insurance on either side.
    #[test]
    fn prop_foreign_nationals_exempt_from_unemployment_insurance(
        gross in 0u64..500_000_000,
        region_index in 0u8..4,
    ) {
        let rates = rates();
        let req = request(region_index, 0, true, false, CalculationMode::GrossToNet);
        let result = compute_net_from_gross(Decimal::from(gross), &req, &rates);

        prop_assert!(result.insurance.unemployment.is_zero());
        prop_assert!(result.employer.unemployment.is_zero());
    }
}
