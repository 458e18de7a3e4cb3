//! Rate table types.
//!
//! This module contains the strongly-typed rate table deserialized from
//! YAML files. A table is immutable once loaded and is passed by reference
//! into every calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Nationality, Region};

/// Insurance rates paid by the employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// Social insurance rate.
    pub social_insurance: Decimal,
    /// Health insurance rate.
    pub health_insurance: Decimal,
    /// Unemployment insurance rate for Vietnamese nationals.
    pub unemployment_insurance_domestic: Decimal,
    /// Unemployment insurance rate for foreign nationals.
    pub unemployment_insurance_foreign: Decimal,
}

impl EmployeeRates {
    /// Unemployment insurance rate for the given nationality.
    pub fn unemployment_insurance(&self, nationality: Nationality) -> Decimal {
        match nationality {
            Nationality::Domestic => self.unemployment_insurance_domestic,
            Nationality::Foreign => self.unemployment_insurance_foreign,
        }
    }

    /// Combined employee insurance rate for the given nationality.
    pub fn total(&self, nationality: Nationality) -> Decimal {
        self.social_insurance + self.health_insurance + self.unemployment_insurance(nationality)
    }
}

/// Insurance rates and union fee paid by the employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerRates {
    /// Social insurance rate.
    pub social_insurance: Decimal,
    /// Health insurance rate.
    pub health_insurance: Decimal,
    /// Unemployment insurance rate for Vietnamese nationals.
    pub unemployment_insurance_domestic: Decimal,
    /// Unemployment insurance rate for foreign nationals.
    pub unemployment_insurance_foreign: Decimal,
    /// Trade-union fee rate.
    pub union_fee: Decimal,
}

impl EmployerRates {
    /// Unemployment insurance rate for the given nationality.
    pub fn unemployment_insurance(&self, nationality: Nationality) -> Decimal {
        match nationality {
            Nationality::Domestic => self.unemployment_insurance_domestic,
            Nationality::Foreign => self.unemployment_insurance_foreign,
        }
    }
}

/// A progressive tax bracket.
///
/// `upper_bound` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of taxable income for this bracket.
    pub lower_bound: Decimal,
    /// Upper bound of taxable income, or `None` when unbounded.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate.
    pub rate: Decimal,
    /// Display label.
    pub label: String,
}

impl TaxBracket {
    /// Width of the bracket, or `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// Tuning for the net-to-gross solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Maximum number of forward evaluations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Accepted absolute net difference, in local currency units.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// Average tax rate assumed when seeding the first gross estimate.
    #[serde(default = "default_assumed_average_tax_rate")]
    pub assumed_average_tax_rate: Decimal,
}

fn default_max_iterations() -> u32 {
    100
}

fn default_tolerance() -> Decimal {
    Decimal::ONE
}

fn default_assumed_average_tax_rate() -> Decimal {
    Decimal::new(15, 2)
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            assumed_average_tax_rate: default_assumed_average_tax_rate(),
        }
    }
}

/// A complete, versioned set of payroll constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Date from which this table applies.
    pub effective_date: NaiveDate,
    /// Human-readable name of the table.
    #[serde(default)]
    pub name: String,
    /// Statutory minimum wage per region.
    pub regional_minimum_wage: BTreeMap<Region, Decimal>,
    /// National base salary.
    pub base_salary: Decimal,
    /// Multiple of base salary capping the SI/HI base and the union fee base.
    pub insurance_cap_multiplier_base: u32,
    /// Multiple of the regional minimum wage capping the UI base.
    pub insurance_cap_multiplier_regional: u32,
    /// Employee insurance rates.
    pub employee_rates: EmployeeRates,
    /// Employer insurance rates and union fee.
    pub employer_rates: EmployerRates,
    /// Progressive brackets in ascending order.
    pub tax_brackets: Vec<TaxBracket>,
    /// Monthly personal deduction.
    pub personal_deduction: Decimal,
    /// Monthly deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Rate applied under flat taxation.
    pub flat_tax_rate: Decimal,
    /// Net-to-gross solver tuning.
    #[serde(default)]
    pub solver: SolverSettings,
}

impl RateTable {
    /// Minimum wage for a region. Zero if the region is absent, which
    /// [`RateTable::validate`] rules out for loaded tables.
    pub fn minimum_wage(&self, region: Region) -> Decimal {
        self.regional_minimum_wage
            .get(&region)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Ceiling for the social/health insurance base and the union fee base.
    pub fn si_hi_cap(&self) -> Decimal {
        Decimal::from(self.insurance_cap_multiplier_base) * self.base_salary
    }

    /// Ceiling for the unemployment insurance base in a region.
    pub fn ui_cap(&self, region: Region) -> Decimal {
        Decimal::from(self.insurance_cap_multiplier_regional) * self.minimum_wage(region)
    }

    /// Checks that the table is internally consistent.
    ///
    /// Brackets must start at zero, be contiguous with strictly increasing
    /// bounds and end with an unbounded bracket. Every region needs a
    /// minimum wage and no rate or amount may be negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable { message };

        for region in Region::ALL {
            if !self.regional_minimum_wage.contains_key(&region) {
                return Err(invalid(format!(
                    "missing minimum wage for region {}",
                    region.number()
                )));
            }
        }

        let amounts = [
            ("base_salary", self.base_salary),
            ("personal_deduction", self.personal_deduction),
            ("dependent_deduction", self.dependent_deduction),
            ("flat_tax_rate", self.flat_tax_rate),
            ("employee_rates.social_insurance", self.employee_rates.social_insurance),
            ("employee_rates.health_insurance", self.employee_rates.health_insurance),
            (
                "employee_rates.unemployment_insurance_domestic",
                self.employee_rates.unemployment_insurance_domestic,
            ),
            (
                "employee_rates.unemployment_insurance_foreign",
                self.employee_rates.unemployment_insurance_foreign,
            ),
            ("employer_rates.social_insurance", self.employer_rates.social_insurance),
            ("employer_rates.health_insurance", self.employer_rates.health_insurance),
            (
                "employer_rates.unemployment_insurance_domestic",
                self.employer_rates.unemployment_insurance_domestic,
            ),
            (
                "employer_rates.unemployment_insurance_foreign",
                self.employer_rates.unemployment_insurance_foreign,
            ),
            ("employer_rates.union_fee", self.employer_rates.union_fee),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(invalid(format!("{} must not be negative", field)));
            }
        }
        if let Some((region, _)) = self
            .regional_minimum_wage
            .iter()
            .find(|(_, wage)| **wage < Decimal::ZERO)
        {
            return Err(invalid(format!(
                "minimum wage for region {} must not be negative",
                region.number()
            )));
        }

        let first = self
            .tax_brackets
            .first()
            .ok_or_else(|| invalid("tax brackets are empty".to_string()))?;
        if !first.lower_bound.is_zero() {
            return Err(invalid(format!(
                "first tax bracket must start at 0, starts at {}",
                first.lower_bound
            )));
        }

        let last_index = self.tax_brackets.len() - 1;
        for (index, bracket) in self.tax_brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO {
                return Err(invalid(format!(
                    "tax bracket '{}' has a negative rate",
                    bracket.label
                )));
            }
            match bracket.upper_bound {
                Some(upper) => {
                    if upper <= bracket.lower_bound {
                        return Err(invalid(format!(
                            "tax bracket '{}' has upper bound {} not above lower bound {}",
                            bracket.label, upper, bracket.lower_bound
                        )));
                    }
                    if index == last_index {
                        return Err(invalid(format!(
                            "last tax bracket '{}' must be unbounded",
                            bracket.label
                        )));
                    }
                    let next = &self.tax_brackets[index + 1];
                    if next.lower_bound != upper {
                        return Err(invalid(format!(
                            "tax bracket '{}' starts at {} but previous bracket ends at {}",
                            next.label, next.lower_bound, upper
                        )));
                    }
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "only the last tax bracket may be unbounded, '{}' is not last",
                        bracket.label
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Builds the 2024-07 Vietnamese table in code for unit tests.
#[cfg(test)]
pub(crate) fn test_rate_table() -> RateTable {
    let d = |n: i64| Decimal::from(n);
    let pct = |n: i64, scale: u32| Decimal::new(n, scale);

    let bracket = |lower: i64, upper: Option<i64>, rate: i64, label: &str| TaxBracket {
        lower_bound: d(lower),
        upper_bound: upper.map(d),
        rate: pct(rate, 2),
        label: label.to_string(),
    };

    RateTable {
        effective_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        name: "test".to_string(),
        regional_minimum_wage: BTreeMap::from([
            (Region::One, d(5_220_000)),
            (Region::Two, d(4_650_000)),
            (Region::Three, d(4_080_000)),
            (Region::Four, d(3_650_000)),
        ]),
        base_salary: d(2_340_000),
        insurance_cap_multiplier_base: 20,
        insurance_cap_multiplier_regional: 20,
        employee_rates: EmployeeRates {
            social_insurance: pct(8, 2),
            health_insurance: pct(15, 3),
            unemployment_insurance_domestic: pct(1, 2),
            unemployment_insurance_foreign: Decimal::ZERO,
        },
        employer_rates: EmployerRates {
            social_insurance: pct(175, 3),
            health_insurance: pct(3, 2),
            unemployment_insurance_domestic: pct(1, 2),
            unemployment_insurance_foreign: Decimal::ZERO,
            union_fee: pct(2, 2),
        },
        tax_brackets: vec![
            bracket(0, Some(5_000_000), 5, "Đến 5 triệu"),
            bracket(5_000_000, Some(10_000_000), 10, "Trên 5tr đến 10tr"),
            bracket(10_000_000, Some(18_000_000), 15, "Trên 10tr đến 18tr"),
            bracket(18_000_000, Some(32_000_000), 20, "Trên 18tr đến 32tr"),
            bracket(32_000_000, Some(52_000_000), 25, "Trên 32tr đến 52tr"),
            bracket(52_000_000, Some(80_000_000), 30, "Trên 52tr đến 80tr"),
            bracket(80_000_000, None, 35, "Trên 80 triệu"),
        ],
        personal_deduction: d(11_000_000),
        dependent_deduction: d(4_400_000),
        flat_tax_rate: pct(10, 2),
        solver: SolverSettings::default(),
    }
}
