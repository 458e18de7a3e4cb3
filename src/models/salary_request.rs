//! Salary request model and its option enums.
//!
//! A [`SalaryRequest`] is built fresh for every calculation by the calling
//! layer (a form, the HTTP API) and is never mutated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest local-currency amount the engine computes with: 10^18.
///
/// Calculators clamp gross, targets and converted amounts to this ceiling
/// so that no intermediate sum or product can overflow a [`Decimal`].
/// [`SalaryRequest::validate`] rejects requests that exceed it.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Direction of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// The amount is a gross salary; compute net.
    GrossToNet,
    /// The amount is a target net salary; solve for gross.
    NetToGross,
}

/// Currency of the request amount.
///
/// `Vnd` is the local currency; the others are converted with the
/// request's exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Vietnamese dong (local currency).
    Vnd,
    /// US dollar.
    Usd,
    /// Japanese yen.
    Jpy,
}

impl Currency {
    /// Returns true for the local currency.
    pub fn is_local(self) -> bool {
        self == Currency::Vnd
    }
}

/// Which salary figure the insurance contributions are assessed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceBasis {
    /// Contributions are assessed on the gross salary.
    Official,
    /// Contributions are assessed on a declared custom base.
    Custom,
}

/// Personal income tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMethod {
    /// Progressive brackets after personal and dependent deductions.
    Progressive,
    /// A single flat rate on income after insurance, without deductions.
    Flat,
}

/// Employee nationality.
///
/// Foreign nationals are exempt from unemployment insurance. They are
/// otherwise treated as tax residents and use the progressive brackets;
/// the non-resident flat regime is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    /// Vietnamese national.
    Domestic,
    /// Foreign national.
    Foreign,
}

/// One of the four minimum-wage regions.
///
/// Serialised as the integer region number (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Region {
    /// Region I.
    One,
    /// Region II.
    Two,
    /// Region III.
    Three,
    /// Region IV.
    Four,
}

impl Region {
    /// All regions in ascending order.
    pub const ALL: [Region; 4] = [Region::One, Region::Two, Region::Three, Region::Four];

    /// Returns the region number (1 to 4).
    pub fn number(self) -> u8 {
        match self {
            Region::One => 1,
            Region::Two => 2,
            Region::Three => 3,
            Region::Four => 4,
        }
    }
}

impl TryFrom<u8> for Region {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Region::One),
            2 => Ok(Region::Two),
            3 => Ok(Region::Three),
            4 => Ok(Region::Four),
            other => Err(format!("region must be between 1 and 4, got {}", other)),
        }
    }
}

impl From<Region> for u8 {
    fn from(region: Region) -> Self {
        region.number()
    }
}

/// Input to a salary calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::{
///     CalculationMode, Currency, InsuranceBasis, Nationality, Region, SalaryRequest, TaxMethod,
/// };
/// use rust_decimal::Decimal;
///
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
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// The salary figure, in `currency`.
    pub amount: Decimal,
    /// Which direction to compute.
    pub mode: CalculationMode,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Local units per one foreign unit; required when `currency` is not local.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Which figure insurance is assessed on.
    pub insurance_basis: InsuranceBasis,
    /// Declared insurance base in local currency; required for `Custom`.
    #[serde(default)]
    pub custom_insurance_base: Option<Decimal>,
    /// Personal income tax regime.
    pub tax_method: TaxMethod,
    /// Minimum-wage region.
    pub region: Region,
    /// Number of declared dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Employee nationality.
    pub nationality: Nationality,
    /// Whether to add the employer trade-union fee to employer cost.
    #[serde(default)]
    pub include_employer_union_fee: bool,
}

impl SalaryRequest {
    /// Checks the request shape before it is handed to the engine.
    ///
    /// The calculators clamp rather than reject, so this is the calling
    /// layer's job. It rejects a negative amount, a missing or non-positive
    /// exchange rate for a foreign currency, and a missing or non-positive
    /// custom insurance base under [`InsuranceBasis::Custom`]. Amounts whose
    /// local-currency value exceeds [`MAX_AMOUNT`] are rejected as well.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(EngineError::InvalidRequest {
                field: "amount".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if !self.currency.is_local() {
            match self.exchange_rate {
                Some(rate) if rate > Decimal::ZERO => {}
                Some(_) => {
                    return Err(EngineError::InvalidRequest {
                        field: "exchange_rate".to_string(),
                        message: "must be positive".to_string(),
                    });
                }
                None => {
                    return Err(EngineError::InvalidRequest {
                        field: "exchange_rate".to_string(),
                        message: format!("required for currency {:?}", self.currency),
                    });
                }
            }
        }

        let local_amount = self.amount.checked_mul(self.conversion_factor());
        if !local_amount.is_some_and(|amount| amount <= MAX_AMOUNT) {
            return Err(EngineError::InvalidRequest {
                field: "amount".to_string(),
                message: format!("must not exceed {} in local currency", MAX_AMOUNT),
            });
        }

        if self.insurance_basis == InsuranceBasis::Custom {
            match self.custom_insurance_base {
                Some(base) if base > MAX_AMOUNT => {
                    return Err(EngineError::InvalidRequest {
                        field: "custom_insurance_base".to_string(),
                        message: format!("must not exceed {}", MAX_AMOUNT),
                    });
                }
                Some(base) if base > Decimal::ZERO => {}
                _ => {
                    return Err(EngineError::InvalidRequest {
                        field: "custom_insurance_base".to_string(),
                        message: "must be positive when insurance basis is custom".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the multiplier that converts `amount` into local currency.
    ///
    /// A local request, or a foreign one without a usable exchange rate,
    /// converts at 1.
    pub fn conversion_factor(&self) -> Decimal {
        match self.exchange_rate {
            Some(rate) if !self.currency.is_local() && rate > Decimal::ZERO => rate,
            _ => Decimal::ONE,
        }
    }
}
