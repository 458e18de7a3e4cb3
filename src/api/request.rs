//! Request types for the salary engine API.
//!
//! This module defines the JSON request body for the `/salary` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::SalaryRequest;

/// Request body for the `/salary` endpoint.
///
/// The salary request fields sit at the top level of the body, next to an
/// optional date selecting which rate table version to apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The salary request.
    #[serde(flatten)]
    pub salary: SalaryRequest,
    /// Apply the rate table in effect on this date instead of the latest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationMode, Region};
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_flat_body() {
        let json = r#"{
            "amount": "20000000",
            "mode": "gross_to_net",
            "currency": "VND",
            "insurance_basis": "official",
            "tax_method": "progressive",
            "region": 2,
            "dependents": 1,
            "nationality": "domestic"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.salary.amount, Decimal::new(20_000_000, 0));
        assert_eq!(request.salary.mode, CalculationMode::GrossToNet);
        assert_eq!(request.salary.region, Region::Two);
        assert!(request.effective_date.is_none());
    }

    #[test]
    fn test_deserialize_with_effective_date() {
        let json = r#"{
            "amount": "20000000",
            "mode": "net_to_gross",
            "currency": "VND",
            "insurance_basis": "official",
            "tax_method": "flat",
            "region": 1,
            "nationality": "foreign",
            "effective_date": "2024-01-15"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.effective_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{ "amount": "20000000" }"#;

        let result: Result<CalculationRequest, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field"));
    }
}
