use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::eligibility::loan_limit::{eligibility, EligibilityRequest};
use crate::error::PropertyCalcError;
use crate::types::{Money, Percent};
use crate::PropertyCalcResult;

/// Income position plus the cash the buyer brings to the purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityRequest {
    #[serde(flatten)]
    pub income: EligibilityRequest,
    #[serde(default)]
    pub down_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub principal: Money,
    pub installment: Money,
    /// Eligible loan plus down payment
    pub total_property_value: Money,
}

impl AffordabilityRequest {
    pub fn new(income: EligibilityRequest, down_payment: Money) -> Self {
        Self {
            income,
            down_payment,
        }
    }
}

/// Most expensive property the borrower can buy.
pub fn affordability(
    request: &AffordabilityRequest,
    annual_interest_rate_pct: Percent,
    tenure_years: u32,
) -> PropertyCalcResult<AffordabilityResult> {
    if request.down_payment < Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }

    let loan = eligibility(&request.income, annual_interest_rate_pct, tenure_years)?;
    let total_property_value = loan
        .principal
        .checked_add(request.down_payment)
        .ok_or_else(|| {
            PropertyCalcError::invalid("down_payment", "Property value exceeds decimal range")
        })?;
    Ok(AffordabilityResult {
        principal: loan.principal,
        installment: loan.installment,
        total_property_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_request() -> AffordabilityRequest {
        AffordabilityRequest::new(
            EligibilityRequest::new(dec!(100_000), dec!(0)),
            dec!(100_000),
        )
    }

    #[test]
    fn test_property_value_adds_down_payment() {
        let res = affordability(&reference_request(), dec!(6.8), 16).unwrap();
        let loan = eligibility(&reference_request().income, dec!(6.8), 16).unwrap();
        assert_eq!(res.principal, loan.principal);
        assert_eq!(res.total_property_value, loan.principal + dec!(100_000));
    }

    #[test]
    fn test_no_income_headroom_leaves_down_payment() {
        let req = AffordabilityRequest::new(
            EligibilityRequest::new(dec!(10_000), dec!(9_000)),
            dec!(250_000),
        );
        let res = affordability(&req, dec!(9), 20).unwrap();
        assert_eq!(res.principal, Decimal::ZERO);
        assert_eq!(res.total_property_value, dec!(250_000));
    }

    #[test]
    fn test_negative_down_payment_rejected() {
        let mut req = reference_request();
        req.down_payment = dec!(-1);
        assert!(affordability(&req, dec!(6.8), 16).is_err());
    }

    #[test]
    fn test_property_value_beyond_decimal_range_rejected() {
        let mut req = reference_request();
        req.down_payment = Decimal::MAX;
        let err = affordability(&req, dec!(6.8), 16).unwrap_err();
        match err {
            PropertyCalcError::InvalidParameter { field, .. } => assert_eq!(field, "down_payment"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_flattened_json_shape() {
        let req: AffordabilityRequest = serde_json::from_str(
            r#"{
                "monthly_income": "75000",
                "existing_monthly_obligations": "5000",
                "down_payment": "100000"
            }"#,
        )
        .unwrap();
        assert_eq!(req.income.monthly_income, dec!(75_000));
        assert_eq!(req.income.income_utilization_ceiling, dec!(0.6));
        assert_eq!(req.down_payment, dec!(100_000));
    }
}
