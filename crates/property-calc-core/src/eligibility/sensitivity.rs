use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::eligibility::affordability::{affordability, AffordabilityRequest};
use crate::types::{round_money, Money, Percent};
use crate::PropertyCalcResult;

/// Loan size and property value at one candidate rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSensitivityRow {
    pub annual_interest_rate_pct: Percent,
    pub principal: Money,
    pub total_property_value: Money,
}

impl RateSensitivityRow {
    pub fn rounded(&self, dp: u32) -> RateSensitivityRow {
        RateSensitivityRow {
            annual_interest_rate_pct: self.annual_interest_rate_pct,
            principal: round_money(self.principal, dp),
            total_property_value: round_money(self.total_property_value, dp),
        }
    }
}

/// 6%, 8%, ... 20%
pub fn default_sensitivity_rates() -> Vec<Percent> {
    (3..=10).map(|step| Decimal::from(step * 2)).collect()
}

/// Re-size the loan at each rate, holding income, obligations and tenure fixed.
pub fn rate_sensitivity(
    request: &AffordabilityRequest,
    rates: &[Percent],
    tenure_years: u32,
) -> PropertyCalcResult<Vec<RateSensitivityRow>> {
    rates
        .iter()
        .map(|&rate| {
            let res = affordability(request, rate, tenure_years)?;
            Ok(RateSensitivityRow {
                annual_interest_rate_pct: rate,
                principal: res.principal,
                total_property_value: res.total_property_value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::loan_limit::EligibilityRequest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rates() {
        assert_eq!(
            default_sensitivity_rates(),
            vec![dec!(6), dec!(8), dec!(10), dec!(12), dec!(14), dec!(16), dec!(18), dec!(20)]
        );
    }

    #[test]
    fn test_principal_falls_as_rate_rises() {
        let req = AffordabilityRequest::new(
            EligibilityRequest::new(dec!(75_000), dec!(0)),
            dec!(100_000),
        );
        let rows = rate_sensitivity(&req, &default_sensitivity_rates(), 20).unwrap();
        assert_eq!(rows.len(), 8);
        for pair in rows.windows(2) {
            assert!(pair[1].principal < pair[0].principal);
        }
        for row in &rows {
            assert_eq!(row.total_property_value, row.principal + dec!(100_000));
        }
    }

    #[test]
    fn test_invalid_rate_in_sweep_fails() {
        let income = EligibilityRequest::new(dec!(75_000), dec!(0));
        let req = AffordabilityRequest::new(income, dec!(0));
        assert!(rate_sensitivity(&req, &[dec!(8), dec!(-1)], 20).is_err());
    }
}
