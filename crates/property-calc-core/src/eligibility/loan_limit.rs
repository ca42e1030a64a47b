use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emi::installment::solve_principal_from_installment;
use crate::error::PropertyCalcError;
use crate::types::{Money, Percent, Rate};
use crate::PropertyCalcResult;

/// Share of monthly income lenders allow towards installments
pub const DEFAULT_INCOME_UTILIZATION_CEILING: Rate = dec!(0.6);

fn default_ceiling() -> Rate {
    DEFAULT_INCOME_UTILIZATION_CEILING
}

/// Borrower income position used to size a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub monthly_income: Money,
    #[serde(default)]
    pub existing_monthly_obligations: Money,
    #[serde(default = "default_ceiling")]
    pub income_utilization_ceiling: Rate,
}

/// Largest loan the income supports, and the installment it implies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub principal: Money,
    pub installment: Money,
}

impl EligibilityRequest {
    pub fn new(monthly_income: Money, existing_monthly_obligations: Money) -> Self {
        Self {
            monthly_income,
            existing_monthly_obligations,
            income_utilization_ceiling: DEFAULT_INCOME_UTILIZATION_CEILING,
        }
    }

    pub fn validate(&self) -> PropertyCalcResult<()> {
        if self.monthly_income < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(
                "monthly_income",
                "Monthly income cannot be negative",
            ));
        }
        if self.existing_monthly_obligations < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(
                "existing_monthly_obligations",
                "Existing obligations cannot be negative",
            ));
        }
        if self.income_utilization_ceiling <= Decimal::ZERO
            || self.income_utilization_ceiling > Decimal::ONE
        {
            return Err(PropertyCalcError::invalid(
                "income_utilization_ceiling",
                "Ceiling must be a fraction in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// income * ceiling - obligations, floored at zero.
pub fn max_eligible_installment(request: &EligibilityRequest) -> PropertyCalcResult<Money> {
    request.validate()?;
    let headroom = request.monthly_income * request.income_utilization_ceiling
        - request.existing_monthly_obligations;
    Ok(headroom.max(Decimal::ZERO))
}

/// Loan size whose installment uses up exactly the income headroom.
pub fn eligibility(
    request: &EligibilityRequest,
    annual_interest_rate_pct: Percent,
    tenure_years: u32,
) -> PropertyCalcResult<EligibilityResult> {
    let installment = max_eligible_installment(request)?;
    let principal =
        solve_principal_from_installment(installment, annual_interest_rate_pct, tenure_years)?;

    debug!(installment = %installment, principal = %principal, "computed eligibility");
    Ok(EligibilityResult {
        principal,
        installment,
    })
}
