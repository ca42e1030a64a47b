use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PropertyCalcError;
use crate::time_value::{annuity_payment, annuity_present_value, periodic_rate, total_periods};
use crate::types::{Money, Percent};
use crate::PropertyCalcResult;

/// Longest tenure accepted, in years
pub const MAX_TENURE_YEARS: u32 = 50;

/// Terms of a fixed-rate, monthly-amortising loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate in percent (7.5 = 7.5%)
    pub annual_interest_rate_pct: Percent,
    pub tenure_years: u32,
    /// Due date of the first installment; enables dated periods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_interest_rate_pct: Percent, tenure_years: u32) -> Self {
        Self {
            principal,
            annual_interest_rate_pct,
            tenure_years,
            start_date: None,
        }
    }

    pub fn validate(&self) -> PropertyCalcResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(
                "principal",
                "Principal cannot be negative",
            ));
        }
        validate_terms(self.annual_interest_rate_pct, self.tenure_years)
    }
}

/// Rate and tenure checks shared by the forward and inverse formulas.
pub(crate) fn validate_terms(
    annual_interest_rate_pct: Percent,
    tenure_years: u32,
) -> PropertyCalcResult<()> {
    if annual_interest_rate_pct < Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "annual_interest_rate_pct",
            "Interest rate cannot be negative",
        ));
    }
    if tenure_years < 1 {
        return Err(PropertyCalcError::invalid(
            "tenure_years",
            "Tenure must be at least 1 year",
        ));
    }
    if tenure_years > MAX_TENURE_YEARS {
        return Err(PropertyCalcError::invalid(
            "tenure_years",
            format!("Tenure cannot exceed {MAX_TENURE_YEARS} years"),
        ));
    }
    Ok(())
}

/// Equated monthly installment for the given loan.
pub fn compute_installment(params: &LoanParameters) -> PropertyCalcResult<Money> {
    params.validate()?;
    if params.principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let rate = periodic_rate(params.annual_interest_rate_pct);
    let n = total_periods(params.tenure_years)?;
    let installment = annuity_payment(params.principal, rate, n)?;

    debug!(
        principal = %params.principal,
        rate = %params.annual_interest_rate_pct,
        periods = n,
        installment = %installment,
        "computed installment"
    );
    Ok(installment)
}

/// Principal whose installment, at the given rate and tenure, equals
/// `target_installment`. Closed form; no iteration.
pub fn solve_principal_from_installment(
    target_installment: Money,
    annual_interest_rate_pct: Percent,
    tenure_years: u32,
) -> PropertyCalcResult<Money> {
    validate_terms(annual_interest_rate_pct, tenure_years)?;
    if target_installment <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let rate = periodic_rate(annual_interest_rate_pct);
    let n = total_periods(tenure_years)?;
    annuity_present_value(target_installment, rate, n)
}
