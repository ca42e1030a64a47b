use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::eligibility::affordability::{affordability, AffordabilityRequest};
use crate::eligibility::loan_limit::{eligibility, EligibilityRequest};
use crate::eligibility::sensitivity::{
    default_sensitivity_rates, rate_sensitivity, RateSensitivityRow,
};
use crate::emi::installment::LoanParameters;
use crate::emi::schedule::{build_schedule, AmortizationSchedule};
use crate::types::*;
use crate::PropertyCalcResult;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    #[serde(flatten)]
    pub request: EligibilityRequest,
    pub annual_interest_rate_pct: Percent,
    pub tenure_years: u32,
    /// Attach the monthly schedule of the eligible loan
    #[serde(default)]
    pub include_schedule: bool,
    /// Rates for the sensitivity sweep; 6-20% in steps of 2 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_rates: Option<Vec<Percent>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    #[serde(flatten)]
    pub request: AffordabilityRequest,
    pub annual_interest_rate_pct: Percent,
    pub tenure_years: u32,
    #[serde(default)]
    pub include_schedule: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_rates: Option<Vec<Percent>>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutput {
    pub principal: Money,
    pub installment: Money,
    /// Installment as a percentage of monthly income
    pub installment_to_income_pct: Decimal,
    pub total_interest: Money,
    pub total_payment: Money,
    pub rate_sensitivity: Vec<RateSensitivityRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AmortizationSchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub principal: Money,
    pub installment: Money,
    pub down_payment: Money,
    pub total_property_value: Money,
    /// Loan as a percentage of the property value
    pub loan_to_value_pct: Decimal,
    pub installment_to_income_pct: Decimal,
    pub total_interest: Money,
    pub total_payment: Money,
    pub rate_sensitivity: Vec<RateSensitivityRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AmortizationSchedule>,
}

impl EligibilityOutput {
    pub fn rounded(&self, dp: u32) -> EligibilityOutput {
        EligibilityOutput {
            principal: round_money(self.principal, dp),
            installment: round_money(self.installment, dp),
            installment_to_income_pct: round_money(self.installment_to_income_pct, 2),
            total_interest: round_money(self.total_interest, dp),
            total_payment: round_money(self.total_payment, dp),
            rate_sensitivity: self.rate_sensitivity.iter().map(|r| r.rounded(dp)).collect(),
            schedule: self.schedule.as_ref().map(|s| s.rounded(dp)),
        }
    }
}

impl AffordabilityOutput {
    pub fn rounded(&self, dp: u32) -> AffordabilityOutput {
        AffordabilityOutput {
            principal: round_money(self.principal, dp),
            installment: round_money(self.installment, dp),
            down_payment: round_money(self.down_payment, dp),
            total_property_value: round_money(self.total_property_value, dp),
            loan_to_value_pct: round_money(self.loan_to_value_pct, 2),
            installment_to_income_pct: round_money(self.installment_to_income_pct, 2),
            total_interest: round_money(self.total_interest, dp),
            total_payment: round_money(self.total_payment, dp),
            rate_sensitivity: self.rate_sensitivity.iter().map(|r| r.rounded(dp)).collect(),
            schedule: self.schedule.as_ref().map(|s| s.rounded(dp)),
        }
    }
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

/// Maximum loan for an income, with repayment totals and a rate sweep.
pub fn calculate_eligibility(
    input: &EligibilityInput,
) -> PropertyCalcResult<ComputationOutput<EligibilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = eligibility(&input.request, input.annual_interest_rate_pct, input.tenure_years)?;
    headroom_warnings(&input.request, loan.installment, &mut warnings);

    let schedule = build_schedule(&LoanParameters::new(
        loan.principal,
        input.annual_interest_rate_pct,
        input.tenure_years,
    ))?;

    let sweep_request = AffordabilityRequest::new(input.request.clone(), Decimal::ZERO);
    let rates = input
        .sensitivity_rates
        .clone()
        .unwrap_or_else(default_sensitivity_rates);
    let sweep = rate_sensitivity(&sweep_request, &rates, input.tenure_years)?;

    let output = EligibilityOutput {
        principal: loan.principal,
        installment: loan.installment,
        installment_to_income_pct: pct_of(loan.installment, input.request.monthly_income),
        total_interest: schedule.total_interest,
        total_payment: schedule.total_payment,
        rate_sensitivity: sweep,
        schedule: input.include_schedule.then_some(schedule),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Income-capped installment, inverted through the annuity formula",
        &serde_json::json!({
            "monthly_income": input.request.monthly_income.to_string(),
            "existing_monthly_obligations": input.request.existing_monthly_obligations.to_string(),
            "income_utilization_ceiling": input.request.income_utilization_ceiling.to_string(),
            "annual_interest_rate_pct": input.annual_interest_rate_pct.to_string(),
            "tenure_years": input.tenure_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Eligible loan plus down payment, with loan-to-value and a rate sweep.
pub fn calculate_affordability(
    input: &AffordabilityInput,
) -> PropertyCalcResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let res = affordability(&input.request, input.annual_interest_rate_pct, input.tenure_years)?;
    headroom_warnings(&input.request.income, res.installment, &mut warnings);
    if res.total_property_value.is_zero() {
        warnings.push("No loan capacity and no down payment: nothing is affordable".into());
    }

    let schedule = build_schedule(&LoanParameters::new(
        res.principal,
        input.annual_interest_rate_pct,
        input.tenure_years,
    ))?;

    let rates = input
        .sensitivity_rates
        .clone()
        .unwrap_or_else(default_sensitivity_rates);
    let sweep = rate_sensitivity(&input.request, &rates, input.tenure_years)?;

    let output = AffordabilityOutput {
        principal: res.principal,
        installment: res.installment,
        down_payment: input.request.down_payment,
        total_property_value: res.total_property_value,
        loan_to_value_pct: pct_of(res.principal, res.total_property_value),
        installment_to_income_pct: pct_of(res.installment, input.request.income.monthly_income),
        total_interest: schedule.total_interest,
        total_payment: schedule.total_payment,
        rate_sensitivity: sweep,
        schedule: input.include_schedule.then_some(schedule),
    };

    let income = &input.request.income;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Eligible loan plus down payment",
        &serde_json::json!({
            "monthly_income": income.monthly_income.to_string(),
            "existing_monthly_obligations": income.existing_monthly_obligations.to_string(),
            "income_utilization_ceiling": income.income_utilization_ceiling.to_string(),
            "down_payment": input.request.down_payment.to_string(),
            "annual_interest_rate_pct": input.annual_interest_rate_pct.to_string(),
            "tenure_years": input.tenure_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn headroom_warnings(request: &EligibilityRequest, installment: Money, warnings: &mut Vec<String>) {
    if request.monthly_income.is_zero() {
        warnings.push("Monthly income is zero; no installment capacity".into());
    } else if installment.is_zero() {
        warnings.push(format!(
            "Existing obligations use the full {}% income ceiling; no installment capacity",
            (request.income_utilization_ceiling * dec!(100)).normalize()
        ));
    }
}

fn pct_of(part: Money, whole: Money) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * dec!(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eligibility_input() -> EligibilityInput {
        EligibilityInput {
            request: EligibilityRequest::new(dec!(100_000), dec!(0)),
            annual_interest_rate_pct: dec!(6.8),
            tenure_years: 16,
            include_schedule: false,
            sensitivity_rates: None,
        }
    }

    #[test]
    fn test_eligibility_output() {
        let out = calculate_eligibility(&eligibility_input()).unwrap();
        let res = &out.result;
        assert_eq!(res.installment, dec!(60_000));
        assert_eq!(res.installment_to_income_pct, dec!(60));
        assert!(res.schedule.is_none());
        assert_eq!(res.rate_sensitivity.len(), 8);
        assert!((res.total_payment - dec!(60_000) * dec!(192)).abs() < dec!(0.01));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_eligibility_with_schedule() {
        let mut input = eligibility_input();
        input.include_schedule = true;
        input.sensitivity_rates = Some(vec![dec!(7)]);
        let out = calculate_eligibility(&input).unwrap();
        let sched = out.result.schedule.unwrap();
        assert_eq!(sched.periods.len(), 192);
        assert!((sched.periodic_installment - dec!(60_000)).abs() < dec!(0.01));
        assert_eq!(out.result.rate_sensitivity.len(), 1);
    }

    #[test]
    fn test_eligibility_warns_when_obligations_exhaust_ceiling() {
        let mut input = eligibility_input();
        input.request.existing_monthly_obligations = dec!(70_000);
        let out = calculate_eligibility(&input).unwrap();
        assert_eq!(out.result.principal, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_affordability_output() {
        let input = AffordabilityInput {
            request: AffordabilityRequest::new(
                EligibilityRequest::new(dec!(100_000), dec!(0)),
                dec!(100_000),
            ),
            annual_interest_rate_pct: dec!(6.8),
            tenure_years: 16,
            include_schedule: false,
            sensitivity_rates: None,
        };
        let out = calculate_affordability(&input).unwrap();
        let res = &out.result;
        assert_eq!(res.total_property_value, res.principal + dec!(100_000));
        assert!(res.loan_to_value_pct > dec!(98) && res.loan_to_value_pct < dec!(99));
        for row in &res.rate_sensitivity {
            assert_eq!(row.total_property_value, row.principal + dec!(100_000));
        }
    }

    #[test]
    fn test_affordability_nothing_affordable_warns() {
        let input = AffordabilityInput {
            request: AffordabilityRequest::new(EligibilityRequest::new(dec!(0), dec!(0)), dec!(0)),
            annual_interest_rate_pct: dec!(8),
            tenure_years: 10,
            include_schedule: false,
            sensitivity_rates: Some(vec![]),
        };
        let out = calculate_affordability(&input).unwrap();
        assert_eq!(out.result.loan_to_value_pct, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 2);
    }
}
