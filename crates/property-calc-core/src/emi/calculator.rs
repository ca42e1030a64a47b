use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::emi::installment::LoanParameters;
use crate::emi::schedule::{build_schedule, summarize_by_year, AmortizationSchedule, YearSummary};
use crate::types::*;
use crate::PropertyCalcResult;

/// Output of the EMI calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub installment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    /// Total interest as a multiple of the principal
    pub interest_to_principal: Decimal,
    pub yearly: Vec<YearSummary>,
    pub schedule: AmortizationSchedule,
}

impl EmiOutput {
    /// Display copy: money to `dp` places, ratios to four.
    pub fn rounded(&self, dp: u32) -> EmiOutput {
        EmiOutput {
            installment: round_money(self.installment, dp),
            total_interest: round_money(self.total_interest, dp),
            total_payment: round_money(self.total_payment, dp),
            interest_to_principal: round_money(self.interest_to_principal, 4),
            yearly: self.yearly.iter().map(|y| y.rounded(dp)).collect(),
            schedule: self.schedule.rounded(dp),
        }
    }
}

/// Installment, totals, yearly breakdown and full schedule for a loan.
pub fn calculate_emi(
    params: &LoanParameters,
) -> PropertyCalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = build_schedule(params)?;

    if params.principal.is_zero() {
        warnings.push("Principal is zero; every installment is zero".into());
    }
    if params.annual_interest_rate_pct.is_zero() {
        warnings.push("Zero interest rate: installment is principal divided by periods".into());
    }

    let interest_to_principal = if params.principal.is_zero() {
        Decimal::ZERO
    } else {
        schedule.total_interest / params.principal
    };

    let output = EmiOutput {
        installment: schedule.periodic_installment,
        total_interest: schedule.total_interest,
        total_payment: schedule.total_payment,
        interest_to_principal,
        yearly: summarize_by_year(&schedule),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate monthly amortisation (reducing balance)",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_interest_rate_pct": params.annual_interest_rate_pct.to_string(),
            "tenure_years": params.tenure_years,
            "periods": params.tenure_years.saturating_mul(PERIODS_PER_YEAR),
        }),
        warnings,
        elapsed,
        output,
    ))
}
