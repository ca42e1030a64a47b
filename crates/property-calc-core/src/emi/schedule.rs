use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::emi::installment::{compute_installment, LoanParameters};
use crate::error::PropertyCalcError;
use crate::time_value::{periodic_rate, total_periods};
use crate::types::{round_money, Money, Rate, PERIODS_PER_YEAR};
use crate::PropertyCalcResult;

/// One monthly period of an amortisation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// 1-based period number
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub opening_balance: Money,
    /// Amount actually paid this period (interest + principal)
    pub installment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub closing_balance: Money,
}

/// Full period-by-period repayment plan with aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub periodic_installment: Money,
    pub periods: Vec<PeriodEntry>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_payment: Money,
}

/// Loan-year totals, as shown in a yearly repayment table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_year: Option<i32>,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
    /// Share of the original principal repaid by year end, in percent
    pub pct_repaid: Decimal,
}

/// Build the monthly schedule for a fixed-installment loan.
///
/// Balances are carried at full decimal precision. The final period repays
/// whatever balance remains, so the closing balance lands on exactly zero and
/// the principal portions sum to the original principal.
pub fn build_schedule(params: &LoanParameters) -> PropertyCalcResult<AmortizationSchedule> {
    let installment = compute_installment(params)?;
    let rate = periodic_rate(params.annual_interest_rate_pct);
    let n = total_periods(params.tenure_years)?;

    let mut periods = Vec::with_capacity(n as usize);
    let mut balance = params.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    for index in 1..=n {
        let opening = balance;
        let interest = opening.checked_mul(rate).ok_or_else(overflow)?;
        let mut principal_portion = installment - interest;

        if index == n {
            trace!(residue = %(opening - principal_portion), "final period clamp");
            principal_portion = opening;
        } else if principal_portion > opening {
            principal_portion = opening;
        }

        let paid = interest.checked_add(principal_portion).ok_or_else(overflow)?;
        balance = opening - principal_portion;

        total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;
        total_principal = total_principal
            .checked_add(principal_portion)
            .ok_or_else(overflow)?;
        total_payment = total_payment.checked_add(paid).ok_or_else(overflow)?;

        periods.push(PeriodEntry {
            index,
            due_date: due_date(params.start_date, index)?,
            opening_balance: opening,
            installment: paid,
            interest_portion: interest,
            principal_portion,
            closing_balance: balance,
        });
    }

    debug!(
        periods = n,
        total_interest = %total_interest,
        total_payment = %total_payment,
        "built amortisation schedule"
    );

    Ok(AmortizationSchedule {
        principal: params.principal,
        periodic_rate: rate,
        periodic_installment: installment,
        periods,
        total_interest,
        total_principal,
        total_payment,
    })
}

fn overflow() -> PropertyCalcError {
    PropertyCalcError::invalid("principal", "Schedule totals exceed decimal range")
}

fn due_date(start: Option<NaiveDate>, index: u32) -> PropertyCalcResult<Option<NaiveDate>> {
    match start {
        None => Ok(None),
        Some(date) => date
            .checked_add_months(Months::new(index - 1))
            .map(Some)
            .ok_or_else(|| {
                PropertyCalcError::DateError(format!("Period {index} falls outside the calendar"))
            }),
    }
}

impl AmortizationSchedule {
    /// Copy of the schedule with every amount rounded to `dp` places.
    /// For display only; rounded figures no longer satisfy the exact identities.
    pub fn rounded(&self, dp: u32) -> AmortizationSchedule {
        AmortizationSchedule {
            principal: round_money(self.principal, dp),
            periodic_rate: self.periodic_rate,
            periodic_installment: round_money(self.periodic_installment, dp),
            periods: self
                .periods
                .iter()
                .map(|p| PeriodEntry {
                    index: p.index,
                    due_date: p.due_date,
                    opening_balance: round_money(p.opening_balance, dp),
                    installment: round_money(p.installment, dp),
                    interest_portion: round_money(p.interest_portion, dp),
                    principal_portion: round_money(p.principal_portion, dp),
                    closing_balance: round_money(p.closing_balance, dp),
                })
                .collect(),
            total_interest: round_money(self.total_interest, dp),
            total_principal: round_money(self.total_principal, dp),
            total_payment: round_money(self.total_payment, dp),
        }
    }
}

impl YearSummary {
    pub fn rounded(&self, dp: u32) -> YearSummary {
        YearSummary {
            year: self.year,
            calendar_year: self.calendar_year,
            principal_paid: round_money(self.principal_paid, dp),
            interest_paid: round_money(self.interest_paid, dp),
            closing_balance: round_money(self.closing_balance, dp),
            pct_repaid: round_money(self.pct_repaid, 2),
        }
    }
}

/// Roll the monthly periods up into loan years.
pub fn summarize_by_year(schedule: &AmortizationSchedule) -> Vec<YearSummary> {
    let principal = schedule.principal;

    schedule
        .periods
        .chunks(PERIODS_PER_YEAR as usize)
        .enumerate()
        .map(|(i, chunk)| {
            let principal_paid: Money = chunk.iter().map(|p| p.principal_portion).sum();
            let interest_paid: Money = chunk.iter().map(|p| p.interest_portion).sum();
            let closing_balance = chunk
                .last()
                .map(|p| p.closing_balance)
                .unwrap_or(Decimal::ZERO);
            let pct_repaid = if principal.is_zero() {
                dec!(100)
            } else {
                (principal - closing_balance) / principal * dec!(100)
            };

            YearSummary {
                year: i as u32 + 1,
                calendar_year: chunk.first().and_then(|p| p.due_date).map(|d| d.year()),
                principal_paid,
                interest_paid,
                closing_balance,
                pct_repaid,
            }
        })
        .collect()
}
