use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PropertyCalcError;
use crate::types::{Money, Percent, Rate, PERIODS_PER_YEAR};
use crate::PropertyCalcResult;

/// Periodic (monthly) rate from an annual percentage: 7.5 -> 0.00625
pub fn periodic_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(12) / dec!(100)
}

/// Number of monthly installments in a tenure of whole years
pub fn total_periods(tenure_years: u32) -> PropertyCalcResult<u32> {
    tenure_years
        .checked_mul(PERIODS_PER_YEAR)
        .ok_or_else(|| PropertyCalcError::invalid("tenure_years", "Tenure is too long"))
}

/// (1 + r)^n by repeated multiplication, failing instead of overflowing.
pub fn compound_factor(rate: Rate, nper: u32) -> PropertyCalcResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..nper {
        result = result.checked_mul(one_plus_r).ok_or_else(|| {
            PropertyCalcError::invalid(
                "annual_interest_rate_pct",
                "Rate and tenure compound beyond decimal range",
            )
        })?;
    }
    Ok(result)
}

/// Level payment that fully amortises `present_value` over `nper` periods.
///
/// P * r * (1+r)^n / ((1+r)^n - 1), written as P * r / (1 - (1+r)^-n) so the
/// intermediate product never exceeds the principal.
pub fn annuity_payment(present_value: Money, rate: Rate, nper: u32) -> PropertyCalcResult<Money> {
    if nper == 0 {
        return Err(PropertyCalcError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    let n = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(present_value / n);
    }

    let factor = compound_factor(rate, nper)?;
    let discount = Decimal::ONE - Decimal::ONE / factor;
    // A rate too small to move (1+r) at 28 digits behaves as zero
    if discount.is_zero() {
        return Ok(present_value / n);
    }

    present_value
        .checked_mul(rate)
        .and_then(|v| v.checked_div(discount))
        .ok_or_else(|| PropertyCalcError::invalid("principal", "Payment exceeds decimal range"))
}

/// Present value of `nper` level payments; the inverse of [`annuity_payment`].
pub fn annuity_present_value(payment: Money, rate: Rate, nper: u32) -> PropertyCalcResult<Money> {
    let n = Decimal::from(nper);
    if rate.is_zero() {
        return payment.checked_mul(n).ok_or_else(pv_overflow);
    }

    let factor = compound_factor(rate, nper)?;
    let discount = Decimal::ONE - Decimal::ONE / factor;
    if discount.is_zero() {
        return payment.checked_mul(n).ok_or_else(pv_overflow);
    }

    payment
        .checked_mul(discount)
        .and_then(|v| v.checked_div(rate))
        .ok_or_else(pv_overflow)
}

fn pv_overflow() -> PropertyCalcError {
    PropertyCalcError::invalid("installment", "Present value exceeds decimal range")
}
