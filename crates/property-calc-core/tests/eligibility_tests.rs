use pretty_assertions::assert_eq;
use proptest::prelude::{prop_assert, proptest};
use property_calc_core::eligibility::affordability::{affordability, AffordabilityRequest};
use property_calc_core::eligibility::calculator::{
    calculate_affordability, calculate_eligibility, AffordabilityInput, EligibilityInput,
};
use property_calc_core::eligibility::loan_limit::{
    eligibility, max_eligible_installment, EligibilityRequest,
};
use property_calc_core::eligibility::sensitivity::rate_sensitivity;
use property_calc_core::emi::installment::{compute_installment, LoanParameters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Eligibility
// ===========================================================================

#[test]
fn test_reference_eligibility_scenario() {
    // 1 lakh income, no obligations, 6.8% over 16 years
    let req = EligibilityRequest::new(dec!(100_000), dec!(0));
    assert_eq!(max_eligible_installment(&req).unwrap(), dec!(60_000));

    let res = eligibility(&req, dec!(6.8), 16).unwrap();
    let emi = compute_installment(&LoanParameters::new(res.principal, dec!(6.8), 16)).unwrap();
    assert!(
        (emi - dec!(60_000)).abs() < dec!(0.01),
        "Eligible principal should reproduce a 60,000 EMI, got {}",
        emi
    );
    assert!((res.principal - dec!(7_010_197.40)).abs() < dec!(0.01));
}

#[test]
fn test_obligations_reduce_eligibility() {
    let free = eligibility(&EligibilityRequest::new(dec!(100_000), dec!(0)), dec!(8), 20).unwrap();
    let burdened =
        eligibility(&EligibilityRequest::new(dec!(100_000), dec!(20_000)), dec!(8), 20).unwrap();
    assert_eq!(burdened.installment, dec!(40_000));
    assert!(burdened.principal < free.principal);
    // Linear in the installment
    assert!((burdened.principal * dec!(1.5) - free.principal).abs() < dec!(0.01));
}

#[test]
fn test_zero_rate_eligibility() {
    let res = eligibility(&EligibilityRequest::new(dec!(50_000), dec!(0)), dec!(0), 10).unwrap();
    assert_eq!(res.principal, dec!(30_000) * dec!(120));
}

// ===========================================================================
// Affordability
// ===========================================================================

#[test]
fn test_reference_affordability_scenario() {
    let req = AffordabilityRequest::new(
        EligibilityRequest::new(dec!(100_000), dec!(0)),
        dec!(100_000),
    );
    let loan = eligibility(&req.income, dec!(6.8), 16).unwrap();
    let res = affordability(&req, dec!(6.8), 16).unwrap();
    assert_eq!(res.total_property_value, loan.principal + dec!(100_000));
    assert_eq!(res.installment, dec!(60_000));
}

#[test]
fn test_affordability_calculator_from_json() {
    let input: AffordabilityInput = serde_json::from_value(serde_json::json!({
        "monthly_income": "75000",
        "existing_monthly_obligations": "5000",
        "down_payment": "100000",
        "annual_interest_rate_pct": "6.8",
        "tenure_years": 20,
        "include_schedule": true,
        "sensitivity_rates": ["7", "9"]
    }))
    .unwrap();

    let out = calculate_affordability(&input).unwrap();
    let res = &out.result;
    assert_eq!(res.installment, dec!(40_000));
    assert_eq!(res.down_payment, dec!(100_000));
    assert_eq!(res.rate_sensitivity.len(), 2);
    let sched = res.schedule.as_ref().unwrap();
    assert_eq!(sched.periods.len(), 240);
    assert_eq!(sched.principal, res.principal);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_eligibility_calculator_custom_ceiling() {
    let input: EligibilityInput = serde_json::from_value(serde_json::json!({
        "monthly_income": "100000",
        "income_utilization_ceiling": "0.5",
        "annual_interest_rate_pct": "9",
        "tenure_years": 25
    }))
    .unwrap();
    let out = calculate_eligibility(&input).unwrap();
    assert_eq!(out.result.installment, dec!(50_000));
    assert_eq!(out.result.installment_to_income_pct, dec!(50));
    assert_eq!(out.assumptions["income_utilization_ceiling"], "0.5");
}

#[test]
fn test_sweep_matches_point_estimates() {
    let req = AffordabilityRequest::new(
        EligibilityRequest::new(dec!(90_000), dec!(10_000)),
        dec!(500_000),
    );
    let rows = rate_sensitivity(&req, &[dec!(6), dec!(12)], 20).unwrap();
    for row in &rows {
        let point = affordability(&req, row.annual_interest_rate_pct, 20).unwrap();
        assert_eq!(row.principal, point.principal);
        assert_eq!(row.total_property_value, point.total_property_value);
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_eligible_principal_reproduces_cap(
        income in 0u64..2_000_000,
        obligations in 0u64..500_000,
        rate_bp in 0u32..2500,
        tenure in 1u32..36
    ) {
        let req = EligibilityRequest::new(Decimal::from(income), Decimal::from(obligations));
        let rate = Decimal::new(rate_bp as i64, 2);
        let res = eligibility(&req, rate, tenure).unwrap();
        prop_assert!(res.installment >= Decimal::ZERO);
        prop_assert!(res.principal >= Decimal::ZERO);

        let emi = compute_installment(&LoanParameters::new(res.principal, rate, tenure)).unwrap();
        prop_assert!((emi - res.installment).abs() < dec!(0.01));
    }
}
