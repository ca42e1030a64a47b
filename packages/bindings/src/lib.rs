use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: property_calc_core::emi::installment::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        property_calc_core::emi::calculator::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare schedule, without the envelope, for charting.
#[napi]
pub fn build_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: property_calc_core::emi::installment::LoanParameters =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule =
        property_calc_core::emi::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility & affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_eligibility(input_json: String) -> NapiResult<String> {
    let input: property_calc_core::eligibility::calculator::EligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_calc_core::eligibility::calculator::calculate_eligibility(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_affordability(input_json: String) -> NapiResult<String> {
    let input: property_calc_core::eligibility::calculator::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_calc_core::eligibility::calculator::calculate_affordability(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Area
// ---------------------------------------------------------------------------

#[napi]
pub fn convert_area(input_json: String) -> NapiResult<String> {
    let input: property_calc_core::area::conversion::AreaConversionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property_calc_core::area::conversion::conversion_table(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
