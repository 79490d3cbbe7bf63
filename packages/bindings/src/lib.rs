use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{de::DeserializeOwned, Serialize};

use farmerpay_core::FarmerPayResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// JSON in, analysis, JSON out. Parse and validation failures surface as
/// JavaScript exceptions carrying the error message.
fn call<I, O>(input_json: &str, analysis: fn(&I) -> FarmerPayResult<O>) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = analysis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Bank side
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_bank(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::bank::comparison::analyze_bank)
}

#[napi]
pub fn npa_sensitivity(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::sensitivity::npa::analyze_npa_sensitivity)
}

#[napi]
pub fn optimal_fee(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::sensitivity::fee::analyze_fee_optimization)
}

// ---------------------------------------------------------------------------
// Platform side
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_platform(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::platform::analysis::analyze_platform)
}

#[napi]
pub fn platform_scaling(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::sensitivity::scale::analyze_scaling)
}

#[napi]
pub fn growth_projection(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::projection::growth::analyze_growth)
}

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::sensitivity::scenario::compare_scenarios)
}

// ---------------------------------------------------------------------------
// Ecosystem
// ---------------------------------------------------------------------------

#[napi]
pub fn ecosystem_value(input_json: String) -> NapiResult<String> {
    call(&input_json, farmerpay_core::ecosystem::analyze_ecosystem)
}
