use napi::Result as NapiResult;
use napi_derive::napi;

use allocation_chart_core::render::SvgRequest;
use allocation_chart_core::{compute_allocation_chart as compute_chart, AllocationInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Chart geometry
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_allocation_chart(input_json: String) -> NapiResult<String> {
    let input: AllocationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = compute_chart(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn render_allocation_svg(input_json: String) -> NapiResult<String> {
    let request: SvgRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    request.to_svg().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Gradients
// ---------------------------------------------------------------------------

#[napi]
pub fn gradient_vector(angle: f64) -> NapiResult<String> {
    if !angle.is_finite() {
        return Err(to_napi_error("angle must be a finite number"));
    }
    let v = allocation_chart_core::gradient::gradient_vector(angle);
    serde_json::to_string(&v).map_err(to_napi_error)
}
