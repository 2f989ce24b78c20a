//! WASM bindings for nm_core.
//!
//! Every export returns the same pretty-printed JSON report the `nm --json`
//! command prints, so the browser front-end can render traces without a
//! native process.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { rootfinding_trace, gauss_trace } from 'nm_core';
//!
//! await init();
//!
//! const report = JSON.parse(rootfinding_trace(1, 2, undefined, undefined, undefined, 1e-7, true));
//! for (const method of report.methods) {
//!   console.log(method.name, method.x, method.trace.length);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::report::{self, ReportError, RootFindingParams};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: ReportError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Run the four scalar methods on equation `eq` (1-4).
///
/// `a` and `b` override interval `interval` (1 or 2) and must be given
/// together. `x0` defaults to the interval midpoint.
#[wasm_bindgen]
pub fn rootfinding_trace(
    eq: usize,
    interval: usize,
    a: Option<f64>,
    b: Option<f64>,
    x0: Option<f64>,
    eps: f64,
    trace: bool,
) -> Result<String, JsValue> {
    let bounds = match (a, b) {
        (Some(a), Some(b)) => Some((a, b)),
        (None, None) => None,
        _ => return Err(JsValue::from_str("a and b must be given together")),
    };
    let params = RootFindingParams {
        equation: eq,
        interval,
        bounds,
        x0,
        eps,
    };

    report::rootfinding(&params, trace)
        .and_then(|r| report::to_json(&r))
        .map_err(to_js)
}

/// Gaussian elimination on system `system` (1-4).
#[wasm_bindgen]
pub fn gauss_trace(system: usize, trace: bool) -> Result<String, JsValue> {
    report::gauss(system, trace)
        .and_then(|r| report::to_json(&r))
        .map_err(to_js)
}

/// Jacobi and Gauss-Seidel on system `system` (1-4).
#[wasm_bindgen]
pub fn iterative_trace(system: usize, trace: bool) -> Result<String, JsValue> {
    report::iterative(system, trace)
        .and_then(|r| report::to_json(&r))
        .map_err(to_js)
}

/// Newton's method on nonlinear system `system` (1-4).
#[wasm_bindgen]
pub fn newton_systems_trace(system: usize, trace: bool) -> Result<String, JsValue> {
    report::newton_systems(system, trace)
        .and_then(|r| report::to_json(&r))
        .map_err(to_js)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
