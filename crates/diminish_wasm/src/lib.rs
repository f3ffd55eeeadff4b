//! WebAssembly bindings for the interactive curve explorer.

mod curve;
mod source;

pub use curve::{
    curve_catalog, curve_doc, curve_kinds, evaluate_curve_config, CurveSummary, ParamSummary,
    WasmCurve,
};
pub use source::{js_number, js_samples, JsParam};
