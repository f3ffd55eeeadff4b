//! Curve bindings exported to the front-end.

use crate::source::{js_samples, JsParam};
use anyhow::{anyhow, Context, Result};
use diminish_core::{BoundCurve, Curve, CurveKind, RenderSettings};
use js_sys::{Array, Object};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A curve bound to raw JS parameter values.
///
/// Parameters are coerced on every `evaluate`/`params_str` call, so binding a
/// slider object (anything with a numeric `value`) keeps the curve in sync
/// with the slider without rebuilding it.
#[wasm_bindgen]
pub struct WasmCurve {
    curve: Curve<JsParam>,
}

pub(crate) fn bind_curve(kind: &str, params: &JsValue) -> Result<Curve<JsParam>> {
    let kind: CurveKind = kind.parse()?;
    let mut entries = Vec::new();
    if !params.is_undefined() && !params.is_null() {
        let object = params
            .dyn_ref::<Object>()
            .ok_or_else(|| anyhow!("Parameters for {kind} must be an object."))?;
        for entry in Object::entries(object).iter() {
            let pair: Array = entry.unchecked_into();
            let name = pair
                .get(0)
                .as_string()
                .context("Parameter names must be strings.")?;
            entries.push((name, JsParam::new(pair.get(1))));
        }
    }
    Curve::from_params(kind, entries).with_context(|| format!("Failed to bind {kind}."))
}

#[wasm_bindgen]
impl WasmCurve {
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, params: JsValue) -> Result<WasmCurve, JsValue> {
        console_error_panic_hook::set_once();

        let curve =
            bind_curve(kind, &params).map_err(|err| JsValue::from_str(&format!("{err:#}")))?;
        Ok(WasmCurve { curve })
    }

    pub fn kind(&self) -> String {
        self.curve.kind().name().to_string()
    }

    pub fn param_names(&self) -> Vec<String> {
        self.curve
            .kind()
            .param_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Evaluates over flat input only: a `Float64Array`, an array of numbers or
    /// widget-likes, or one number (returned as a one-element array). Nested
    /// arrays are rejected; flatten them on the JS side.
    pub fn evaluate(&self, x: JsValue) -> Result<Vec<f64>, JsValue> {
        let samples = js_samples(&x).map_err(to_js_error)?;
        self.curve.evaluate_slice(&samples).map_err(to_js_error)
    }

    pub fn math_str(&self) -> String {
        self.curve.math_str().to_string()
    }

    pub fn params_str(
        &self,
        precision: Option<u32>,
        separator: Option<String>,
    ) -> Result<String, JsValue> {
        let defaults = RenderSettings::default();
        let settings = RenderSettings {
            precision: precision.map_or(defaults.precision, |p| p as usize),
            separator: separator.unwrap_or(defaults.separator),
        };
        self.curve
            .params_str_with_settings(&settings)
            .map_err(to_js_error)
    }
}

/// Static description of one curve kind for building UI controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSummary {
    pub kind: &'static str,
    pub math: &'static str,
    pub params: Vec<ParamSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSummary {
    pub name: &'static str,
    pub default: f64,
    pub description: &'static str,
}

pub(crate) fn catalog() -> Vec<CurveSummary> {
    CurveKind::ALL
        .into_iter()
        .map(|kind| CurveSummary {
            kind: kind.name(),
            math: kind.math_template(),
            params: kind
                .defaults()
                .iter()
                .map(|&(name, default)| ParamSummary {
                    name,
                    default,
                    description: kind.doc().param(name).map_or("", |doc| doc.description),
                })
                .collect(),
        })
        .collect()
}

#[wasm_bindgen]
pub fn curve_kinds() -> Vec<String> {
    CurveKind::ALL
        .into_iter()
        .map(|kind| kind.name().to_string())
        .collect()
}

#[wasm_bindgen]
pub fn curve_catalog() -> Result<JsValue, JsValue> {
    to_value(&catalog())
        .map_err(|err| JsValue::from_str(&format!("Failed to serialize catalog: {err}")))
}

/// Structured documentation for `kind`, for the front-end's doc renderer.
#[wasm_bindgen]
pub fn curve_doc(kind: &str) -> Result<JsValue, JsValue> {
    let kind: CurveKind = kind.parse().map_err(to_js_error)?;
    to_value(kind.doc())
        .map_err(|err| JsValue::from_str(&format!("Failed to serialize docs: {err}")))
}

/// Evaluates a serialized curve config such as `{kind: "kernel_gaussian", sigma: 4}`.
/// `x` follows the same flat-input rules as [`WasmCurve::evaluate`].
#[wasm_bindgen]
pub fn evaluate_curve_config(config: JsValue, x: JsValue) -> Result<Vec<f64>, JsValue> {
    let curve: Curve = from_value(config)
        .map_err(|err| JsValue::from_str(&format!("Invalid curve config: {err}")))?;
    let samples = js_samples(&x).map_err(to_js_error)?;
    curve.evaluate_slice(&samples).map_err(to_js_error)
}
