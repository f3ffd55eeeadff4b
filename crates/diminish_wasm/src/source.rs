//! Reading numbers out of raw JS values.
//!
//! A parameter may be a number, a numeric string, or a widget-like object
//! (a slider, an input element) exposing its current number as `value`.

use diminish_core::{CurveError, NumericSource};
use js_sys::{Array, Float64Array, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// A parameter held as the raw JS value it was bound with. It is read again
/// on every evaluation, so a bound slider object tracks the slider.
#[derive(Debug, Clone)]
pub struct JsParam(JsValue);

impl JsParam {
    pub fn new(value: JsValue) -> Self {
        Self(value)
    }
}

impl From<f64> for JsParam {
    fn from(value: f64) -> Self {
        Self(JsValue::from_f64(value))
    }
}

impl NumericSource for JsParam {
    fn numeric_value(&self) -> Result<f64, CurveError> {
        js_number(&self.0)
    }
}

fn primitive_number(value: &JsValue) -> Option<f64> {
    if let Some(number) = value.as_f64() {
        return Some(number);
    }
    if let Some(flag) = value.as_bool() {
        return Some(if flag { 1.0 } else { 0.0 });
    }
    value
        .as_string()
        .and_then(|text| text.trim().parse::<f64>().ok())
}

fn conversion_error(value: &JsValue) -> CurveError {
    CurveError::TypeConversion {
        type_name: value
            .js_typeof()
            .as_string()
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Reduces a JS value to a number: either the value itself, or its `value`
/// property one level down.
pub fn js_number(value: &JsValue) -> Result<f64, CurveError> {
    if let Some(number) = primitive_number(value) {
        return Ok(number);
    }
    if value.is_object() {
        if let Ok(inner) = Reflect::get(value, &JsValue::from_str("value")) {
            if let Some(number) = primitive_number(&inner) {
                return Ok(number);
            }
        }
    }
    Err(conversion_error(value))
}

/// Reduces the independent variable to a flat vector. Accepts a
/// `Float64Array`, an array of numbers or widget-likes, or a single number.
/// Shape is not carried across the boundary: a number becomes a one-element
/// vector and a nested array fails with `TypeConversion`.
pub fn js_samples(x: &JsValue) -> Result<Vec<f64>, CurveError> {
    if let Some(typed) = x.dyn_ref::<Float64Array>() {
        return Ok(typed.to_vec());
    }
    if Array::is_array(x) {
        return Array::from(x).iter().map(|item| js_number(&item)).collect();
    }
    js_number(x).map(|value| vec![value])
}
