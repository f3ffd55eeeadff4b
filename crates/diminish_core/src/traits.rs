use crate::curve::CurveKind;
use crate::error::CurveError;
use crate::render::RenderSettings;
use ndarray::{Array, ArrayBase, ArrayView1, Data, Dimension};
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as array elements of a curve function.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Anything that can hand out a current numeric value.
///
/// Plain numbers always succeed. Holders (sliders, text fields, shared cells)
/// are read every time a bound curve is evaluated, so a curve built over a
/// holder follows the holder's current value.
pub trait NumericSource {
    fn numeric_value(&self) -> Result<f64, CurveError>;
}

/// Capability shared by every parameter-bound curve.
pub trait BoundCurve {
    fn kind(&self) -> CurveKind;

    /// Bound parameters in display order.
    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)>;

    /// Evaluates the curve elementwise. The output has the shape of `x`.
    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension;

    fn evaluate_slice(&self, x: &[f64]) -> Result<Vec<f64>, CurveError> {
        self.evaluate(&ArrayView1::from(x)).map(|y| y.to_vec())
    }

    /// Symbolic formula using variable names only.
    fn math_str(&self) -> &'static str {
        self.kind().math_template()
    }

    fn resolved_parameters(&self) -> Result<Vec<(&'static str, f64)>, CurveError> {
        self.parameters()
            .into_iter()
            .map(|(name, source)| Ok((name, source.numeric_value()?)))
            .collect()
    }

    /// `name=value` pairs with two decimals, joined by `", "`.
    fn params_str(&self) -> Result<String, CurveError> {
        self.params_str_with_settings(&RenderSettings::default())
    }

    fn params_str_with(&self, precision: usize, separator: &str) -> Result<String, CurveError> {
        let items = self
            .resolved_parameters()?
            .into_iter()
            .map(|(name, value)| {
                if value.is_nan() {
                    format!("{name}=nan")
                } else {
                    format!("{name}={value:.precision$}")
                }
            })
            .collect::<Vec<_>>();
        Ok(items.join(separator))
    }

    fn params_str_with_settings(&self, settings: &RenderSettings) -> Result<String, CurveError> {
        self.params_str_with(settings.precision, &settings.separator)
    }
}
