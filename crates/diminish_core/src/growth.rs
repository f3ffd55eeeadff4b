use crate::coerce::coerce;
use crate::curve::CurveKind;
use crate::docs::{CurveDoc, ParamDoc, BOUND_PARAMETER_RAISES};
use crate::domain::{log_masked, mask_invalid, positive_mask};
use crate::error::CurveError;
use crate::traits::{BoundCurve, NumericSource, Scalar};
use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

/// Logarithmic growth, `f(x) = a ln(x + b)`. NaN where `x + b <= 0`.
pub fn log_growth<T, S, D>(x: &ArrayBase<S, D>, a: T, b: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let domain = x.mapv(|v| v + b);
    let y = domain.mapv(|d| a * d.ln());
    let valid = positive_mask(&domain);
    log_masked("log_growth", &valid);
    mask_invalid(y, &valid)
}

pub static LOG_GROWTH_DOC: CurveDoc = CurveDoc {
    name: "log_growth",
    summary: "Logarithmic growth: f(x) = a * ln(x + b)",
    description: "Models growth with diminishing marginal gains. The domain requires x + b > 0; \
positions outside it are NaN so that plots show a gap.",
    params: &[
        ParamDoc {
            name: "x",
            description: "Input values, any shape.",
        },
        ParamDoc {
            name: "a",
            description: "Scale factor controlling the vertical stretch of the curve.",
        },
        ParamDoc {
            name: "b",
            description: "Horizontal shift keeping the argument of ln positive.",
        },
    ],
    returns: "Array shaped like x with a * ln(x + b) where x + b > 0 and NaN elsewhere.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &["let x = ndarray::array![0.1, 1.0, 2.0];\n\
let y = log_growth(&x, 1.5, 1.0);"],
};

/// [`log_growth`] with `a` and `b` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct LogGrowth<P = f64> {
    a: P,
    b: P,
}

impl<P> LogGrowth<P> {
    pub const MATH_TEMPLATE: &'static str = r"$f(x) = a \cdot \ln(x + b)$";

    pub fn new(a: P, b: P) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> &P {
        &self.a
    }

    pub fn b(&self) -> &P {
        &self.b
    }
}

impl<P: From<f64>> Default for LogGrowth<P> {
    fn default() -> Self {
        Self::new(P::from(1.0), P::from(1.0))
    }
}

impl<P: NumericSource> BoundCurve for LogGrowth<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::LogGrowth
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("a", &self.a as &dyn NumericSource), ("b", &self.b as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let (a, b) = (coerce(&self.a)?, coerce(&self.b)?);
        Ok(log_growth(x, a, b))
    }
}
