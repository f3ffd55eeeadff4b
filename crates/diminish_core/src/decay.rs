//! Power-law decay, `f(x) = a (x + b)^(-p)`.

use crate::coerce::coerce;
use crate::curve::CurveKind;
use crate::docs::{CurveDoc, ParamDoc, BOUND_PARAMETER_RAISES};
use crate::domain::{log_masked, mask_invalid, positive_mask};
use crate::error::CurveError;
use crate::traits::{BoundCurve, NumericSource, Scalar};
use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

/// Power-law decay: early increases in `x` matter a lot, later ones taper off.
///
/// Positions where `x + b <= 0` are NaN. The signs of `a`, `p` and `b` are
/// not checked.
pub fn power_law_decay<T, S, D>(x: &ArrayBase<S, D>, a: T, p: T, b: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let domain = x.mapv(|v| v + b);
    let y = domain.mapv(|d| a * d.powf(-p));
    let valid = positive_mask(&domain);
    log_masked("power_law_decay", &valid);
    mask_invalid(y, &valid)
}

pub static POWER_LAW_DECAY_DOC: CurveDoc = CurveDoc {
    name: "power_law_decay",
    summary: "Power-law decay: f(x) = a * (x + b)^(-p)",
    description: "Captures diminishing returns where early increases in x have large effects \
that taper off as x grows. The domain requires x + b > 0; positions outside it are NaN.",
    params: &[
        ParamDoc {
            name: "x",
            description: "Input values, any shape.",
        },
        ParamDoc {
            name: "a",
            description: "Scale factor controlling the overall height of the curve.",
        },
        ParamDoc {
            name: "p",
            description: "Decay exponent; larger values decay faster.",
        },
        ParamDoc {
            name: "b",
            description: "Horizontal shift. The valid domain satisfies x + b > 0.",
        },
    ],
    returns: "Array shaped like x with a * (x + b)^(-p) where x + b > 0 and NaN elsewhere.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &["let x = ndarray::array![0.1, 1.0, 10.0];\n\
let y = power_law_decay(&x, 2.0, 1.5, 0.0);\n\
// [63.246, 2.0, 0.0632]"],
};

/// [`power_law_decay`] with `a`, `p` and `b` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct PowerLawDecay<P = f64> {
    a: P,
    p: P,
    b: P,
}

impl<P> PowerLawDecay<P> {
    pub const MATH_TEMPLATE: &'static str = r"$f(x) = a \cdot (x + b)^{-p}$";

    pub fn new(a: P, p: P, b: P) -> Self {
        Self { a, p, b }
    }

    pub fn a(&self) -> &P {
        &self.a
    }

    pub fn p(&self) -> &P {
        &self.p
    }

    pub fn b(&self) -> &P {
        &self.b
    }
}

impl<P: From<f64>> Default for PowerLawDecay<P> {
    fn default() -> Self {
        Self::new(P::from(1.0), P::from(1.0), P::from(0.0))
    }
}

impl<P: NumericSource> BoundCurve for PowerLawDecay<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::PowerLawDecay
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![
            ("a", &self.a as &dyn NumericSource),
            ("p", &self.p as &dyn NumericSource),
            ("b", &self.b as &dyn NumericSource),
        ]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let (a, p, b) = (coerce(&self.a)?, coerce(&self.p)?, coerce(&self.b)?);
        Ok(power_law_decay(x, a, p, b))
    }
}
