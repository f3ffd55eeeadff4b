//! Dispersal kernels: probability-of-arrival shapes over radial distance `r`.
//!
//! Every kernel checks its scale and shape parameters up front. A
//! non-positive value makes the whole output NaN, whatever the distances.
//! Values are in `(0, 1]` wherever they are defined.

use crate::coerce::coerce;
use crate::curve::CurveKind;
use crate::docs::{CurveDoc, ParamDoc, BOUND_PARAMETER_RAISES};
use crate::domain::{
    fill_invalid, log_masked, mask_invalid, positive_mask, reciprocal_where_nonzero,
};
use crate::error::CurveError;
use crate::traits::{BoundCurve, NumericSource, Scalar};
use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};

fn log_rejected<T: Scalar>(curve: &str, params: &[(&str, T)]) {
    log::debug!("{curve}: non-positive parameter in {params:?}; output is all NaN");
}

/// Exponential kernel (Laplace in 2D), `K(r) = exp(-r / lam)`.
pub fn kernel_exponential<T, S, D>(distance: &ArrayBase<S, D>, lam: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if lam <= T::zero() {
        log_rejected("kernel_exponential", &[("lam", lam)]);
        return fill_invalid(distance);
    }
    distance.mapv(|r| (-r / lam).exp())
}

/// Gaussian kernel, `K(r) = exp(-(r / sigma)^2)`.
pub fn kernel_gaussian<T, S, D>(distance: &ArrayBase<S, D>, sigma: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if sigma <= T::zero() {
        log_rejected("kernel_gaussian", &[("sigma", sigma)]);
        return fill_invalid(distance);
    }
    distance.mapv(|r| {
        let z = r / sigma;
        (-(z * z)).exp()
    })
}

/// Power-law kernel, `K(r) = (1 + r / alpha)^(-p)`.
///
/// Positions where `1 + r / alpha <= 0` are NaN.
pub fn kernel_powerlaw<T, S, D>(distance: &ArrayBase<S, D>, alpha: T, p: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if alpha <= T::zero() || p <= T::zero() {
        log_rejected("kernel_powerlaw", &[("alpha", alpha), ("p", p)]);
        return fill_invalid(distance);
    }
    let base = distance.mapv(|r| T::one() + r / alpha);
    let y = base.mapv(|v| v.powf(-p));
    let valid = positive_mask(&base);
    log_masked("kernel_powerlaw", &valid);
    mask_invalid(y, &valid)
}

/// Rectangular hyperbola kernel, `K(r) = 1 / (1 + (r / alpha)^p)`.
///
/// Heavy-tailed with a softer shoulder than [`kernel_powerlaw`]. The
/// reciprocal is only taken where the denominator is non-zero, and any
/// position with a non-positive denominator is NaN.
pub fn kernel_rectangular_hyperbola<T, S, D>(
    distance: &ArrayBase<S, D>,
    alpha: T,
    p: T,
) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if alpha <= T::zero() || p <= T::zero() {
        log_rejected("kernel_rectangular_hyperbola", &[("alpha", alpha), ("p", p)]);
        return fill_invalid(distance);
    }
    let denom = distance.mapv(|r| T::one() + (r / alpha).powf(p));
    let y = reciprocal_where_nonzero(&denom);
    let valid = positive_mask(&denom);
    log_masked("kernel_rectangular_hyperbola", &valid);
    mask_invalid(y, &valid)
}

/// Exponential-power (Weibull) kernel, `K(r) = exp(-(r / lam)^q)`.
///
/// `q = 1` is the exponential kernel and `q = 2` the Gaussian.
pub fn kernel_exppower<T, S, D>(distance: &ArrayBase<S, D>, lam: T, q: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if lam <= T::zero() || q <= T::zero() {
        log_rejected("kernel_exppower", &[("lam", lam), ("q", q)]);
        return fill_invalid(distance);
    }
    distance.mapv(|r| (-(r / lam).powf(q)).exp())
}

const DISTANCE: ParamDoc = ParamDoc {
    name: "distance",
    description: "Radial distance r from the source, any shape.",
};

pub static KERNEL_EXPONENTIAL_DOC: CurveDoc = CurveDoc {
    name: "kernel_exponential",
    summary: "Exponential kernel (Laplace in 2D): K(r) = exp(-r / lam)",
    description: "Models short-tailed processes such as rain-splash or gravity drops.",
    params: &[
        DISTANCE,
        ParamDoc {
            name: "lam",
            description: "Positive scale parameter (> 0).",
        },
    ],
    returns: "Array shaped like distance with values in (0, 1]; all NaN if lam <= 0.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &["let r = ndarray::Array1::linspace(0.0, 10.0, 5);\n\
let k = kernel_exponential(&r, 2.0);\n\
// [1.0, 0.2865, 0.0821, 0.0235, 0.0067]"],
};

pub static KERNEL_GAUSSIAN_DOC: CurveDoc = CurveDoc {
    name: "kernel_gaussian",
    summary: "Gaussian kernel: K(r) = exp(-(r / sigma)^2)",
    description: "Suitable for fine aerosols with strong mixing (short tails).",
    params: &[
        DISTANCE,
        ParamDoc {
            name: "sigma",
            description: "Positive scale (standard deviation-like) parameter (> 0).",
        },
    ],
    returns: "Array shaped like distance with values in (0, 1]; all NaN if sigma <= 0.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &[],
};

pub static KERNEL_POWERLAW_DOC: CurveDoc = CurveDoc {
    name: "kernel_powerlaw",
    summary: "Power-law kernel: K(r) = (1 + r / alpha)^(-p)",
    description: "Captures rare long-distance jumps; heavy tails governed by p.",
    params: &[
        DISTANCE,
        ParamDoc {
            name: "alpha",
            description: "Positive scale parameter controlling the shoulder (> 0).",
        },
        ParamDoc {
            name: "p",
            description: "Positive tail exponent (> 0). Larger p yields shorter tails.",
        },
    ],
    returns: "Array shaped like distance with values in (0, 1] where 1 + r / alpha > 0; \
all NaN if alpha <= 0 or p <= 0.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &[],
};

pub static KERNEL_RECTANGULAR_HYPERBOLA_DOC: CurveDoc = CurveDoc {
    name: "kernel_rectangular_hyperbola",
    summary: "Rectangular hyperbola kernel: K(r) = 1 / (1 + (r / alpha)^p)",
    description: "A heavy-tailed form with a softer shoulder than the power-law kernel.",
    params: &[
        DISTANCE,
        ParamDoc {
            name: "alpha",
            description: "Positive scale parameter controlling the shoulder (> 0).",
        },
        ParamDoc {
            name: "p",
            description: "Positive shape parameter (> 0). Larger p steepens decay.",
        },
    ],
    returns: "Array shaped like distance with values in (0, 1]; all NaN if alpha <= 0 or p <= 0.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &[],
};

pub static KERNEL_EXPPOWER_DOC: CurveDoc = CurveDoc {
    name: "kernel_exppower",
    summary: "Exponential-power (Weibull) kernel: K(r) = exp(-(r / lam)^q)",
    description: "Interpolates between the Gaussian (q = 2) and exponential (q = 1) kernels.",
    params: &[
        DISTANCE,
        ParamDoc {
            name: "lam",
            description: "Positive scale parameter (> 0).",
        },
        ParamDoc {
            name: "q",
            description: "Positive shape parameter (> 0). q = 2 is Gaussian, q = 1 exponential.",
        },
    ],
    returns: "Array shaped like distance with values in (0, 1]; all NaN if lam <= 0 or q <= 0.",
    raises: BOUND_PARAMETER_RAISES,
    examples: &[],
};

/// [`kernel_exponential`] with `lam` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct ExponentialKernel<P = f64> {
    lam: P,
}

impl<P> ExponentialKernel<P> {
    pub const MATH_TEMPLATE: &'static str = r"$K(r) = \exp\!\left(-\dfrac{r}{\lambda}\right)$";

    pub fn new(lam: P) -> Self {
        Self { lam }
    }

    pub fn lam(&self) -> &P {
        &self.lam
    }
}

impl<P: From<f64>> Default for ExponentialKernel<P> {
    fn default() -> Self {
        Self::new(P::from(10.0))
    }
}

impl<P: NumericSource> BoundCurve for ExponentialKernel<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::ExponentialKernel
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("lam", &self.lam as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Ok(kernel_exponential(x, coerce(&self.lam)?))
    }
}

/// [`kernel_gaussian`] with `sigma` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct GaussianKernel<P = f64> {
    sigma: P,
}

impl<P> GaussianKernel<P> {
    pub const MATH_TEMPLATE: &'static str =
        r"$K(r) = \exp\!\left(-\left(\dfrac{r}{\sigma}\right)^2\right)$";

    pub fn new(sigma: P) -> Self {
        Self { sigma }
    }

    pub fn sigma(&self) -> &P {
        &self.sigma
    }
}

impl<P: From<f64>> Default for GaussianKernel<P> {
    fn default() -> Self {
        Self::new(P::from(10.0))
    }
}

impl<P: NumericSource> BoundCurve for GaussianKernel<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::GaussianKernel
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("sigma", &self.sigma as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Ok(kernel_gaussian(x, coerce(&self.sigma)?))
    }
}

/// [`kernel_powerlaw`] with `alpha` and `p` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct PowerLawKernel<P = f64> {
    alpha: P,
    p: P,
}

impl<P> PowerLawKernel<P> {
    pub const MATH_TEMPLATE: &'static str = r"$K(r) = \left(1 + \dfrac{r}{\alpha}\right)^{-p}$";

    pub fn new(alpha: P, p: P) -> Self {
        Self { alpha, p }
    }

    pub fn alpha(&self) -> &P {
        &self.alpha
    }

    pub fn p(&self) -> &P {
        &self.p
    }
}

impl<P: From<f64>> Default for PowerLawKernel<P> {
    fn default() -> Self {
        Self::new(P::from(10.0), P::from(2.0))
    }
}

impl<P: NumericSource> BoundCurve for PowerLawKernel<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::PowerLawKernel
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("alpha", &self.alpha as &dyn NumericSource), ("p", &self.p as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Ok(kernel_powerlaw(x, coerce(&self.alpha)?, coerce(&self.p)?))
    }
}

/// [`kernel_rectangular_hyperbola`] with `alpha` and `p` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct RectangularHyperbolaKernel<P = f64> {
    alpha: P,
    p: P,
}

impl<P> RectangularHyperbolaKernel<P> {
    pub const MATH_TEMPLATE: &'static str =
        r"$K(r) = \dfrac{1}{1 + \left(\dfrac{r}{\alpha}\right)^{p}}$";

    pub fn new(alpha: P, p: P) -> Self {
        Self { alpha, p }
    }

    pub fn alpha(&self) -> &P {
        &self.alpha
    }

    pub fn p(&self) -> &P {
        &self.p
    }
}

impl<P: From<f64>> Default for RectangularHyperbolaKernel<P> {
    fn default() -> Self {
        Self::new(P::from(10.0), P::from(2.0))
    }
}

impl<P: NumericSource> BoundCurve for RectangularHyperbolaKernel<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::RectangularHyperbolaKernel
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("alpha", &self.alpha as &dyn NumericSource), ("p", &self.p as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Ok(kernel_rectangular_hyperbola(
            x,
            coerce(&self.alpha)?,
            coerce(&self.p)?,
        ))
    }
}

/// [`kernel_exppower`] with `lam` and `q` bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub struct ExpPowerKernel<P = f64> {
    lam: P,
    q: P,
}

impl<P> ExpPowerKernel<P> {
    pub const MATH_TEMPLATE: &'static str =
        r"$K(r) = \exp\!\left(-\left(\dfrac{r}{\lambda}\right)^{q}\right)$";

    pub fn new(lam: P, q: P) -> Self {
        Self { lam, q }
    }

    pub fn lam(&self) -> &P {
        &self.lam
    }

    pub fn q(&self) -> &P {
        &self.q
    }
}

impl<P: From<f64>> Default for ExpPowerKernel<P> {
    fn default() -> Self {
        Self::new(P::from(10.0), P::from(1.5))
    }
}

impl<P: NumericSource> BoundCurve for ExpPowerKernel<P> {
    fn kind(&self) -> CurveKind {
        CurveKind::ExpPowerKernel
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        vec![("lam", &self.lam as &dyn NumericSource), ("q", &self.q as &dyn NumericSource)]
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Ok(kernel_exppower(x, coerce(&self.lam)?, coerce(&self.q)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    fn assert_close(actual: &Array1<f64>, expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "index {i}: {a} vs {e}");
        }
    }

    fn all_nan<D: Dimension>(y: &Array<f64, D>) -> bool {
        y.iter().all(|v| v.is_nan())
    }

    #[test]
    fn exponential_reference_values() {
        let y = kernel_exponential(&array![0.0_f64, 2.0, 10.0], 2.0);
        assert_close(&y, &[1.0, 0.367_879, 0.006_738], 1e-6);

        let r = Array1::linspace(0.0_f64, 10.0, 5);
        let y = kernel_exponential(&r, 2.0);
        assert_close(&y, &[1.0, 0.2865, 0.0821, 0.0235, 0.0067], 1e-4);
    }

    #[test]
    fn kernels_are_one_at_the_source() {
        let zero = array![0.0_f64];
        for scale in [0.1, 1.0, 37.5] {
            assert_eq!(kernel_exponential(&zero, scale)[0], 1.0);
            assert_eq!(kernel_gaussian(&zero, scale)[0], 1.0);
            assert_eq!(kernel_rectangular_hyperbola(&zero, scale, 1.7)[0], 1.0);
            assert_eq!(kernel_powerlaw(&zero, scale, 2.0)[0], 1.0);
            assert_eq!(kernel_exppower(&zero, scale, 0.5)[0], 1.0);
        }
    }

    #[test]
    fn non_positive_parameters_invalidate_every_position() {
        let r = array![-5.0_f64, 0.0, 1.0, 100.0];
        assert!(all_nan(&kernel_exponential(&r, 0.0)));
        assert!(all_nan(&kernel_gaussian(&r, -1.0)));
        assert!(all_nan(&kernel_powerlaw(&r, 1.0, 0.0)));
        assert!(all_nan(&kernel_powerlaw(&r, -1.0, 2.0)));
        assert!(all_nan(&kernel_rectangular_hyperbola(&r, 0.0, 2.0)));
        assert!(all_nan(&kernel_rectangular_hyperbola(&r, 2.0, -2.0)));
        assert!(all_nan(&kernel_exppower(&r, 2.0, 0.0)));
        assert!(all_nan(&kernel_exppower(&r, -2.0, 1.0)));
    }

    #[test]
    fn invalid_parameters_keep_input_shape() {
        let r = Array2::<f64>::ones((3, 4));
        let y = kernel_gaussian(&r, 0.0);
        assert_eq!(y.shape(), &[3, 4]);
        assert!(all_nan(&y));
    }

    #[test]
    fn powerlaw_masks_non_positive_base() {
        // base = 1 + r / 2
        let y = kernel_powerlaw(&array![-4.0_f64, -2.0, -1.0, 2.0], 2.0, 2.0);
        assert!(y[0].is_nan());
        assert!(y[1].is_nan());
        assert_eq!(y[2], 4.0);
        assert_eq!(y[3], 0.25);
    }

    #[test]
    fn rectangular_hyperbola_zero_denominator_is_nan() {
        // (r / alpha)^p = -1 exactly when r = -alpha and p = 1.
        let y = kernel_rectangular_hyperbola(&array![-1.0_f64, -2.0, 1.0], 1.0, 1.0);
        assert!(y[0].is_nan());
        assert!(y[1].is_nan());
        assert_eq!(y[2], 0.5);
        assert!(y.iter().all(|v| !v.is_infinite()));
    }

    #[test]
    fn rectangular_hyperbola_values() {
        let y = kernel_rectangular_hyperbola(&array![10.0_f64, 20.0], 10.0, 2.0);
        assert_close(&y, &[0.5, 0.2], 1e-12);
    }

    #[test]
    fn exppower_with_q_two_matches_gaussian() {
        let r = Array1::linspace(0.0_f64, 25.0, 51);
        let weibull = kernel_exppower(&r, 4.0, 2.0);
        let gaussian = kernel_gaussian(&r, 4.0);
        for (a, b) in weibull.iter().zip(gaussian.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn exppower_with_q_one_matches_exponential() {
        let r = Array1::linspace(0.0_f64, 25.0, 51);
        let weibull = kernel_exppower(&r, 3.0, 1.0);
        let exponential = kernel_exponential(&r, 3.0);
        for (a, b) in weibull.iter().zip(exponential.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn huge_distances_underflow_to_zero() {
        let y = kernel_gaussian(&array![1e200_f64], 1.0);
        assert_eq!(y[0], 0.0);
    }

    #[test]
    fn params_str_uses_declared_names() {
        assert_eq!(ExponentialKernel::new(2.5).params_str().unwrap(), "lam=2.50");
        assert_eq!(GaussianKernel::new(1.0).params_str().unwrap(), "sigma=1.00");
        assert_eq!(
            PowerLawKernel::new(10.0, 2.0).params_str().unwrap(),
            "alpha=10.00, p=2.00"
        );
        assert_eq!(
            RectangularHyperbolaKernel::new(3.0, 0.5).params_str_with(3, ";").unwrap(),
            "alpha=3.000;p=0.500"
        );
        assert_eq!(
            ExpPowerKernel::<f64>::default().params_str().unwrap(),
            "lam=10.00, q=1.50"
        );
    }

    #[test]
    fn params_str_renders_nan_in_lowercase() {
        assert_eq!(ExponentialKernel::new(f64::NAN).params_str().unwrap(), "lam=nan");
        assert_eq!(
            PowerLawKernel::new(f64::INFINITY, -0.5).params_str().unwrap(),
            "alpha=inf, p=-0.50"
        );
    }

    #[test]
    fn construction_accepts_invalid_values() {
        let k = ExponentialKernel::new(-1.0);
        let y = k.evaluate(&array![0.0_f64, 1.0]).unwrap();
        assert!(all_nan(&y));
    }

    #[test]
    fn math_str_is_fixed_per_variant() {
        assert_eq!(
            ExponentialKernel::new(1.0).math_str(),
            ExponentialKernel::new(99.0).math_str()
        );
        assert!(!GaussianKernel::new(3.25).math_str().contains("3.25"));
    }
}
