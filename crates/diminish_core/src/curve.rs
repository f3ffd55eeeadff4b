//! Tagged union over the seven bound curves, plus a name registry used by
//! configuration files and the UI bridge.

use crate::decay::{PowerLawDecay, POWER_LAW_DECAY_DOC};
use crate::docs::CurveDoc;
use crate::error::CurveError;
use crate::growth::{LogGrowth, LOG_GROWTH_DOC};
use crate::kernels::{
    ExpPowerKernel, ExponentialKernel, GaussianKernel, PowerLawKernel, RectangularHyperbolaKernel,
    KERNEL_EXPONENTIAL_DOC, KERNEL_EXPPOWER_DOC, KERNEL_GAUSSIAN_DOC, KERNEL_POWERLAW_DOC,
    KERNEL_RECTANGULAR_HYPERBOLA_DOC,
};
use crate::traits::{BoundCurve, NumericSource};
use ndarray::{Array, ArrayBase, Data, Dimension};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    #[serde(rename = "power_law_decay")]
    PowerLawDecay,
    #[serde(rename = "log_growth")]
    LogGrowth,
    #[serde(rename = "kernel_exponential")]
    ExponentialKernel,
    #[serde(rename = "kernel_gaussian")]
    GaussianKernel,
    #[serde(rename = "kernel_powerlaw")]
    PowerLawKernel,
    #[serde(rename = "kernel_rectangular_hyperbola")]
    RectangularHyperbolaKernel,
    #[serde(rename = "kernel_exppower")]
    ExpPowerKernel,
}

impl CurveKind {
    pub const ALL: [CurveKind; 7] = [
        CurveKind::PowerLawDecay,
        CurveKind::LogGrowth,
        CurveKind::ExponentialKernel,
        CurveKind::GaussianKernel,
        CurveKind::PowerLawKernel,
        CurveKind::RectangularHyperbolaKernel,
        CurveKind::ExpPowerKernel,
    ];

    /// Stable snake_case name, identical to the curve function's name.
    pub fn name(self) -> &'static str {
        match self {
            CurveKind::PowerLawDecay => "power_law_decay",
            CurveKind::LogGrowth => "log_growth",
            CurveKind::ExponentialKernel => "kernel_exponential",
            CurveKind::GaussianKernel => "kernel_gaussian",
            CurveKind::PowerLawKernel => "kernel_powerlaw",
            CurveKind::RectangularHyperbolaKernel => "kernel_rectangular_hyperbola",
            CurveKind::ExpPowerKernel => "kernel_exppower",
        }
    }

    /// Parameter names with their default values, in display order.
    pub fn defaults(self) -> &'static [(&'static str, f64)] {
        match self {
            CurveKind::PowerLawDecay => &[("a", 1.0), ("p", 1.0), ("b", 0.0)],
            CurveKind::LogGrowth => &[("a", 1.0), ("b", 1.0)],
            CurveKind::ExponentialKernel => &[("lam", 10.0)],
            CurveKind::GaussianKernel => &[("sigma", 10.0)],
            CurveKind::PowerLawKernel => &[("alpha", 10.0), ("p", 2.0)],
            CurveKind::RectangularHyperbolaKernel => &[("alpha", 10.0), ("p", 2.0)],
            CurveKind::ExpPowerKernel => &[("lam", 10.0), ("q", 1.5)],
        }
    }

    pub fn param_names(self) -> Vec<&'static str> {
        self.defaults().iter().map(|(name, _)| *name).collect()
    }

    pub fn math_template(self) -> &'static str {
        match self {
            CurveKind::PowerLawDecay => PowerLawDecay::<f64>::MATH_TEMPLATE,
            CurveKind::LogGrowth => LogGrowth::<f64>::MATH_TEMPLATE,
            CurveKind::ExponentialKernel => ExponentialKernel::<f64>::MATH_TEMPLATE,
            CurveKind::GaussianKernel => GaussianKernel::<f64>::MATH_TEMPLATE,
            CurveKind::PowerLawKernel => PowerLawKernel::<f64>::MATH_TEMPLATE,
            CurveKind::RectangularHyperbolaKernel => {
                RectangularHyperbolaKernel::<f64>::MATH_TEMPLATE
            }
            CurveKind::ExpPowerKernel => ExpPowerKernel::<f64>::MATH_TEMPLATE,
        }
    }

    pub fn doc(self) -> &'static CurveDoc {
        match self {
            CurveKind::PowerLawDecay => &POWER_LAW_DECAY_DOC,
            CurveKind::LogGrowth => &LOG_GROWTH_DOC,
            CurveKind::ExponentialKernel => &KERNEL_EXPONENTIAL_DOC,
            CurveKind::GaussianKernel => &KERNEL_GAUSSIAN_DOC,
            CurveKind::PowerLawKernel => &KERNEL_POWERLAW_DOC,
            CurveKind::RectangularHyperbolaKernel => &KERNEL_RECTANGULAR_HYPERBOLA_DOC,
            CurveKind::ExpPowerKernel => &KERNEL_EXPPOWER_DOC,
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveKind {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CurveError::UnknownCurve(s.to_string()))
    }
}

/// Any of the seven bound curves, selected at runtime.
///
/// Serialized with an internal `kind` tag, e.g.
/// `{"kind": "kernel_exponential", "lam": 2.5}`. Missing parameters take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", bound(deserialize = "P: Deserialize<'de> + From<f64>"))]
pub enum Curve<P = f64> {
    #[serde(rename = "power_law_decay")]
    PowerLawDecay(PowerLawDecay<P>),
    #[serde(rename = "log_growth")]
    LogGrowth(LogGrowth<P>),
    #[serde(rename = "kernel_exponential")]
    ExponentialKernel(ExponentialKernel<P>),
    #[serde(rename = "kernel_gaussian")]
    GaussianKernel(GaussianKernel<P>),
    #[serde(rename = "kernel_powerlaw")]
    PowerLawKernel(PowerLawKernel<P>),
    #[serde(rename = "kernel_rectangular_hyperbola")]
    RectangularHyperbolaKernel(RectangularHyperbolaKernel<P>),
    #[serde(rename = "kernel_exppower")]
    ExpPowerKernel(ExpPowerKernel<P>),
}

impl<P: From<f64>> Curve<P> {
    pub fn default_for(kind: CurveKind) -> Self {
        match kind {
            CurveKind::PowerLawDecay => Curve::PowerLawDecay(PowerLawDecay::default()),
            CurveKind::LogGrowth => Curve::LogGrowth(LogGrowth::default()),
            CurveKind::ExponentialKernel => Curve::ExponentialKernel(ExponentialKernel::default()),
            CurveKind::GaussianKernel => Curve::GaussianKernel(GaussianKernel::default()),
            CurveKind::PowerLawKernel => Curve::PowerLawKernel(PowerLawKernel::default()),
            CurveKind::RectangularHyperbolaKernel => {
                Curve::RectangularHyperbolaKernel(RectangularHyperbolaKernel::default())
            }
            CurveKind::ExpPowerKernel => Curve::ExpPowerKernel(ExpPowerKernel::default()),
        }
    }

    /// Binds named parameter values to `kind`.
    ///
    /// Parameters not mentioned keep their defaults; a name the curve does not
    /// declare is rejected. Values are stored as given and only read when the
    /// curve is evaluated or rendered.
    pub fn from_params<I, K>(kind: CurveKind, params: I) -> Result<Self, CurveError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
    {
        let defaults = kind.defaults();
        let mut slots: Vec<Option<P>> = defaults.iter().map(|_| None).collect();
        for (name, value) in params {
            let name = name.as_ref();
            let index = defaults
                .iter()
                .position(|(declared, _)| *declared == name)
                .ok_or_else(|| CurveError::UnknownParameter {
                    curve: kind.name(),
                    name: name.to_string(),
                })?;
            slots[index] = Some(value);
        }

        // `slots` and `defaults` share the declared parameter order and length.
        let mut value = |index: usize| {
            slots[index]
                .take()
                .unwrap_or_else(|| P::from(defaults[index].1))
        };

        Ok(match kind {
            CurveKind::PowerLawDecay => {
                Curve::PowerLawDecay(PowerLawDecay::new(value(0), value(1), value(2)))
            }
            CurveKind::LogGrowth => Curve::LogGrowth(LogGrowth::new(value(0), value(1))),
            CurveKind::ExponentialKernel => {
                Curve::ExponentialKernel(ExponentialKernel::new(value(0)))
            }
            CurveKind::GaussianKernel => Curve::GaussianKernel(GaussianKernel::new(value(0))),
            CurveKind::PowerLawKernel => {
                Curve::PowerLawKernel(PowerLawKernel::new(value(0), value(1)))
            }
            CurveKind::RectangularHyperbolaKernel => Curve::RectangularHyperbolaKernel(
                RectangularHyperbolaKernel::new(value(0), value(1)),
            ),
            CurveKind::ExpPowerKernel => {
                Curve::ExpPowerKernel(ExpPowerKernel::new(value(0), value(1)))
            }
        })
    }
}

macro_rules! dispatch {
    ($curve:expr, $inner:ident => $body:expr) => {
        match $curve {
            Curve::PowerLawDecay($inner) => $body,
            Curve::LogGrowth($inner) => $body,
            Curve::ExponentialKernel($inner) => $body,
            Curve::GaussianKernel($inner) => $body,
            Curve::PowerLawKernel($inner) => $body,
            Curve::RectangularHyperbolaKernel($inner) => $body,
            Curve::ExpPowerKernel($inner) => $body,
        }
    };
}

impl<P: NumericSource> BoundCurve for Curve<P> {
    fn kind(&self) -> CurveKind {
        dispatch!(self, c => c.kind())
    }

    fn parameters(&self) -> Vec<(&'static str, &dyn NumericSource)> {
        dispatch!(self, c => c.parameters())
    }

    fn evaluate<S, D>(&self, x: &ArrayBase<S, D>) -> Result<Array<f64, D>, CurveError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        dispatch!(self, c => c.evaluate(x))
    }
}

macro_rules! into_curve {
    ($($variant:ident),*) => {
        $(
            impl<P> From<$variant<P>> for Curve<P> {
                fn from(curve: $variant<P>) -> Self {
                    Curve::$variant(curve)
                }
            }
        )*
    };
}

into_curve!(
    PowerLawDecay,
    LogGrowth,
    ExponentialKernel,
    GaussianKernel,
    PowerLawKernel,
    RectangularHyperbolaKernel,
    ExpPowerKernel
);
