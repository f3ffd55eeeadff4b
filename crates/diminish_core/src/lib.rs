//! The `diminish_core` crate provides parameter-bound, vectorized response curves
//! for interactive plotting.
//!
//! Key components:
//! - **Traits**: `Scalar` (array element abstraction), `NumericSource` (plain numbers or
//!   live value holders), `BoundCurve` (evaluate + display contract).
//! - **Curve functions**: power-law decay, logarithmic growth and five dispersal kernels,
//!   elementwise over `ndarray` arrays of any shape.
//! - **Domain guard**: invalid parameters or positions become NaN, never errors.
//! - **Curve**: a tagged union over the seven bound curves with a name registry and
//!   serde configuration.
pub mod coerce;
pub mod curve;
pub mod decay;
pub mod docs;
pub mod domain;
pub mod error;
pub mod growth;
pub mod kernels;
pub mod render;
pub mod traits;

pub use coerce::{coerce, LiveValue};
pub use curve::{Curve, CurveKind};
pub use decay::{power_law_decay, PowerLawDecay};
pub use error::CurveError;
pub use growth::{log_growth, LogGrowth};
pub use kernels::{
    kernel_exponential, kernel_exppower, kernel_gaussian, kernel_powerlaw,
    kernel_rectangular_hyperbola, ExpPowerKernel, ExponentialKernel, GaussianKernel,
    PowerLawKernel, RectangularHyperbolaKernel,
};
pub use render::RenderSettings;
pub use traits::{BoundCurve, NumericSource, Scalar};
