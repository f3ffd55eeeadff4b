use thiserror::Error;

/// Failures that can escape the core.
///
/// Mathematical domain violations are never reported here; they show up as
/// NaN in the evaluated output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A parameter or input could not be reduced to a real number.
    #[error(
        "cannot convert {type_name} to a real number; expected a number or a holder exposing a numeric value"
    )]
    TypeConversion { type_name: String },

    #[error("unknown curve `{0}`")]
    UnknownCurve(String),

    #[error("curve `{curve}` has no parameter named `{name}`")]
    UnknownParameter { curve: &'static str, name: String },
}

impl CurveError {
    pub fn conversion<T: ?Sized>() -> Self {
        Self::TypeConversion {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }
}
