//! Structured documentation attached to each curve function.
//!
//! Front-ends render these records (argument lists, return notes, examples)
//! directly instead of scraping free text.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaisesDoc {
    pub error: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurveDoc {
    /// Name of the curve function this record documents.
    pub name: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDoc],
    pub returns: &'static str,
    pub raises: &'static [RaisesDoc],
    /// Self-contained Rust snippets.
    pub examples: &'static [&'static str],
}

impl CurveDoc {
    pub fn param(&self, name: &str) -> Option<&'static ParamDoc> {
        self.params.iter().find(|p| p.name == name)
    }
}


/// The curve functions themselves never fail; their bound forms can, while
/// reading parameter holders.
pub(crate) const BOUND_PARAMETER_RAISES: &[RaisesDoc] = &[RaisesDoc {
    error: "CurveError::TypeConversion",
    description: "Raised by the bound curve when a parameter holder cannot be reduced to a \
real number. Domain violations never raise; they produce NaN.",
}];
