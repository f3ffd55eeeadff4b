use serde::{Deserialize, Serialize};

/// Formatting of bound parameter values for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Decimal digits after the point.
    pub precision: usize,
    pub separator: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            precision: 2,
            separator: ", ".to_string(),
        }
    }
}
