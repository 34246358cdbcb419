//! Time remapping curves applied between two keyframes

use std::fmt;
use std::str::FromStr;

/// Easing curve used to remap the fraction between two keyframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// `f`
    #[default]
    Linear,
    /// Cubic smoothstep `3f² − 2f³` (ease in and out)
    SmoothStep,
    /// Quadratic ease-in `f²` (slow start, fast end)
    EaseInQuad,
    /// Quintic smootherstep `6f⁵ − 15f⁴ + 10f³`
    SmootherStep,
}

impl Easing {
    /// All curves, in selection order
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::SmoothStep,
        Self::EaseInQuad,
        Self::SmootherStep,
    ];

    /// Remap a fraction in `[0, 1]`
    pub fn apply(self, f: f32) -> f32 {
        match self {
            Self::Linear => f,
            Self::SmoothStep => 3.0 * f * f - 2.0 * f * f * f,
            Self::EaseInQuad => f * f,
            Self::SmootherStep => f * f * f * (f * (6.0 * f - 15.0) + 10.0),
        }
    }

    /// Stable lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::SmoothStep => "smooth_step",
            Self::EaseInQuad => "ease_in_quad",
            Self::SmootherStep => "smoother_step",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "linear" | "0" => Ok(Self::Linear),
            "smooth_step" | "smoothstep" | "ease_in_out" | "1" => Ok(Self::SmoothStep),
            "ease_in_quad" | "ease_in" | "quad" | "2" => Ok(Self::EaseInQuad),
            "smoother_step" | "smootherstep" | "3" => Ok(Self::SmootherStep),
            _ => Err(format!("unknown easing '{s}'")),
        }
    }
}
