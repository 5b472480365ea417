//! Easing functions for animations

use serde::Deserialize;
use std::f32::consts::PI;

/// Easing function type
///
/// Input progress is not re-clamped; `Spring` overshoots past 1.0 on purpose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOut,
    /// Decorative damped oscillation, `1 - cos(4.5πt)·e^(-6t)`
    Spring,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Spring => 1.0 - (t * 4.5 * PI).cos() * (-6.0 * t).exp(),
        }
    }

    /// Look up an easing by name.
    ///
    /// Accepts the camelCase names (`easeOutCubic`) and their snake_case
    /// spellings. Anything else resolves to `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Easing::Linear,
            "easeOutCubic" | "ease_out_cubic" => Easing::EaseOutCubic,
            "easeInOut" | "ease_in_out" => Easing::EaseInOut,
            "spring" => Easing::Spring,
            other => {
                tracing::debug!("unknown easing '{}', falling back to linear", other);
                Easing::Linear
            }
        }
    }

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOut => "easeInOut",
            Easing::Spring => "spring",
        }
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Easing::from_name(name)
    }
}

impl From<String> for Easing {
    fn from(name: String) -> Self {
        Easing::from_name(&name)
    }
}
