//! Visual properties the engine reads and writes

use serde::{Deserialize, Serialize};
use std::fmt;

/// A style property touched by animations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleProperty {
    Transform,
    Opacity,
    BackgroundColor,
    Color,
}

impl StyleProperty {
    /// CSS property name
    pub const fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Transform => "transform",
            StyleProperty::Opacity => "opacity",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::Color => "color",
        }
    }

    /// Look up a property by CSS name
    pub fn from_css_name(name: &str) -> Option<Self> {
        match name {
            "transform" => Some(StyleProperty::Transform),
            "opacity" => Some(StyleProperty::Opacity),
            "background-color" | "backgroundColor" => Some(StyleProperty::BackgroundColor),
            "color" => Some(StyleProperty::Color),
            _ => None,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}
