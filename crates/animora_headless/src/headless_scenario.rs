//! Scenario definition for headless animation runs.

use crate::document::ElementSpec;
use animora_animation::{AnimationOptions, ScrollTriggerOptions, StaggerConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A document to build plus the steps to run against it.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario JSON")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// One timeline entry
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TimelineStep {
    To {
        target: String,
        #[serde(default)]
        options: AnimationOptions,
    },
    From {
        target: String,
        #[serde(default)]
        options: AnimationOptions,
    },
}

fn default_true() -> bool {
    true
}

fn default_marker() -> String {
    animora_animation::TRIGGER_MARKER.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    // Engine calls
    Animate {
        target: String,
        #[serde(default)]
        options: AnimationOptions,
    },
    Stagger {
        target: String,
        #[serde(default)]
        options: AnimationOptions,
        #[serde(default)]
        config: StaggerConfig,
    },
    Timeline {
        steps: Vec<TimelineStep>,
    },
    ScrollTrigger {
        target: String,
        #[serde(default)]
        options: ScrollTriggerOptions,
    },
    ShowRaster {
        #[serde(default)]
        size: Option<u32>,
    },

    // Environment
    Scroll {
        y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },

    // Assertions
    AssertStyle {
        target: String,
        property: String,
        value: String,
        /// Compare the numbers in both strings within this tolerance
        #[serde(default)]
        tolerance: Option<f32>,
    },
    AssertMarker {
        target: String,
        #[serde(default = "default_marker")]
        marker: String,
        #[serde(default = "default_true")]
        present: bool,
    },
    AssertOverlay {
        id: String,
        #[serde(default = "default_true")]
        present: bool,
    },
    AssertIdle {
        #[serde(default = "default_true")]
        idle: bool,
    },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Animate { .. } => "animate",
            ScenarioStep::Stagger { .. } => "stagger",
            ScenarioStep::Timeline { .. } => "timeline",
            ScenarioStep::ScrollTrigger { .. } => "scroll_trigger",
            ScenarioStep::ShowRaster { .. } => "show_raster",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::AssertStyle { .. } => "assert_style",
            ScenarioStep::AssertMarker { .. } => "assert_marker",
            ScenarioStep::AssertOverlay { .. } => "assert_overlay",
            ScenarioStep::AssertIdle { .. } => "assert_idle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_scenario() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "elements": [
                    {"tag": "div", "class": "box", "style": {"opacity": "0"}, "top": 120}
                ],
                "steps": [
                    {"type": "animate", "target": ".box", "options": {"x": 100, "ease": "linear", "keyframes": {"0": {"x": 0}, "1": {"x": 5}}}},
                    {"type": "stagger", "target": ".box", "config": {"each": 50}},
                    {"type": "timeline", "steps": [{"op": "from", "target": ".box", "options": {"scale": 0.5}}]},
                    {"type": "scroll_trigger", "target": ".box", "options": {"offset": 0.5, "opacity": 1}},
                    {"type": "show_raster"},
                    {"type": "scroll", "y": 300},
                    {"type": "resize", "width": 800, "height": 600},
                    {"type": "wait", "ms": 100},
                    {"type": "tick", "frames": 2},
                    {"type": "assert_style", "target": ".box", "property": "opacity", "value": "1"},
                    {"type": "assert_marker", "target": ".box"},
                    {"type": "assert_overlay", "id": "volt-grid", "present": false},
                    {"type": "assert_idle"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.elements.len(), 1);
        assert_eq!(scenario.elements[0].class, "box");
        assert_eq!(scenario.steps.len(), 13);
        match &scenario.steps[10] {
            ScenarioStep::AssertMarker { marker, present, .. } => {
                assert_eq!(marker, "vtrigger");
                assert!(present);
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(scenario.steps[3].name(), "scroll_trigger");
    }

    #[test]
    fn test_unknown_step_is_an_error() {
        let err = HeadlessScenario::from_json(r#"{"steps": [{"type": "explode"}]}"#);
        assert!(err.is_err());
    }
}
