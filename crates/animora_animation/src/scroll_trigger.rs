//! Scroll-position triggers
//!
//! A trigger watches a fixed set of elements (resolved once, when it is
//! registered) and starts the configured animation on each element whose
//! top edge has risen above a fraction of the viewport height.

use crate::options::AnimationOptions;
use animora_core::{ElementId, Host};
use serde::Deserialize;
use slotmap::new_key_type;

/// Marker set on an element once a trigger has fired for it
pub const TRIGGER_MARKER: &str = "vtrigger";

/// Default trigger line, as a fraction of the viewport height
pub const DEFAULT_TRIGGER_OFFSET: f32 = 0.8;

new_key_type! {
    /// Handle to a registered scroll trigger
    pub struct TriggerId;
}

/// Scroll trigger options: trigger settings plus the animation to run
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollTriggerOptions {
    /// Trigger line as a fraction of viewport height. Zero means default.
    #[serde(default)]
    pub offset: Option<f32>,
    /// Fire at most once per element (default true)
    #[serde(default)]
    pub once: Option<bool>,
    #[serde(flatten)]
    pub animation: AnimationOptions,
}

impl ScrollTriggerOptions {
    pub fn new(animation: AnimationOptions) -> Self {
        Self {
            animation,
            ..Default::default()
        }
    }

    pub fn offset(mut self, fraction: f32) -> Self {
        self.offset = Some(fraction);
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = Some(once);
        self
    }

    /// Effective trigger line. Missing, zero and NaN all mean the default.
    pub fn resolved_offset(&self) -> f32 {
        match self.offset {
            Some(v) if v != 0.0 && !v.is_nan() => v,
            _ => DEFAULT_TRIGGER_OFFSET,
        }
    }

    pub fn resolved_once(&self) -> bool {
        self.once.unwrap_or(true)
    }
}

/// A registered trigger
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    elements: Vec<ElementId>,
    offset: f32,
    once: bool,
    animation: AnimationOptions,
}

impl ScrollTrigger {
    pub fn new(elements: Vec<ElementId>, options: ScrollTriggerOptions) -> Self {
        Self {
            elements,
            offset: options.resolved_offset(),
            once: options.resolved_once(),
            animation: options.animation,
        }
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn once(&self) -> bool {
        self.once
    }

    pub fn animation(&self) -> &AnimationOptions {
        &self.animation
    }

    /// Mark and return the elements that should animate now.
    ///
    /// With `once` off, the marker is still set but never consulted, so an
    /// element fires again on every evaluation while it is above the line.
    pub fn fire(&self, host: &mut dyn Host) -> Vec<ElementId> {
        let line = host.viewport_height() * self.offset;
        let mut fired = Vec::new();

        for &element in &self.elements {
            if self.once && host.has_marker(element, TRIGGER_MARKER) {
                continue;
            }
            let Some(top) = host.bounding_top(element) else {
                continue;
            };
            if top < line {
                host.set_marker(element, TRIGGER_MARKER);
                fired.push(element);
            }
        }

        if !fired.is_empty() {
            tracing::debug!("scroll trigger fired for {} element(s) at line {line}", fired.len());
        }
        fired
    }
}
