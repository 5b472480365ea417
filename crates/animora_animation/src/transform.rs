//! Transform state and the per-element store
//!
//! Consecutive animations on the same element can continue from where the
//! previous one stopped: an animation with `save_pos` writes its final
//! transform here, and every new animation reads its starting point from it.

use crate::interpolate::{lerp, Interpolate};
use animora_core::ElementId;
use serde::Deserialize;
use slotmap::SecondaryMap;

/// Accumulated visual transform of one element
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformState {
    /// Translation in pixels
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Rotation in degrees
    pub rotate: f32,
    /// Skew in degrees
    pub skew_x: f32,
    pub skew_y: f32,
}

impl TransformState {
    pub const IDENTITY: TransformState = TransformState {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        scale: 1.0,
        rotate: 0.0,
        skew_x: 0.0,
        skew_y: 0.0,
    };

    /// Render as a CSS transform value
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px,{}px,{}px) scale({}) rotate({}deg) skew({}deg,{}deg)",
            self.x, self.y, self.z, self.scale, self.rotate, self.skew_x, self.skew_y
        )
    }
}

/// Componentwise blend of all seven fields
impl Interpolate for TransformState {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            z: lerp(self.z, other.z, t),
            scale: lerp(self.scale, other.scale, t),
            rotate: lerp(self.rotate, other.rotate, t),
            skew_x: lerp(self.skew_x, other.skew_x, t),
            skew_y: lerp(self.skew_y, other.skew_y, t),
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Last persisted transform per element.
///
/// Keyed by generational element ids, so the store never keeps an element
/// alive and an entry left behind by a removed element is unreachable from
/// any element created later. Entries are overwritten, never merged, and
/// never deleted.
#[derive(Debug, Default)]
pub struct TransformStore {
    entries: SecondaryMap<ElementId, TransformState>,
}

impl TransformStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored transform, or identity if the element never persisted one
    pub fn base(&self, element: ElementId) -> TransformState {
        self.entries.get(element).copied().unwrap_or_default()
    }

    pub fn get(&self, element: ElementId) -> Option<&TransformState> {
        self.entries.get(element)
    }

    /// Persist a final transform, replacing any previous entry
    pub fn save(&mut self, element: ElementId, state: TransformState) {
        tracing::debug!(?element, "saving transform {}", state.to_css());
        self.entries.insert(element, state);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
