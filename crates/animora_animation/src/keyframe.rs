//! Keyframe sets
//!
//! A keyframe set is a sparse, progress-keyed path: each key in `0.0..=1.0`
//! carries a partial transform and an optional opacity. Between two
//! consecutive keys every field is blended linearly on raw time progress;
//! easing does not apply.

use crate::interpolate::{lerp, Interpolate};
use crate::transform::TransformState;
use animora_core::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Properties at a single keyframe. Missing fields take their neutral value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyframeProps {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub scale: Option<f32>,
    pub rotate: Option<f32>,
    pub skew_x: Option<f32>,
    pub skew_y: Option<f32>,
    pub opacity: Option<f32>,
}

impl KeyframeProps {
    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    pub fn with_x(mut self, px: f32) -> Self {
        self.x = Some(px);
        self
    }

    pub fn with_y(mut self, px: f32) -> Self {
        self.y = Some(px);
        self
    }

    pub fn with_z(mut self, px: f32) -> Self {
        self.z = Some(px);
        self
    }

    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_skew(mut self, x_deg: f32, y_deg: f32) -> Self {
        self.skew_x = Some(x_deg);
        self.skew_y = Some(y_deg);
        self
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Transform with neutral defaults (0 for offsets and angles, 1 for scale)
    pub fn resolved_transform(&self) -> TransformState {
        TransformState {
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            z: self.z.unwrap_or(0.0),
            scale: self.scale.unwrap_or(1.0),
            rotate: self.rotate.unwrap_or(0.0),
            skew_x: self.skew_x.unwrap_or(0.0),
            skew_y: self.skew_y.unwrap_or(0.0),
        }
    }
}

/// Output of one matching keyframe segment
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSample {
    pub transform: TransformState,
    /// Present only when the segment's leading keyframe defines opacity.
    /// A trailing keyframe without opacity is blended toward `1.0`.
    pub opacity: Option<f32>,
}

/// Progress-keyed keyframes, kept sorted by key
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, KeyframeProps>")]
pub struct KeyframeSet {
    frames: Vec<(f32, KeyframeProps)>,
}

impl KeyframeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe (builder pattern). A repeated key replaces the earlier one.
    pub fn at(mut self, key: f32, props: KeyframeProps) -> Self {
        self.insert(key, props);
        self
    }

    pub fn insert(&mut self, key: f32, props: KeyframeProps) {
        match self.frames.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = props,
            None => {
                self.frames.push((key, props));
                self.frames.sort_by(|a, b| a.0.total_cmp(&b.0));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sorted keys
    pub fn keys(&self) -> impl Iterator<Item = f32> + '_ {
        self.frames.iter().map(|(k, _)| *k)
    }

    /// Whether any progress value can ever be bracketed
    pub fn has_segments(&self) -> bool {
        self.frames.len() >= 2
    }

    /// Every segment whose closed range contains `progress`, in ascending key
    /// order.
    ///
    /// A progress value sitting exactly on an inner key matches both adjacent
    /// segments; callers writing each sample in turn end up with the later
    /// segment's values.
    pub fn samples(&self, progress: f32) -> impl Iterator<Item = KeyframeSample> + '_ {
        self.frames.windows(2).filter_map(move |pair| {
            let (k0, from) = (pair[0].0, &pair[0].1);
            let (k1, to) = (pair[1].0, &pair[1].1);
            if progress < k0 || progress > k1 {
                return None;
            }
            let local = (progress - k0) / (k1 - k0);
            let transform = from
                .resolved_transform()
                .lerp(&to.resolved_transform(), local);
            let opacity = from
                .opacity
                .map(|start| lerp(start, to.opacity.unwrap_or(1.0), local));
            Some(KeyframeSample { transform, opacity })
        })
    }

    /// The sample that wins at `progress` (the last matching segment)
    pub fn sample(&self, progress: f32) -> Option<KeyframeSample> {
        self.samples(progress).last()
    }
}

impl TryFrom<BTreeMap<String, KeyframeProps>> for KeyframeSet {
    type Error = Error;

    fn try_from(map: BTreeMap<String, KeyframeProps>) -> Result<Self> {
        let mut set = KeyframeSet::new();
        for (raw, props) in map {
            let key: f32 = raw
                .trim()
                .parse()
                .map_err(|_| Error::InvalidKeyframeKey(raw.clone()))?;
            if !key.is_finite() {
                return Err(Error::InvalidKeyframeKey(raw));
            }
            set.insert(key, props);
        }
        Ok(set)
    }
}
