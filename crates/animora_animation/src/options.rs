//! Animation options

use crate::easing::Easing;
use crate::keyframe::KeyframeSet;
use crate::transform::TransformState;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Called every active frame with the eased progress
pub type UpdateCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Called once when the final cycle finishes
pub type CompleteCallback = Arc<dyn Fn() + Send + Sync>;

/// Everything one animation call can ask for.
///
/// Transform fields are deltas against the element's stored transform:
/// offsets and angles add, `scale` multiplies. Opacity and colours are
/// absolute targets and leave the property untouched when absent.
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptions {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Multiplicative; `None` behaves as 1.0
    pub scale: Option<f32>,
    pub rotate: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub opacity: Option<f32>,
    pub background_color: Option<String>,
    pub color: Option<String>,
    /// Cycle length in milliseconds
    pub duration: f64,
    /// Start offset in milliseconds from the call
    pub delay: f64,
    pub ease: Easing,
    pub keyframes: Option<KeyframeSet>,
    /// Extra cycles after the first
    pub repeat: u32,
    pub yoyo: bool,
    /// Persist the final transform so the next animation continues from it
    pub save_pos: bool,
    #[serde(skip)]
    pub on_update: Option<UpdateCallback>,
    #[serde(skip)]
    pub on_complete: Option<CompleteCallback>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            scale: None,
            rotate: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            opacity: None,
            background_color: None,
            color: None,
            duration: 1000.0,
            delay: 0.0,
            ease: Easing::default(),
            keyframes: None,
            repeat: 0,
            yoyo: false,
            save_pos: false,
            on_update: None,
            on_complete: None,
        }
    }
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the deltas to a base transform
    pub fn target_from(&self, base: &TransformState) -> TransformState {
        TransformState {
            x: base.x + self.x,
            y: base.y + self.y,
            z: base.z + self.z,
            scale: base.scale * self.scale.unwrap_or(1.0),
            rotate: base.rotate + self.rotate,
            skew_x: base.skew_x + self.skew_x,
            skew_y: base.skew_y + self.skew_y,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn x(mut self, px: f32) -> Self {
        self.x = px;
        self
    }

    pub fn y(mut self, px: f32) -> Self {
        self.y = px;
        self
    }

    pub fn z(mut self, px: f32) -> Self {
        self.z = px;
        self
    }

    pub fn translate(self, x: f32, y: f32) -> Self {
        self.x(x).y(y)
    }

    pub fn scale(mut self, factor: f32) -> Self {
        self.scale = Some(factor);
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn skew(mut self, x_deg: f32, y_deg: f32) -> Self {
        self.skew_x = x_deg;
        self.skew_y = y_deg;
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn background_color(mut self, css: impl Into<String>) -> Self {
        self.background_color = Some(css.into());
        self
    }

    pub fn color(mut self, css: impl Into<String>) -> Self {
        self.color = Some(css.into());
        self
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms;
        self
    }

    pub fn ease(mut self, easing: impl Into<Easing>) -> Self {
        self.ease = easing.into();
        self
    }

    pub fn keyframes(mut self, keyframes: KeyframeSet) -> Self {
        self.keyframes = Some(keyframes);
        self
    }

    pub fn repeat(mut self, extra_cycles: u32) -> Self {
        self.repeat = extra_cycles;
        self
    }

    pub fn yoyo(mut self, enabled: bool) -> Self {
        self.yoyo = enabled;
        self
    }

    pub fn save_pos(mut self, enabled: bool) -> Self {
        self.save_pos = enabled;
        self
    }

    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(callback));
        self
    }

    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("scale", &self.scale)
            .field("rotate", &self.rotate)
            .field("skew_x", &self.skew_x)
            .field("skew_y", &self.skew_y)
            .field("opacity", &self.opacity)
            .field("background_color", &self.background_color)
            .field("color", &self.color)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("ease", &self.ease)
            .field("keyframes", &self.keyframes.as_ref().map(KeyframeSet::len))
            .field("repeat", &self.repeat)
            .field("yoyo", &self.yoyo)
            .field("save_pos", &self.save_pos)
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnimationOptions::default();
        assert_eq!(options.duration, 1000.0);
        assert_eq!(options.delay, 0.0);
        assert_eq!(options.ease, Easing::EaseOutCubic);
        assert_eq!(options.repeat, 0);
        assert!(!options.yoyo);
        assert!(!options.save_pos);
        assert!(options.opacity.is_none());
    }

    #[test]
    fn test_target_adds_offsets_and_multiplies_scale() {
        let base = TransformState {
            x: 10.0,
            scale: 2.0,
            rotate: 30.0,
            ..Default::default()
        };
        let target = AnimationOptions::new()
            .x(5.0)
            .scale(1.5)
            .rotate(15.0)
            .target_from(&base);
        assert_eq!(target.x, 15.0);
        assert_eq!(target.scale, 3.0);
        assert_eq!(target.rotate, 45.0);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: AnimationOptions = serde_json::from_str(
            r##"{"x": 100, "skewX": 4, "backgroundColor": "#f00", "savePos": true,
                "ease": "linear", "keyframes": {"0": {"x": 0}, "1": {"x": 10}}}"##,
        )
        .unwrap();
        assert_eq!(options.x, 100.0);
        assert_eq!(options.skew_x, 4.0);
        assert_eq!(options.background_color.as_deref(), Some("#f00"));
        assert!(options.save_pos);
        assert_eq!(options.ease, Easing::Linear);
        assert_eq!(options.keyframes.unwrap().len(), 2);
        assert_eq!(options.duration, 1000.0);
    }
}
