//! Animora Animation
//!
//! Frame-driven tweening of element transforms, opacity and colours.
//!
//! # Features
//!
//! - **Tweens**: eased blends between the stored transform and a delta target
//! - **Keyframes**: piecewise-linear paths keyed by progress in `[0, 1]`
//! - **Repeat / yoyo**: extra cycles, optionally reversing each time
//! - **Position memory**: `save_pos` carries the final transform forward
//! - **Composition**: stagger, sequential timelines, scroll triggers
//!
//! # Example
//!
//! ```ignore
//! use animora_animation::{Animora, AnimationOptions};
//!
//! let mut engine = Animora::new(host);
//! engine.animate(".card", &AnimationOptions::new().y(-20.0).opacity(1.0).duration(600.0));
//!
//! // From the environment's animation-frame callback:
//! engine.frame(timestamp);
//! ```

pub mod animation;
pub mod easing;
pub mod engine;
pub mod interpolate;
pub mod keyframe;
pub mod options;
pub mod raster;
pub mod scheduler;
pub mod scroll_trigger;
pub mod stagger;
pub mod timeline;
pub mod transform;

#[cfg(test)]
mod testing;

pub use animation::{BuildReport, ElementAnimation, SkippedEffect};
pub use easing::Easing;
pub use engine::Animora;
pub use interpolate::{clamp_progress, lerp, lerp_color, Interpolate};
pub use keyframe::{KeyframeProps, KeyframeSample, KeyframeSet};
pub use options::{AnimationOptions, CompleteCallback, UpdateCallback};
pub use raster::{raster_overlay, RASTER_ID};
pub use scheduler::{FrameContext, FrameScheduler, FrameUpdate};
pub use scroll_trigger::{ScrollTrigger, ScrollTriggerOptions, TriggerId, TRIGGER_MARKER};
pub use stagger::StaggerConfig;
pub use timeline::Timeline;
pub use transform::{TransformState, TransformStore};

pub use animora_core::{ElementId, Host, Rgb, StyleProperty, Target, ViewportEvent};
