//! Animation instances and the builder that creates them
//!
//! `build` turns one options set into one instance per element. Everything
//! the instance needs from the environment up front (opacity and colours to
//! blend from) is sampled here, once, at call time. A non-zero delay
//! therefore does not change which values an animation blends from.

use crate::easing::Easing;
use crate::interpolate::{clamp_progress, lerp, lerp_color, Interpolate};
use crate::keyframe::KeyframeSet;
use crate::options::{AnimationOptions, CompleteCallback, UpdateCallback};
use crate::scheduler::{FrameContext, FrameUpdate};
use crate::transform::{TransformState, TransformStore};
use animora_core::{ElementId, Host, Rgb, StyleProperty};
use std::fmt;

/// An effect that was dropped instead of failing the call
#[derive(Clone, Debug, PartialEq)]
pub enum SkippedEffect {
    /// The selector matched nothing
    NoElements { selector: String },
    /// Current opacity could not be read as a number
    InitialOpacity { element: ElementId },
    /// Current colour of the property could not be resolved
    InitialColor {
        element: ElementId,
        property: StyleProperty,
    },
    /// The requested colour could not be resolved
    TargetColor {
        element: ElementId,
        property: StyleProperty,
        value: String,
    },
    /// Fewer than two keyframes: nothing will ever be written
    DegenerateKeyframes { element: ElementId, keys: usize },
    /// Yoyo has no keyframe-mode behaviour; cycles replay forward
    KeyframeYoyo { element: ElementId },
}

impl fmt::Display for SkippedEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedEffect::NoElements { selector } => write!(f, "'{selector}' matched no elements"),
            SkippedEffect::InitialOpacity { element } => {
                write!(f, "{element:?}: current opacity is not a number")
            }
            SkippedEffect::InitialColor { element, property } => {
                write!(f, "{element:?}: current {property} could not be resolved")
            }
            SkippedEffect::TargetColor {
                element,
                property,
                value,
            } => write!(f, "{element:?}: {property} '{value}' could not be resolved"),
            SkippedEffect::DegenerateKeyframes { element, keys } => {
                write!(f, "{element:?}: {keys} keyframe(s), at least 2 needed")
            }
            SkippedEffect::KeyframeYoyo { element } => {
                write!(f, "{element:?}: yoyo ignored for keyframes")
            }
        }
    }
}

/// What a builder call did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    /// Instances handed to the scheduler
    pub scheduled: usize,
    pub skipped: Vec<SkippedEffect>,
}

impl BuildReport {
    pub fn merge(&mut self, other: BuildReport) {
        self.scheduled += other.scheduled;
        self.skipped.extend(other.skipped);
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// How the transform is driven
#[derive(Clone, Debug)]
enum Motion {
    /// Eased blend between two transforms
    Tween {
        start: TransformState,
        target: TransformState,
    },
    /// Piecewise-linear path on raw progress
    Keyframes(KeyframeSet),
}

/// A blend of one scalar or colour property from its sampled value
#[derive(Clone, Copy, Debug)]
struct Channel<T> {
    from: T,
    to: T,
}

/// One running animation on one element
pub struct ElementAnimation {
    element: ElementId,
    motion: Motion,
    opacity: Option<Channel<f32>>,
    background: Option<Channel<Rgb>>,
    color: Option<Channel<Rgb>>,
    start_time: f64,
    duration: f64,
    easing: Easing,
    repeat: u32,
    cycles: u32,
    yoyo: bool,
    save_pos: bool,
    on_update: Option<UpdateCallback>,
    on_complete: Option<CompleteCallback>,
    done: bool,
}

impl ElementAnimation {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Scheduled start of the current cycle
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Completed cycles that were followed by a restart
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn is_keyframed(&self) -> bool {
        matches!(self.motion, Motion::Keyframes(_))
    }

    /// Current start and target transforms (tween mode only)
    pub fn endpoints(&self) -> Option<(TransformState, TransformState)> {
        match &self.motion {
            Motion::Tween { start, target } => Some((*start, *target)),
            Motion::Keyframes(_) => None,
        }
    }

    fn apply(&self, progress: f32, eased: f32, host: &mut dyn Host) {
        match &self.motion {
            Motion::Keyframes(set) => {
                for sample in set.samples(progress) {
                    host.set_style(self.element, StyleProperty::Transform, &sample.transform.to_css());
                    if let Some(opacity) = sample.opacity {
                        host.set_style(self.element, StyleProperty::Opacity, &opacity.to_string());
                    }
                }
            }
            Motion::Tween { start, target } => {
                let current = start.lerp(target, eased);
                host.set_style(self.element, StyleProperty::Transform, &current.to_css());

                if let Some(ch) = self.opacity {
                    let value = lerp(ch.from, ch.to, eased);
                    host.set_style(self.element, StyleProperty::Opacity, &value.to_string());
                }
                if let Some(ch) = self.background {
                    let value = lerp_color(ch.from, ch.to, eased);
                    host.set_style(self.element, StyleProperty::BackgroundColor, &value.to_string());
                }
                if let Some(ch) = self.color {
                    let value = lerp_color(ch.from, ch.to, eased);
                    host.set_style(self.element, StyleProperty::Color, &value.to_string());
                }
            }
        }
    }

    fn swap_endpoints(&mut self) {
        if let Motion::Tween { start, target } = &mut self.motion {
            std::mem::swap(start, target);
        }
    }
}

impl FrameUpdate for ElementAnimation {
    fn update(&mut self, time: f64, ctx: &mut FrameContext<'_>) {
        if self.done || time < self.start_time {
            return;
        }

        let raw = clamp_progress((time - self.start_time) / self.duration);
        let progress = raw as f32;
        let eased = self.easing.apply(progress);

        self.apply(progress, eased, ctx.host);

        if let Some(on_update) = &self.on_update {
            on_update(eased);
        }

        // Completion is judged on raw progress; eased values may overshoot.
        if raw < 1.0 {
            return;
        }

        if self.cycles < self.repeat {
            self.cycles += 1;
            if self.yoyo {
                self.swap_endpoints();
            }
            self.start_time = time;
            tracing::trace!(element = ?self.element, "cycle {} restarted at {:.2}ms", self.cycles, time);
            return;
        }

        if self.save_pos {
            if let Motion::Tween { target, .. } = &self.motion {
                ctx.store.save(self.element, *target);
            }
        }

        self.done = true;
        tracing::debug!(element = ?self.element, "animation complete");
        if let Some(on_complete) = &self.on_complete {
            on_complete();
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

/// Build one instance per element.
///
/// Never fails: anything that cannot be honoured is left out of the instance
/// and listed in the report.
pub fn build(
    host: &mut dyn Host,
    store: &TransformStore,
    elements: &[ElementId],
    options: &AnimationOptions,
) -> (Vec<ElementAnimation>, BuildReport) {
    let mut report = BuildReport::default();
    let now = host.now();
    let start_time = now + options.delay;

    let instances = elements
        .iter()
        .map(|&element| {
            let motion = match &options.keyframes {
                Some(set) => {
                    if !set.has_segments() {
                        report.skipped.push(SkippedEffect::DegenerateKeyframes {
                            element,
                            keys: set.len(),
                        });
                    }
                    if options.yoyo && options.repeat > 0 {
                        tracing::warn!(?element, "yoyo is not supported with keyframes; ignoring");
                        report.skipped.push(SkippedEffect::KeyframeYoyo { element });
                    }
                    Motion::Keyframes(set.clone())
                }
                None => {
                    let start = store.base(element);
                    Motion::Tween {
                        start,
                        target: options.target_from(&start),
                    }
                }
            };

            // Opacity and colours only apply to tweens
            let tween = matches!(motion, Motion::Tween { .. });
            let opacity = options
                .opacity
                .filter(|_| tween)
                .and_then(|to| sample_opacity(host, element, to, &mut report));
            let background = options
                .background_color
                .as_deref()
                .filter(|_| tween)
                .and_then(|css| {
                    sample_color(host, element, StyleProperty::BackgroundColor, css, &mut report)
                });
            let color = options
                .color
                .as_deref()
                .filter(|_| tween)
                .and_then(|css| sample_color(host, element, StyleProperty::Color, css, &mut report));

            ElementAnimation {
                element,
                motion,
                opacity,
                background,
                color,
                start_time,
                duration: options.duration,
                easing: options.ease,
                repeat: options.repeat,
                cycles: 0,
                yoyo: options.yoyo,
                save_pos: options.save_pos,
                on_update: options.on_update.clone(),
                on_complete: options.on_complete.clone(),
                done: false,
            }
        })
        .collect::<Vec<_>>();

    for skipped in &report.skipped {
        tracing::debug!("effect skipped: {:?}", skipped);
    }
    report.scheduled = instances.len();
    (instances, report)
}

fn sample_opacity(
    host: &dyn Host,
    element: ElementId,
    to: f32,
    report: &mut BuildReport,
) -> Option<Channel<f32>> {
    let from = host
        .computed_style(element, StyleProperty::Opacity)
        .and_then(|raw| raw.trim().parse::<f32>().ok());
    match from {
        Some(from) => Some(Channel { from, to }),
        None => {
            report.skipped.push(SkippedEffect::InitialOpacity { element });
            None
        }
    }
}

fn sample_color(
    host: &mut dyn Host,
    element: ElementId,
    property: StyleProperty,
    css: &str,
    report: &mut BuildReport,
) -> Option<Channel<Rgb>> {
    let Some(from) = host
        .computed_style(element, property)
        .and_then(|current| host.resolve_color(&current))
    else {
        report
            .skipped
            .push(SkippedEffect::InitialColor { element, property });
        return None;
    };
    let Some(to) = host.resolve_color(css) else {
        report.skipped.push(SkippedEffect::TargetColor {
            element,
            property,
            value: css.to_string(),
        });
        return None;
    };
    Some(Channel { from, to })
}
