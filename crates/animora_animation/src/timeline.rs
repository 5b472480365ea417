//! Sequential timelines
//!
//! A timeline queues animation steps back to back: each `to` step starts
//! when the previous ones have finished, measured from the moment `play` is
//! called. Nothing runs until `play`.

use crate::engine::Animora;
use crate::options::AnimationOptions;
use animora_core::{Host, StyleProperty, Target};

/// Duration counted for a step that asks for zero
pub const FALLBACK_STEP_MS: f64 = 1000.0;

enum Step<'a> {
    Animate {
        target: Target,
        options: AnimationOptions,
    },
    Callback {
        callback: Box<dyn FnMut(f64) + 'a>,
        offset: f64,
    },
}

/// A timeline bound to an engine for as long as it is being built and played
pub struct Timeline<'a, H: Host> {
    engine: &'a mut Animora<H>,
    steps: Vec<Step<'a>>,
    total_delay: f64,
}

impl<'a, H: Host> Timeline<'a, H> {
    pub fn new(engine: &'a mut Animora<H>) -> Self {
        Self {
            engine,
            steps: Vec::new(),
            total_delay: 0.0,
        }
    }

    /// Sum of the durations queued so far
    pub fn total_delay(&self) -> f64 {
        self.total_delay
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Queue an animation starting after everything queued before it.
    ///
    /// The step's own `delay` is replaced by the running total.
    pub fn to(&mut self, target: impl Into<Target>, options: AnimationOptions) -> &mut Self {
        let step_ms = if options.duration == 0.0 || options.duration.is_nan() {
            FALLBACK_STEP_MS
        } else {
            options.duration
        };

        let mut options = options;
        options.delay = self.total_delay;
        self.steps.push(Step::Animate {
            target: target.into(),
            options,
        });
        self.total_delay += step_ms;
        self
    }

    /// Write the starting scale and opacity right now, then queue like `to`.
    ///
    /// The initial transform is written as a bare `scale(..)`, replacing any
    /// translation until the step starts.
    pub fn from(&mut self, target: impl Into<Target>, options: AnimationOptions) -> &mut Self {
        let target = target.into();
        let host = self.engine.host_mut();
        let elements = match &target {
            Target::Selector(selector) => host.select(selector),
            Target::Element(id) => vec![*id],
        };
        for element in elements {
            if let Some(scale) = options.scale {
                host.set_style(element, StyleProperty::Transform, &format!("scale({scale})"));
            }
            if let Some(opacity) = options.opacity {
                host.set_style(element, StyleProperty::Opacity, &opacity.to_string());
            }
        }
        self.to(target, options)
    }

    /// Queue a callback. It receives `offset` and does not move the total.
    pub fn add<F>(&mut self, callback: F, offset: f64) -> &mut Self
    where
        F: FnMut(f64) + 'a,
    {
        self.steps.push(Step::Callback {
            callback: Box::new(callback),
            offset,
        });
        self
    }

    /// Run every step in insertion order. May be called again to replay.
    pub fn play(&mut self) -> &mut Self {
        tracing::debug!(
            "timeline: playing {} step(s), {}ms total",
            self.steps.len(),
            self.total_delay
        );
        for step in &mut self.steps {
            match step {
                Step::Animate { target, options } => {
                    self.engine.animate(target.clone(), options);
                }
                Step::Callback { callback, offset } => callback(*offset),
            }
        }
        self
    }
}
