//! Frame scheduler
//!
//! Holds every running animation instance and advances all of them once per
//! animation frame. The scheduler is an ordinary value: each engine owns one,
//! and tests can build as many independent schedulers as they like.

use crate::transform::TransformStore;
use animora_core::Host;

/// What an animation instance may touch while it is being updated
pub struct FrameContext<'a> {
    pub host: &'a mut dyn Host,
    pub store: &'a mut TransformStore,
}

/// A schedulable animation instance
pub trait FrameUpdate {
    /// Advance to the frame timestamp `time` (milliseconds)
    fn update(&mut self, time: f64, ctx: &mut FrameContext<'_>);

    /// Once true, the scheduler drops the instance after the current update
    fn is_done(&self) -> bool;
}

/// The per-frame scheduler
///
/// There is no priority, timestep or capacity limit: every active instance
/// is updated on every frame with the timestamp the environment supplies.
#[derive(Default)]
pub struct FrameScheduler {
    active: Vec<Box<dyn FrameUpdate>>,
    running: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance, arming the frame callback if the loop is idle
    pub fn schedule(&mut self, instance: Box<dyn FrameUpdate>, host: &mut dyn Host) {
        self.active.push(instance);
        if !self.running {
            self.running = true;
            tracing::debug!("FrameScheduler: arming frame loop");
            host.request_animation_frame();
        }
    }

    /// Run one frame.
    ///
    /// Instances are visited in reverse insertion order so finished ones can
    /// be removed in place. Returns true if another frame was requested.
    pub fn tick(&mut self, time: f64, ctx: &mut FrameContext<'_>) -> bool {
        self.frames += 1;

        let mut i = self.active.len();
        while i > 0 {
            i -= 1;
            self.active[i].update(time, ctx);
            if self.active[i].is_done() {
                self.active.remove(i);
            }
        }

        tracing::trace!(
            "FrameScheduler: frame {} at {:.2}ms, {} active",
            self.frames,
            time,
            self.active.len()
        );

        if self.active.is_empty() {
            self.running = false;
            tracing::debug!("FrameScheduler: idle after {} frames", self.frames);
        } else {
            ctx.host.request_animation_frame();
        }
        self.running
    }

    /// Number of instances still running
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether a frame callback is outstanding
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames ticked since construction
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
