//! Headless frame runtime
//!
//! Drives an [`Animora`] engine over a [`HeadlessDocument`] with a logical
//! clock. A frame callback is only delivered when the engine asked for one,
//! mirroring how a browser schedules animation frames.

use crate::document::HeadlessDocument;
use animora_animation::Animora;
use animora_core::{Error, ViewportEvent};
use anyhow::Result;

/// Configuration for deterministic headless execution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessRunConfig {
    /// Logical viewport width.
    pub width: u32,
    /// Logical viewport height.
    pub height: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config("headless dimensions must be non-zero".into()).into());
        }
        if self.tick_ms == 0 {
            return Err(Error::Config("headless tick_ms must be > 0".into()).into());
        }
        Ok(())
    }

    /// Frames needed to cover `ms`, rounding up
    pub fn frames_for(&self, ms: u64) -> u32 {
        if ms == 0 {
            return 0;
        }
        let tick = self.tick_ms.max(1);
        let frames = ms.saturating_add(tick - 1) / tick;
        frames.min(u32::MAX as u64) as u32
    }
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime {
    cfg: HeadlessRunConfig,
    engine: Animora<HeadlessDocument>,
    elapsed_frames: u64,
    elapsed_ms: u64,
    delivered_frames: u64,
}

impl HeadlessRuntime {
    pub fn new(cfg: HeadlessRunConfig) -> Result<Self> {
        Self::with_document(
            cfg,
            HeadlessDocument::new(cfg.width as f32, cfg.height as f32),
        )
    }

    pub fn with_document(cfg: HeadlessRunConfig, document: HeadlessDocument) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            engine: Animora::new(document),
            elapsed_frames: 0,
            elapsed_ms: 0,
            delivered_frames: 0,
        })
    }

    pub fn config(&self) -> &HeadlessRunConfig {
        &self.cfg
    }

    pub fn engine(&self) -> &Animora<HeadlessDocument> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Animora<HeadlessDocument> {
        &mut self.engine
    }

    pub fn document(&self) -> &HeadlessDocument {
        self.engine.host()
    }

    pub fn document_mut(&mut self) -> &mut HeadlessDocument {
        self.engine.host_mut()
    }

    /// Frames stepped so far, whether or not a callback ran
    pub fn elapsed_frames(&self) -> u64 {
        self.elapsed_frames
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Frames on which the engine's frame callback actually ran
    pub fn delivered_frames(&self) -> u64 {
        self.delivered_frames
    }

    /// Advance the clock by `dt_ms` and deliver a frame if one is pending
    pub fn step(&mut self, dt_ms: u64) {
        self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);

        let document = self.engine.host_mut();
        document.advance_clock(dt_ms as f64);
        if !document.take_frame_request() {
            return;
        }
        let now = document.clock();
        self.delivered_frames += 1;
        self.engine.frame(now);
    }

    /// Step `frames` frames of `tick_ms` each
    pub fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step(self.cfg.tick_ms);
        }
    }

    /// Let `ms` of logical time pass in `tick_ms` steps; the last may be shorter
    pub fn wait(&mut self, ms: u64) {
        let mut remaining = ms;
        for _ in 0..self.cfg.frames_for(ms) {
            let dt = remaining.min(self.cfg.tick_ms);
            remaining -= dt;
            self.step(dt);
        }
    }

    /// Step until no animation is running. Returns false if `max_frames` ran out first.
    pub fn run_until_idle(&mut self, max_frames: u32) -> bool {
        for _ in 0..max_frames {
            if self.engine.is_idle() {
                return true;
            }
            self.step(self.cfg.tick_ms);
        }
        self.engine.is_idle()
    }

    pub fn scroll_to(&mut self, offset_y: f32) {
        let document = self.engine.host_mut();
        document.set_scroll_y(offset_y);
        let offset_y = document.scroll_y();
        self.engine.dispatch(ViewportEvent::Scroll { offset_y });
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.host_mut().set_viewport(width, height);
        self.engine.dispatch(ViewportEvent::Resize { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementSpec;
    use animora_animation::AnimationOptions;
    use animora_core::{Host, StyleProperty};

    #[test]
    fn test_rejects_invalid_config() {
        let cfg = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(HeadlessRuntime::new(cfg).is_err());
        let cfg = HeadlessRunConfig {
            width: 0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Config(_))));
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn test_frames_for_rounds_up() {
        let cfg = HeadlessRunConfig::default();
        assert_eq!(cfg.frames_for(0), 0);
        assert_eq!(cfg.frames_for(16), 1);
        assert_eq!(cfg.frames_for(17), 2);
    }

    #[test]
    fn test_frames_only_delivered_on_request() {
        let mut rt = HeadlessRuntime::new(HeadlessRunConfig::default()).unwrap();
        rt.tick(3);
        assert_eq!(rt.elapsed_frames(), 3);
        assert_eq!(rt.delivered_frames(), 0);

        let el = rt.document_mut().insert(ElementSpec::new("div").class("box"));
        rt.engine_mut()
            .animate(".box", &AnimationOptions::new().x(10.0).duration(32.0));
        rt.tick(5);
        assert_eq!(rt.delivered_frames(), 2);
        assert!(rt.engine().is_idle());
        assert!(rt
            .document()
            .computed_style(el, StyleProperty::Transform)
            .is_some_and(|css| css.starts_with("translate3d(10px,")));
    }

    #[test]
    fn test_wait_splits_last_step() {
        let mut rt = HeadlessRuntime::new(HeadlessRunConfig::default()).unwrap();
        rt.wait(40);
        assert_eq!(rt.elapsed_frames(), 3);
        assert_eq!(rt.elapsed_ms(), 40);
        assert_eq!(rt.document().clock(), 40.0);
    }
}
