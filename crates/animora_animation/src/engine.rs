//! The `Animora` entry point
//!
//! Owns everything with a lifetime longer than one call: the host, the frame
//! scheduler, the transform store and the registered scroll triggers. The
//! environment drives it through two callbacks, [`Animora::frame`] and
//! [`Animora::dispatch`].

use crate::animation::{build, BuildReport, SkippedEffect};
use crate::options::AnimationOptions;
use crate::raster::toggle_raster;
use crate::scheduler::{FrameContext, FrameScheduler};
use crate::scroll_trigger::{ScrollTrigger, ScrollTriggerOptions, TriggerId};
use crate::stagger::StaggerConfig;
use crate::timeline::Timeline;
use crate::transform::TransformStore;
use animora_core::{event_types, ElementId, EventDispatcher, Host, Target, ViewportEvent};
use slotmap::SlotMap;
use smallvec::SmallVec;

/// Animation engine bound to one host
pub struct Animora<H: Host> {
    host: H,
    scheduler: FrameScheduler,
    store: TransformStore,
    triggers: SlotMap<TriggerId, ScrollTrigger>,
    dispatcher: EventDispatcher<TriggerId>,
}

impl<H: Host> Animora<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            scheduler: FrameScheduler::new(),
            store: TransformStore::new(),
            triggers: SlotMap::with_key(),
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn store(&self) -> &TransformStore {
        &self.store
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Whether any animation is still running
    pub fn is_idle(&self) -> bool {
        self.scheduler.active_count() == 0
    }

    /// Resolve a target to elements, in document order
    pub fn resolve(&self, target: &Target) -> Vec<ElementId> {
        match target {
            Target::Selector(selector) => self.host.select(selector),
            Target::Element(id) => vec![*id],
        }
    }

    // =========================================================================
    // Animation calls
    // =========================================================================

    /// Animate every element the target resolves to.
    ///
    /// Never fails; see [`Animora::animate_with_report`] for what was dropped.
    pub fn animate(&mut self, target: impl Into<Target>, options: &AnimationOptions) {
        self.animate_with_report(target, options);
    }

    /// Like [`Animora::animate`], returning the build report
    pub fn animate_with_report(
        &mut self,
        target: impl Into<Target>,
        options: &AnimationOptions,
    ) -> BuildReport {
        let target = target.into();
        let elements = self.resolve(&target);
        if elements.is_empty() {
            return Self::nothing_matched(&target);
        }
        self.animate_elements(&elements, options)
    }

    /// Animate `elements` with start times offset by `config.each`
    pub fn stagger(
        &mut self,
        target: impl Into<Target>,
        options: &AnimationOptions,
        config: StaggerConfig,
    ) -> BuildReport {
        let target = target.into();
        let elements = self.resolve(&target);
        if elements.is_empty() {
            return Self::nothing_matched(&target);
        }

        let mut report = BuildReport::default();
        for (index, &element) in elements.iter().enumerate() {
            let mut per_element = options.clone();
            per_element.delay = config.delay_for(options.delay, index);
            report.merge(self.animate_elements(&[element], &per_element));
        }
        tracing::debug!(
            "stagger: {} element(s), {}ms apart",
            elements.len(),
            config.step()
        );
        report
    }

    /// Start a sequential timeline on this engine
    pub fn timeline(&mut self) -> Timeline<'_, H> {
        Timeline::new(self)
    }

    /// Register a scroll trigger and evaluate it once right away
    pub fn scroll_trigger(
        &mut self,
        target: impl Into<Target>,
        options: ScrollTriggerOptions,
    ) -> TriggerId {
        let elements = self.resolve(&target.into());
        let id = self.triggers.insert(ScrollTrigger::new(elements, options));

        for event_type in [event_types::SCROLL, event_types::RESIZE] {
            if self.dispatcher.register(event_type, id) {
                self.host.listen(event_type);
            }
        }
        tracing::debug!(?id, "scroll trigger registered");

        self.evaluate_trigger(id);
        id
    }

    /// Unregister a trigger. Returns false if it was already gone.
    pub fn remove_scroll_trigger(&mut self, id: TriggerId) -> bool {
        if self.triggers.remove(id).is_none() {
            return false;
        }
        for event_type in self.dispatcher.unregister(id) {
            self.host.unlisten(event_type);
        }
        tracing::debug!(?id, "scroll trigger removed");
        true
    }

    pub fn trigger(&self, id: TriggerId) -> Option<&ScrollTrigger> {
        self.triggers.get(id)
    }

    /// Toggle the debug grid. Returns true if it is visible afterwards.
    pub fn show_raster(&mut self, size: Option<u32>) -> bool {
        toggle_raster(&mut self.host, size)
    }

    // =========================================================================
    // Environment callbacks
    // =========================================================================

    /// Animation-frame callback. Returns true if another frame was requested.
    pub fn frame(&mut self, time: f64) -> bool {
        let mut ctx = FrameContext {
            host: &mut self.host,
            store: &mut self.store,
        };
        self.scheduler.tick(time, &mut ctx)
    }

    /// Scroll or resize signal from the environment
    pub fn dispatch(&mut self, event: ViewportEvent) {
        let listeners: SmallVec<[TriggerId; 4]> = self.dispatcher.listeners(event.event_type());
        tracing::trace!("dispatch {:?} to {} trigger(s)", event, listeners.len());
        for id in listeners {
            self.evaluate_trigger(id);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn animate_elements(
        &mut self,
        elements: &[ElementId],
        options: &AnimationOptions,
    ) -> BuildReport {
        let (instances, report) = build(&mut self.host, &self.store, elements, options);
        for instance in instances {
            self.scheduler.schedule(Box::new(instance), &mut self.host);
        }
        report
    }

    fn evaluate_trigger(&mut self, id: TriggerId) {
        let Some(trigger) = self.triggers.get(id) else {
            return;
        };
        let fired = trigger.fire(&mut self.host);
        if fired.is_empty() {
            return;
        }
        let options = trigger.animation().clone();
        for element in fired {
            self.animate_elements(&[element], &options);
        }
    }

    fn nothing_matched(target: &Target) -> BuildReport {
        let selector = match target {
            Target::Selector(s) => s.clone(),
            Target::Element(id) => format!("{id:?}"),
        };
        tracing::debug!("no elements matched '{selector}'");
        BuildReport {
            scheduled: 0,
            skipped: vec![SkippedEffect::NoElements { selector }],
        }
    }
}
