//! Viewport event dispatch
//!
//! The engine only cares about two environment signals: the viewport
//! scrolled, or the viewport changed size. Listeners are opaque keys owned by
//! the caller (scroll triggers, in practice).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Viewport event types
pub mod event_types {
    use super::EventType;

    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

/// A viewport signal delivered by the environment
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    Scroll { offset_y: f32 },
    Resize { width: f32, height: f32 },
}

impl ViewportEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            ViewportEvent::Scroll { .. } => event_types::SCROLL,
            ViewportEvent::Resize { .. } => event_types::RESIZE,
        }
    }
}

/// Maps event types to the listener keys registered for them
pub struct EventDispatcher<K> {
    listeners: FxHashMap<EventType, SmallVec<[K; 4]>>,
}

impl<K: Copy + PartialEq> EventDispatcher<K> {
    pub fn new() -> Self {
        Self {
            listeners: FxHashMap::default(),
        }
    }

    /// Register `key` for an event type.
    ///
    /// Returns true if this is the first listener for that type, i.e. the
    /// caller should start listening on the environment.
    pub fn register(&mut self, event_type: EventType, key: K) -> bool {
        let slot = self.listeners.entry(event_type).or_default();
        let first = slot.is_empty();
        slot.push(key);
        first
    }

    /// Remove `key` from every event type.
    ///
    /// Returns the event types that no longer have any listener.
    pub fn unregister(&mut self, key: K) -> SmallVec<[EventType; 2]> {
        let mut emptied = SmallVec::new();
        for (event_type, keys) in self.listeners.iter_mut() {
            let before = keys.len();
            keys.retain(|k| *k != key);
            if before > 0 && keys.is_empty() {
                emptied.push(*event_type);
            }
        }
        self.listeners.retain(|_, keys| !keys.is_empty());
        emptied
    }

    /// Snapshot of the keys registered for an event type, in registration order
    pub fn listeners(&self, event_type: EventType) -> SmallVec<[K; 4]> {
        self.listeners
            .get(&event_type)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_listeners(&self, event_type: EventType) -> bool {
        self.listeners
            .get(&event_type)
            .is_some_and(|keys| !keys.is_empty())
    }
}

impl<K: Copy + PartialEq> Default for EventDispatcher<K> {
    fn default() -> Self {
        Self::new()
    }
}
