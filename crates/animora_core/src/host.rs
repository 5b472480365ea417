//! The environment the engine runs against
//!
//! A `Host` is whatever owns the elements: a browser document binding, the
//! headless document, or a test double. The engine never stores element
//! state of its own beyond the transform store; every read and write goes
//! through here.

use crate::color::Rgb;
use crate::element::ElementId;
use crate::events::EventType;
use crate::style::StyleProperty;

/// A fixed-position decorative layer (the debug raster grid)
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    /// Document-unique id used to find and remove the layer again
    pub id: String,
    /// Inline style declarations, in insertion order
    pub styles: Vec<(String, String)>,
}

impl Overlay {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            styles: Vec::new(),
        }
    }

    /// Builder: add a style declaration
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((name.into(), value.into()));
        self
    }

    /// Look up a declared style value
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Collaborator surface consumed by the animation engine
pub trait Host {
    // =========================================================================
    // Elements and styles
    // =========================================================================

    /// Resolve a selector to elements in document order.
    ///
    /// Unresolvable or invalid selectors yield an empty list.
    fn select(&self, selector: &str) -> Vec<ElementId>;

    /// Current computed value of a property, as the environment reports it
    fn computed_style(&self, element: ElementId, property: StyleProperty) -> Option<String>;

    /// Write a property on an element. Writes to dead elements are ignored.
    fn set_style(&mut self, element: ElementId, property: StyleProperty, value: &str);

    /// Resolve any CSS colour string to RGB, or `None` if unparseable
    fn resolve_color(&mut self, css: &str) -> Option<Rgb>;

    // =========================================================================
    // Timing
    // =========================================================================

    /// Monotonic timestamp in milliseconds
    fn now(&self) -> f64;

    /// Ask the environment to run the frame callback before the next repaint
    fn request_animation_frame(&mut self);

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Inner height of the viewport in pixels
    fn viewport_height(&self) -> f32;

    /// Top edge of the element's bounding box relative to the viewport
    fn bounding_top(&self, element: ElementId) -> Option<f32>;

    /// Start delivering an event type to the engine
    fn listen(&mut self, event_type: EventType);

    /// Stop delivering an event type to the engine
    fn unlisten(&mut self, event_type: EventType);

    // =========================================================================
    // Markers and overlays
    // =========================================================================

    fn has_marker(&self, element: ElementId, name: &str) -> bool;

    fn set_marker(&mut self, element: ElementId, name: &str);

    fn has_overlay(&self, id: &str) -> bool;

    fn insert_overlay(&mut self, overlay: Overlay);

    fn remove_overlay(&mut self, id: &str);
}
