//! In-memory document implementing [`Host`]
//!
//! Elements carry a tag, an optional id, classes, inline styles and a
//! layout top (document coordinates). Computed style is the inline value
//! when present and a fixed default otherwise; there is no cascade.

use crate::color::parse_css_color;
use crate::selector::{Selectable, SelectorList};
use animora_core::{ElementId, EventType, Host, Overlay, Result, Rgb, StyleProperty};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use slotmap::SlotMap;

/// Description of an element to insert
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    /// Space-separated class list
    pub class: String,
    /// Initial inline styles, by CSS property name
    pub style: IndexMap<String, String>,
    /// Layout top in document coordinates
    pub top: f32,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(name.into(), value.into());
        self
    }

    pub fn top(mut self, top: f32) -> Self {
        self.top = top;
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    inline: IndexMap<String, String>,
    writes: FxHashMap<StyleProperty, u32>,
    top: f32,
    markers: FxHashSet<String>,
}

impl Selectable for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Default computed value of a property with no inline style
pub fn default_computed(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::Transform => "none",
        StyleProperty::Opacity => "1",
        StyleProperty::Color => "rgb(0, 0, 0)",
        StyleProperty::BackgroundColor => "rgba(0, 0, 0, 0)",
    }
}

/// A headless document
#[derive(Debug)]
pub struct HeadlessDocument {
    nodes: SlotMap<ElementId, Node>,
    order: Vec<ElementId>,
    viewport_width: f32,
    viewport_height: f32,
    scroll_y: f32,
    clock_ms: f64,
    frame_requested: bool,
    frame_requests: u64,
    listening: FxHashSet<EventType>,
    overlays: IndexMap<String, Overlay>,
}

impl HeadlessDocument {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            viewport_width,
            viewport_height,
            scroll_y: 0.0,
            clock_ms: 0.0,
            frame_requested: false,
            frame_requests: 0,
            listening: FxHashSet::default(),
            overlays: IndexMap::new(),
        }
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Append an element at the end of the document
    pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
        let tag = if spec.tag.is_empty() {
            "div".to_string()
        } else {
            spec.tag.to_ascii_lowercase()
        };
        let id = self.nodes.insert(Node {
            tag,
            id: spec.id,
            classes: spec.class.split_whitespace().map(str::to_string).collect(),
            inline: spec.style,
            writes: FxHashMap::default(),
            top: spec.top,
            markers: FxHashSet::default(),
        });
        self.order.push(id);
        id
    }

    /// Remove an element. Its handle never resolves again.
    pub fn remove(&mut self, element: ElementId) -> bool {
        if self.nodes.remove(element).is_none() {
            return false;
        }
        self.order.retain(|&e| e != element);
        true
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve a selector, reporting unsupported syntax
    pub fn try_select(&self, selector: &str) -> Result<Vec<ElementId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .order
            .iter()
            .copied()
            .filter(|&e| self.nodes.get(e).is_some_and(|node| list.matches(node)))
            .collect())
    }

    /// Inline style by CSS property name
    pub fn inline_style(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(element)?.inline.get(name).map(String::as_str)
    }

    /// Inline value, or the default computed value for known properties
    pub fn style_value(&self, element: ElementId, name: &str) -> Option<String> {
        if let Some(value) = self.inline_style(element, name) {
            return Some(value.to_string());
        }
        if !self.contains(element) {
            return None;
        }
        StyleProperty::from_css_name(name).map(|p| default_computed(p).to_string())
    }

    /// How many times the engine wrote a property
    pub fn write_count(&self, element: ElementId, property: StyleProperty) -> u32 {
        self.nodes
            .get(element)
            .and_then(|n| n.writes.get(&property).copied())
            .unwrap_or(0)
    }

    pub fn set_layout_top(&mut self, element: ElementId, top: f32) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.top = top;
        }
    }

    // =========================================================================
    // Viewport and clock
    // =========================================================================

    pub fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, offset: f32) {
        self.scroll_y = offset.max(0.0);
    }

    pub fn clock(&self) -> f64 {
        self.clock_ms
    }

    pub fn advance_clock(&mut self, ms: f64) {
        self.clock_ms += ms;
    }

    /// Consume the pending frame request, if any
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    pub fn is_listening(&self, event_type: EventType) -> bool {
        self.listening.contains(&event_type)
    }

    pub fn overlay(&self, id: &str) -> Option<&Overlay> {
        self.overlays.get(id)
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Host for HeadlessDocument {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        self.try_select(selector).unwrap_or_else(|err| {
            tracing::warn!("{err}");
            Vec::new()
        })
    }

    fn computed_style(&self, element: ElementId, property: StyleProperty) -> Option<String> {
        self.style_value(element, property.css_name())
    }

    fn set_style(&mut self, element: ElementId, property: StyleProperty, value: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            tracing::trace!(?element, "style write to removed element dropped");
            return;
        };
        node.inline
            .insert(property.css_name().to_string(), value.to_string());
        *node.writes.entry(property).or_default() += 1;
    }

    fn resolve_color(&mut self, css: &str) -> Option<Rgb> {
        parse_css_color(css)
    }

    fn now(&self) -> f64 {
        self.clock_ms
    }

    fn request_animation_frame(&mut self) {
        self.frame_requested = true;
        self.frame_requests += 1;
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn bounding_top(&self, element: ElementId) -> Option<f32> {
        self.nodes.get(element).map(|n| n.top - self.scroll_y)
    }

    fn listen(&mut self, event_type: EventType) {
        self.listening.insert(event_type);
    }

    fn unlisten(&mut self, event_type: EventType) {
        self.listening.remove(&event_type);
    }

    fn has_marker(&self, element: ElementId, name: &str) -> bool {
        self.nodes
            .get(element)
            .is_some_and(|n| n.markers.contains(name))
    }

    fn set_marker(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.markers.insert(name.to_string());
        }
    }

    fn has_overlay(&self, id: &str) -> bool {
        self.overlays.contains_key(id)
    }

    fn insert_overlay(&mut self, overlay: Overlay) {
        self.overlays.insert(overlay.id.clone(), overlay);
    }

    fn remove_overlay(&mut self, id: &str) {
        self.overlays.shift_remove(id);
    }
}
