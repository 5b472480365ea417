//! Minimal in-crate host for unit tests

use animora_core::{ElementId, EventType, Host, Overlay, Rgb, StyleProperty};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

#[derive(Default)]
pub struct MockElement {
    pub class: String,
    pub styles: FxHashMap<StyleProperty, String>,
    pub writes: FxHashMap<StyleProperty, usize>,
    pub top: f32,
    pub markers: FxHashSet<String>,
}

#[derive(Default)]
pub struct MockHost {
    pub elements: SlotMap<ElementId, MockElement>,
    pub now: f64,
    pub frame_requests: usize,
    pub viewport_height: f32,
    pub listening: FxHashSet<EventType>,
    pub overlays: Vec<Overlay>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            viewport_height: 1000.0,
            ..Default::default()
        }
    }

    pub fn add(&mut self, class: &str) -> ElementId {
        self.elements.insert(MockElement {
            class: class.to_string(),
            ..Default::default()
        })
    }

    pub fn style(&self, el: ElementId, property: StyleProperty) -> Option<&str> {
        self.elements[el].styles.get(&property).map(String::as_str)
    }

    pub fn writes(&self, el: ElementId, property: StyleProperty) -> usize {
        self.elements[el].writes.get(&property).copied().unwrap_or(0)
    }
}

impl Host for MockHost {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        let Some(class) = selector.strip_prefix('.') else {
            return Vec::new();
        };
        self.elements
            .iter()
            .filter(|(_, e)| e.class == class)
            .map(|(id, _)| id)
            .collect()
    }

    fn computed_style(&self, element: ElementId, property: StyleProperty) -> Option<String> {
        let el = self.elements.get(element)?;
        el.styles.get(&property).cloned().or_else(|| match property {
            StyleProperty::Opacity => Some("1".to_string()),
            StyleProperty::Color => Some("rgb(0, 0, 0)".to_string()),
            StyleProperty::BackgroundColor => Some("rgb(255, 255, 255)".to_string()),
            StyleProperty::Transform => Some("none".to_string()),
        })
    }

    fn set_style(&mut self, element: ElementId, property: StyleProperty, value: &str) {
        if let Some(el) = self.elements.get_mut(element) {
            el.styles.insert(property, value.to_string());
            *el.writes.entry(property).or_default() += 1;
        }
    }

    fn resolve_color(&mut self, css: &str) -> Option<Rgb> {
        match css {
            "red" => return Some(Rgb::new(255, 0, 0)),
            "blue" => return Some(Rgb::new(0, 0, 255)),
            "black" => return Some(Rgb::BLACK),
            "white" => return Some(Rgb::WHITE),
            _ => {}
        }
        let inner = css.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>().ok());
        Some(Rgb::new(
            channels.next()??,
            channels.next()??,
            channels.next()??,
        ))
    }

    fn now(&self) -> f64 {
        self.now
    }

    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn bounding_top(&self, element: ElementId) -> Option<f32> {
        self.elements.get(element).map(|e| e.top)
    }

    fn listen(&mut self, event_type: EventType) {
        self.listening.insert(event_type);
    }

    fn unlisten(&mut self, event_type: EventType) {
        self.listening.remove(&event_type);
    }

    fn has_marker(&self, element: ElementId, name: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|e| e.markers.contains(name))
    }

    fn set_marker(&mut self, element: ElementId, name: &str) {
        if let Some(el) = self.elements.get_mut(element) {
            el.markers.insert(name.to_string());
        }
    }

    fn has_overlay(&self, id: &str) -> bool {
        self.overlays.iter().any(|o| o.id == id)
    }

    fn insert_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    fn remove_overlay(&mut self, id: &str) {
        self.overlays.retain(|o| o.id != id);
    }
}
