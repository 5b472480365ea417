//! Element identity

use slotmap::new_key_type;

new_key_type! {
    /// Handle to an element owned by the host document.
    ///
    /// Keys are generational: once the host removes an element, a later
    /// element reusing the same slot gets a different key. Side tables keyed
    /// by `ElementId` therefore never alias a dead element onto a live one.
    pub struct ElementId;
}

/// What an animation call is aimed at
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// Resolve through the host's selector engine at call time
    Selector(String),
    /// An already-resolved element
    Element(ElementId),
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Target::Element(id)
    }
}
