//! Animora Core
//!
//! The surface the animation engine consumes but does not own:
//!
//! - **Element identity**: generational handles issued by the host document
//! - **Host**: style reads/writes, colour resolution, timing, markers, overlays
//! - **Viewport events**: scroll/resize signals and listener bookkeeping
//!
//! Everything here is deliberately free of animation logic so that a browser
//! binding, a test double, or the headless document can all sit behind the
//! same [`Host`] trait.

pub mod color;
pub mod element;
pub mod error;
pub mod events;
pub mod host;
pub mod style;

pub use color::Rgb;
pub use element::{ElementId, Target};
pub use error::{Error, Result};
pub use events::{event_types, EventDispatcher, EventType, ViewportEvent};
pub use host::{Host, Overlay};
pub use style::StyleProperty;
