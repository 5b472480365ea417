//! Animora Headless
//!
//! Runs the animation engine without a browser:
//!
//! - [`HeadlessDocument`]: an in-memory [`Host`](animora_core::Host) with
//!   selectors, inline styles, layout tops, scrolling and a manual clock
//! - [`HeadlessRuntime`]: delivers animation frames on a fixed logical tick
//! - Scenarios: JSON documents of engine calls, environment changes and
//!   assertions, producing a machine-readable [`HeadlessReport`]

pub mod color;
pub mod document;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod selector;

pub use color::parse_css_color;
pub use document::{ElementSpec, HeadlessDocument};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{
    prepare_runtime, run_loaded_scenario, run_scenario, run_scenario_file, run_steps, RunOutcome,
};
pub use headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep, TimelineStep};
pub use selector::SelectorList;
