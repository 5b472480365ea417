//! Scenario runner that executes headless animation scenarios.

use crate::headless_assert::{
    evaluate_assert_idle, evaluate_assert_marker, evaluate_assert_overlay, evaluate_assert_style,
    AssertionResult,
};
use crate::headless_report::{HeadlessReport, RunTotals};
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep, TimelineStep};
use animora_animation::BuildReport;
use anyhow::Result;
use std::path::Path;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON.
pub fn run_scenario(input: &str, runtime_cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, runtime_cfg)
}

/// Execute a scenario file.
pub fn run_scenario_file(path: &Path, runtime_cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_path(path)?;
    run_loaded_scenario(&scenario, runtime_cfg)
}

/// Execute a pre-loaded scenario on a fresh runtime.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let mut runtime = prepare_runtime(scenario, runtime_cfg)?;
    Ok(run_steps(&scenario.steps, &mut runtime))
}

/// Build a runtime whose document holds the scenario's elements.
pub fn prepare_runtime(
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
) -> Result<HeadlessRuntime> {
    let mut runtime = HeadlessRuntime::new(runtime_cfg)?;
    let document = runtime.document_mut();
    for spec in &scenario.elements {
        document.insert(spec.clone());
    }
    tracing::debug!("scenario document has {} element(s)", document.len());
    Ok(runtime)
}

/// Run steps in order, stopping at the first failed assertion.
pub fn run_steps(steps: &[ScenarioStep], runtime: &mut HeadlessRuntime) -> RunOutcome {
    let mut skipped = Vec::new();

    for (step_index, step) in steps.iter().enumerate() {
        tracing::debug!("step {step_index}: {}", step.name());

        let result = match step {
            ScenarioStep::Animate { target, options } => {
                let report = runtime
                    .engine_mut()
                    .animate_with_report(target.as_str(), options);
                collect_skipped(step_index, report, &mut skipped);
                AssertionResult::Passed
            }
            ScenarioStep::Stagger {
                target,
                options,
                config,
            } => {
                let report = runtime.engine_mut().stagger(target.as_str(), options, *config);
                collect_skipped(step_index, report, &mut skipped);
                AssertionResult::Passed
            }
            ScenarioStep::Timeline { steps } => {
                let mut timeline = runtime.engine_mut().timeline();
                for entry in steps {
                    match entry {
                        TimelineStep::To { target, options } => {
                            timeline.to(target.as_str(), options.clone())
                        }
                        TimelineStep::From { target, options } => {
                            timeline.from(target.as_str(), options.clone())
                        }
                    };
                }
                timeline.play();
                AssertionResult::Passed
            }
            ScenarioStep::ScrollTrigger { target, options } => {
                runtime
                    .engine_mut()
                    .scroll_trigger(target.as_str(), options.clone());
                AssertionResult::Passed
            }
            ScenarioStep::ShowRaster { size } => {
                runtime.engine_mut().show_raster(*size);
                AssertionResult::Passed
            }
            ScenarioStep::Scroll { y } => {
                runtime.scroll_to(*y);
                AssertionResult::Passed
            }
            ScenarioStep::Resize { width, height } => {
                runtime.resize(*width, *height);
                AssertionResult::Passed
            }
            ScenarioStep::Wait { ms } => {
                runtime.wait(*ms);
                AssertionResult::Passed
            }
            ScenarioStep::Tick { frames } => {
                runtime.tick(*frames);
                AssertionResult::Passed
            }
            ScenarioStep::AssertStyle {
                target,
                property,
                value,
                tolerance,
            } => evaluate_assert_style(target, property, value, *tolerance, runtime.document()),
            ScenarioStep::AssertMarker {
                target,
                marker,
                present,
            } => evaluate_assert_marker(target, marker, *present, runtime.document()),
            ScenarioStep::AssertOverlay { id, present } => {
                evaluate_assert_overlay(id, *present, runtime.document())
            }
            ScenarioStep::AssertIdle { idle } => {
                evaluate_assert_idle(*idle, runtime.engine().scheduler().active_count())
            }
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::info!("step {step_index} ({}) failed: {code}: {message}", step.name());
            let report = HeadlessReport::failed(
                step.name(),
                step_index,
                message,
                totals(runtime),
                skipped,
            );
            return RunOutcome::Failed { report };
        }
    }

    RunOutcome::Passed {
        report: HeadlessReport::passed(totals(runtime), skipped),
    }
}

fn totals(runtime: &HeadlessRuntime) -> RunTotals {
    RunTotals {
        elapsed_frames: runtime.elapsed_frames(),
        elapsed_ms: runtime.elapsed_ms(),
        delivered_frames: runtime.delivered_frames(),
    }
}

fn collect_skipped(step_index: usize, report: BuildReport, out: &mut Vec<String>) {
    out.extend(
        report
            .skipped
            .into_iter()
            .map(|effect| format!("step {step_index}: {effect}")),
    );
}
