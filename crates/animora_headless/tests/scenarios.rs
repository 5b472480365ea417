use animora_core::{Host, StyleProperty};
use animora_headless::{
    prepare_runtime, run_scenario, run_steps, HeadlessRunConfig, HeadlessScenario, ReportStatus,
};

fn cfg(tick_ms: u64) -> HeadlessRunConfig {
    HeadlessRunConfig {
        tick_ms,
        ..Default::default()
    }
}

fn assert_passes(json: &str, tick_ms: u64) {
    let outcome = run_scenario(json, cfg(tick_ms)).unwrap();
    let report = outcome.report();
    assert_eq!(
        report.status,
        ReportStatus::Passed,
        "step {:?} failed: {:?}",
        report.failed_step_index,
        report.message
    );
}

#[test]
fn test_default_ease_midpoint_and_completion() {
    assert_passes(
        r##"{
            "elements": [{"class": "box"}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {"x": 100}},
                {"type": "wait", "ms": 500},
                {"type": "assert_style", "target": ".box", "property": "transform",
                 "value": "translate3d(87.5px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)", "tolerance": 0.001},
                {"type": "assert_idle", "idle": false},
                {"type": "wait", "ms": 500},
                {"type": "assert_style", "target": ".box", "property": "transform",
                 "value": "translate3d(100px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "assert_idle"}
            ]
        }"##,
        100,
    );
}

#[test]
fn test_stagger_start_offsets() {
    assert_passes(
        r##"{
            "elements": [{"id": "a", "class": "item"}, {"id": "b", "class": "item"}, {"id": "c", "class": "item"}],
            "steps": [
                {"type": "stagger", "target": ".item", "options": {"x": 10, "duration": 100, "ease": "linear"}, "config": {"each": 50}},
                {"type": "wait", "ms": 50},
                {"type": "assert_style", "target": "#a", "property": "transform", "value": "translate3d(5px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)", "tolerance": 0.001},
                {"type": "assert_style", "target": "#b", "property": "transform", "value": "translate3d(0px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "assert_style", "target": "#c", "property": "transform", "value": "none"},
                {"type": "wait", "ms": 150},
                {"type": "assert_idle"}
            ]
        }"##,
        50,
    );
}

#[test]
fn test_keyframes_are_linear_in_time() {
    assert_passes(
        r##"{
            "elements": [{"class": "box"}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {
                    "duration": 1000, "ease": "easeInOut",
                    "keyframes": {"0": {"x": 0, "opacity": 0}, "0.5": {"x": 50, "opacity": 1}, "1": {"x": 100, "opacity": 0.5}}
                }},
                {"type": "wait", "ms": 250},
                {"type": "assert_style", "target": ".box", "property": "transform", "value": "translate3d(25px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)", "tolerance": 0.001},
                {"type": "assert_style", "target": ".box", "property": "opacity", "value": "0.5", "tolerance": 0.001},
                {"type": "wait", "ms": 750},
                {"type": "assert_style", "target": ".box", "property": "opacity", "value": "0.5"},
                {"type": "assert_idle"}
            ]
        }"##,
        250,
    );
}

#[test]
fn test_scroll_trigger_fires_on_scroll() {
    assert_passes(
        r##"{
            "elements": [
                {"id": "near", "class": "reveal", "style": {"opacity": "0"}, "top": 200},
                {"id": "far", "class": "reveal", "style": {"opacity": "0"}, "top": 2000}
            ],
            "steps": [
                {"type": "scroll_trigger", "target": ".reveal", "options": {"opacity": 1, "duration": 100, "ease": "linear"}},
                {"type": "assert_marker", "target": "#near"},
                {"type": "assert_marker", "target": "#far", "present": false},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": "#near", "property": "opacity", "value": "1"},
                {"type": "assert_style", "target": "#far", "property": "opacity", "value": "0"},
                {"type": "scroll", "y": 1500},
                {"type": "assert_marker", "target": ".reveal"},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": "#far", "property": "opacity", "value": "1"},
                {"type": "assert_idle"}
            ]
        }"##,
        50,
    );
}

#[test]
fn test_resize_reevaluates_triggers() {
    assert_passes(
        r##"{
            "elements": [{"class": "card", "top": 700}],
            "steps": [
                {"type": "scroll_trigger", "target": ".card", "options": {"offset": 0.5}},
                {"type": "assert_marker", "target": ".card", "present": false},
                {"type": "resize", "width": 1280, "height": 1600},
                {"type": "assert_marker", "target": ".card"}
            ]
        }"##,
        16,
    );
}

#[test]
fn test_raster_toggle() {
    assert_passes(
        r##"{
            "steps": [
                {"type": "show_raster", "size": 32},
                {"type": "assert_overlay", "id": "volt-grid"},
                {"type": "show_raster"},
                {"type": "assert_overlay", "id": "volt-grid", "present": false}
            ]
        }"##,
        16,
    );
}

#[test]
fn test_save_pos_continuity() {
    assert_passes(
        r##"{
            "elements": [{"class": "box"}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {"x": 40, "duration": 100, "savePos": true}},
                {"type": "wait", "ms": 100},
                {"type": "animate", "target": ".box", "options": {"x": 10, "duration": 100}},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": ".box", "property": "transform", "value": "translate3d(50px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "animate", "target": ".box", "options": {"x": 10, "duration": 100}},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": ".box", "property": "transform", "value": "translate3d(50px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"}
            ]
        }"##,
        100,
    );
}

#[test]
fn test_timeline_from_then_sequence() {
    assert_passes(
        r##"{
            "elements": [{"id": "title"}, {"id": "body"}],
            "steps": [
                {"type": "timeline", "steps": [
                    {"op": "from", "target": "#title", "options": {"scale": 0.5, "opacity": 0, "duration": 200}},
                    {"op": "to", "target": "#body", "options": {"y": 20, "duration": 200}}
                ]},
                {"type": "assert_style", "target": "#title", "property": "transform", "value": "scale(0.5)"},
                {"type": "assert_style", "target": "#title", "property": "opacity", "value": "0"},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": "#body", "property": "transform", "value": "none"},
                {"type": "wait", "ms": 300},
                {"type": "assert_style", "target": "#body", "property": "transform", "value": "translate3d(0px,20px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "assert_idle"}
            ]
        }"##,
        100,
    );
}

#[test]
fn test_yoyo_returns_to_start() {
    assert_passes(
        r##"{
            "elements": [{"class": "box"}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {"x": 30, "duration": 100, "repeat": 1, "yoyo": true, "ease": "linear"}},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": ".box", "property": "transform", "value": "translate3d(30px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "wait", "ms": 100},
                {"type": "assert_style", "target": ".box", "property": "transform", "value": "translate3d(0px,0px,0px) scale(1) rotate(0deg) skew(0deg,0deg)"},
                {"type": "assert_idle"}
            ]
        }"##,
        100,
    );
}

#[test]
fn test_colors_blend_from_computed_defaults() {
    assert_passes(
        r##"{
            "elements": [{"class": "box", "style": {"color": "#000"}}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {"color": "#ff0000", "backgroundColor": "white", "ease": "linear", "duration": 100}},
                {"type": "wait", "ms": 50},
                {"type": "assert_style", "target": ".box", "property": "color", "value": "rgb(128,0,0)"},
                {"type": "assert_style", "target": ".box", "property": "background-color", "value": "rgb(128,128,128)"}
            ]
        }"##,
        50,
    );
}

#[test]
fn test_failed_assertion_reports_step() {
    let outcome = run_scenario(
        r##"{
            "elements": [{"class": "box"}],
            "steps": [
                {"type": "animate", "target": ".box", "options": {"x": 10, "duration": 1000}},
                {"type": "tick", "frames": 2},
                {"type": "assert_idle"}
            ]
        }"##,
        cfg(16),
    )
    .unwrap();
    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.elapsed_frames, 2);
    assert_eq!(report.elapsed_ms, 32);
    assert_eq!(report.delivered_frames, 2);
}

#[test]
fn test_removed_element_stops_receiving_writes() {
    let scenario = HeadlessScenario::from_json(
        r##"{"elements": [{"class": "box"}], "steps": [
            {"type": "animate", "target": ".box", "options": {"x": 10, "duration": 100}}
        ]}"##,
    )
    .unwrap();
    let mut runtime = prepare_runtime(&scenario, cfg(50)).unwrap();
    assert!(!run_steps(&scenario.steps, &mut runtime).is_failed());

    let el = runtime.document().select(".box")[0];
    runtime.tick(1);
    assert_eq!(runtime.document().write_count(el, StyleProperty::Transform), 1);

    runtime.document_mut().remove(el);
    runtime.tick(2);
    assert!(runtime.engine().is_idle());
    assert_eq!(runtime.document().computed_style(el, StyleProperty::Transform), None);
}
