#![allow(clippy::float_cmp)]

use dmsuite_canvas::{Layer, LayerId, LayerKind, Rect, ShapeKind, View};
use serde_json::json;

use super::*;

fn one_layer() -> DesignDocument {
    let layer = Layer::new(LayerKind::shape(ShapeKind::Rectangle, "#000000"), Rect::new(10.0, 10.0, 100.0, 50.0))
        .with_id("L1");
    DesignDocument::from_layers([layer]).unwrap()
}

fn parse(value: serde_json::Value) -> Vec<ScriptEvent> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn parses_events_with_defaults() {
    let events = parse(json!([
        { "type": "pointer_down", "x": 1.0, "y": 2.0 },
        { "type": "pointer_move", "x": 3.0, "y": 4.0 },
        { "type": "pointer_up", "x": 3.0, "y": 4.0, "button": "secondary" },
        { "type": "key_down", "key": "d", "modifiers": { "meta": true } },
    ]));
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], ScriptEvent::PointerDown { button: ScriptButton::Primary, .. }));
    assert!(matches!(events[2], ScriptEvent::PointerUp { button: ScriptButton::Secondary, .. }));
    match &events[3] {
        ScriptEvent::KeyDown { key, modifiers, text_focus } => {
            assert_eq!(key, "d");
            assert!(modifiers.meta && !modifiers.ctrl);
            assert!(!text_focus);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn unknown_event_type_is_rejected() {
    let result = serde_json::from_value::<Vec<ScriptEvent>>(json!([{ "type": "wheel", "dy": 1.0 }]));
    assert!(result.is_err());
}

#[test]
fn replays_drag_and_delete() {
    let events = parse(json!([
        { "type": "pointer_down", "x": 50.0, "y": 30.0 },
        { "type": "pointer_move", "x": 80.0, "y": 30.0 },
        { "type": "pointer_up", "x": 80.0, "y": 30.0 },
    ]));
    let mut core = EngineCore::new();
    let out = replay(&mut core, one_layer(), &events);
    assert_eq!(out.doc.get(&LayerId::new("L1")).unwrap().bounds(), Rect::new(40.0, 10.0, 100.0, 50.0));
    assert_eq!(out.changes, 2);
    assert_eq!(out.cursor, "move");

    let out = replay(&mut core, out.doc, &parse(json!([{ "type": "key_down", "key": "Delete" }])));
    assert!(out.doc.is_empty());
}

#[test]
fn replay_honours_display_scale() {
    let events = parse(json!([
        { "type": "pointer_down", "x": 100.0, "y": 60.0 },
        { "type": "pointer_move", "x": 160.0, "y": 60.0 },
        { "type": "pointer_up", "x": 160.0, "y": 60.0 },
    ]));
    let mut core = EngineCore::new();
    core.view = View::new(2.0);
    let out = replay(&mut core, one_layer(), &events);
    assert_eq!(out.doc.get(&LayerId::new("L1")).unwrap().bounds().x, 40.0);
}

#[test]
fn duplicate_counts_prevented_default() {
    let events = parse(json!([
        { "type": "pointer_down", "x": 50.0, "y": 30.0 },
        { "type": "pointer_up", "x": 50.0, "y": 30.0 },
        { "type": "key_down", "key": "d", "modifiers": { "ctrl": true } },
    ]));
    let out = replay(&mut EngineCore::new(), one_layer(), &events);
    assert_eq!(out.doc.len(), 2);
    assert_eq!(out.prevented, 1);
}

#[test]
fn focused_text_input_swallows_keys() {
    let doc = dmsuite_canvas::ops::select_layer(&one_layer(), &LayerId::new("L1"));
    let events = parse(json!([{ "type": "key_down", "key": "Backspace", "text_focus": true }]));
    let out = replay(&mut EngineCore::new(), doc, &events);
    assert_eq!(out.doc.len(), 1);
    assert_eq!(out.changes, 0);
}
