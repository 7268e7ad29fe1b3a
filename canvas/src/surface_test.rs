use serde_json::json;

use super::*;

#[test]
fn recorder_starts_empty() {
    assert!(CommandRecorder::new().commands().is_empty());
}

#[test]
fn recorder_keeps_call_order() {
    let mut rec = CommandRecorder::new();
    rec.save();
    rec.set_fill("#fff");
    rec.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    rec.restore();
    assert_eq!(
        rec.into_commands(),
        vec![
            DrawCommand::Save,
            DrawCommand::SetFill { color: "#fff".into() },
            DrawCommand::FillRect { rect: Rect::new(0.0, 0.0, 1.0, 1.0) },
            DrawCommand::Restore,
        ]
    );
}

#[test]
fn unknown_image_is_not_drawn() {
    let mut rec = CommandRecorder::new();
    let drawn = rec.draw_image("missing.png", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(!drawn);
    assert!(rec.commands().is_empty());
}

#[test]
fn registered_image_is_drawn() {
    let mut rec = CommandRecorder::new().with_image("logo.png");
    let drawn = rec.draw_image("logo.png", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert!(drawn);
    assert_eq!(rec.commands().len(), 1);
}

#[test]
fn commands_serialize_with_op_tag() {
    let value = serde_json::to_value(DrawCommand::Translate { x: 1.0, y: 2.0 }).unwrap();
    assert_eq!(value, json!({ "op": "translate", "x": 1.0, "y": 2.0 }));
    let value = serde_json::to_value(DrawCommand::BeginPath).unwrap();
    assert_eq!(value, json!({ "op": "begin_path" }));
}
