//! End-to-end editing session through the public API: a host loads a
//! document from JSON, routes pointer and keyboard events through the engine,
//! applies the returned actions, and renders headless.

use dmsuite_canvas::ops::{self, Direction};
use dmsuite_canvas::surface::{CommandRecorder, DrawCommand};
use dmsuite_canvas::{
    Action, Button, DesignDocument, EngineCore, Key, LayerId, Modifiers, PartialLayer, Point, Rect, View, hit,
    render, render_design,
};
use serde_json::json;

struct Session {
    core: EngineCore,
    doc: DesignDocument,
}

impl Session {
    fn apply(&mut self, actions: Vec<Action>) {
        for action in actions {
            if let Action::DocumentChanged(next) = action {
                self.doc = next;
            }
        }
    }

    fn click_drag(&mut self, from: Point, to: Point) {
        let a = self.core.on_pointer_down(&self.doc, from, Button::Primary);
        self.apply(a);
        let a = self.core.on_pointer_move(&self.doc, to);
        self.apply(a);
        let a = self.core.on_pointer_up(&self.doc, to, Button::Primary);
        self.apply(a);
    }

    fn key(&mut self, key: &str, modifiers: Modifiers) {
        let a = self.core.on_key_down(&self.doc, &Key::new(key), modifiers, false);
        self.apply(a);
    }
}

fn poster_json() -> String {
    json!({
        "layers": {
            "bg": {
                "id": "bg", "name": "Backdrop",
                "kind": { "type": "shape", "shape": "rectangle", "fill": "#0F172A" },
                "x": 0.0, "y": 0.0, "width": 400.0, "height": 300.0,
                "locked": true
            },
            "title": {
                "id": "title", "name": "Title",
                "kind": { "type": "text", "content": "Summer\nSale", "font_size": 32.0, "align": "center" },
                "x": 50.0, "y": 40.0, "width": 300.0, "height": 90.0
            },
            "logo": {
                "id": "logo", "name": "Logo",
                "kind": { "type": "image", "src": "logo.png" },
                "x": 10.0, "y": 10.0, "width": 100.0, "height": 50.0
            }
        },
        "layer_order": ["bg", "title", "logo"],
        "background": "#FFFFFF"
    })
    .to_string()
}

#[test]
fn document_roundtrips_through_json() {
    let doc = DesignDocument::from_json(&poster_json()).unwrap();
    assert_eq!(doc.len(), 3);
    let again = DesignDocument::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn drag_logo_then_delete_it() {
    let mut s = Session { core: EngineCore::new(), doc: DesignDocument::from_json(&poster_json()).unwrap() };
    let logo = LayerId::new("logo");

    s.click_drag(Point::new(50.0, 30.0), Point::new(80.0, 30.0));
    assert_eq!(s.doc.selection(), Some(&logo));
    assert_eq!(s.doc.get(&logo).unwrap().bounds(), Rect::new(40.0, 10.0, 100.0, 50.0));

    s.key("Delete", Modifiers::default());
    assert!(!s.doc.contains(&logo));
    assert!(!s.doc.layer_order().contains(&logo));
    assert!(s.doc.selection().is_none());
}

#[test]
fn locked_backdrop_survives_interaction() {
    let mut s = Session { core: EngineCore::new(), doc: DesignDocument::from_json(&poster_json()).unwrap() };
    let bg = LayerId::new("bg");

    s.click_drag(Point::new(380.0, 280.0), Point::new(300.0, 200.0));
    assert_eq!(s.doc.selection(), Some(&bg));
    assert_eq!(s.doc.get(&bg).unwrap().bounds(), Rect::new(0.0, 0.0, 400.0, 300.0));

    s.key("Backspace", Modifiers::default());
    assert!(s.doc.contains(&bg));
}

#[test]
fn scaled_view_duplicate_and_reorder() {
    let mut s = Session { core: EngineCore::new(), doc: DesignDocument::from_json(&poster_json()).unwrap() };
    s.core.view = View::new(0.5);
    let title = LayerId::new("title");

    // Screen (100, 50) is canvas (200, 100): inside the title, clear of the logo.
    s.click_drag(Point::new(100.0, 50.0), Point::new(100.0, 50.0));
    assert_eq!(s.doc.selection(), Some(&title));

    s.key("d", Modifiers { ctrl: true, ..Default::default() });
    let copy = s.doc.selection().unwrap().clone();
    assert_eq!(s.doc.index_of(&copy), Some(2));
    assert_eq!(s.doc.get(&copy).unwrap().name, "Title copy");

    let doc = ops::reorder_layer(&s.doc, &copy, Direction::Up);
    assert_eq!(doc.layer_order().last(), Some(&copy));
    assert_eq!(hit::hit_test(&doc, Point::new(200.0, 100.0)), Some(copy));
}

#[test]
fn async_content_merges_into_live_document() {
    let doc = DesignDocument::from_json(&poster_json()).unwrap();
    let title = LayerId::new("title");
    let partial = PartialLayer { text: Some("Winter\nSale".into()), ..Default::default() };
    let doc = ops::update_layer(&doc, &title, &partial);

    let mut rec = CommandRecorder::new();
    render_design(&mut rec, &doc, 400.0, 300.0).unwrap();
    assert!(
        rec.commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillText { text, .. } if text == "Winter"))
    );
}

#[test]
fn frame_is_design_then_overlay() {
    let doc = DesignDocument::from_json(&poster_json()).unwrap();
    let doc = ops::select_layer(&doc, &LayerId::new("logo"));

    let mut rec = CommandRecorder::new().with_image("logo.png");
    render_design(&mut rec, &doc, 400.0, 300.0).unwrap();
    let design_len = rec.commands().len();
    render::draw_selection_overlay(&mut rec, &doc, 1.0);

    let cmds = rec.into_commands();
    assert!(cmds[..design_len].iter().any(|c| matches!(c, DrawCommand::DrawImage { .. })));
    assert!(cmds[design_len..].contains(&DrawCommand::StrokeRect { rect: Rect::new(10.0, 10.0, 100.0, 50.0) }));
}
