use super::*;
use crate::doc::{LayerKind, ShapeKind};
use crate::ops;

fn layer(id: &str, x: f64, y: f64, w: f64, h: f64) -> Layer {
    Layer::new(LayerKind::shape(ShapeKind::Rectangle, "#000"), Rect::new(x, y, w, h)).with_id(id)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn overlapping() -> DesignDocument {
    DesignDocument::from_layers([layer("A", 0.0, 0.0, 100.0, 100.0), layer("B", 50.0, 50.0, 100.0, 100.0)]).unwrap()
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_inside_single_layer() {
    let doc = DesignDocument::from_layers([layer("L1", 10.0, 10.0, 100.0, 50.0)]).unwrap();
    assert_eq!(hit_test(&doc, pt(50.0, 30.0)), Some(LayerId::new("L1")));
}

#[test]
fn miss_outside_all_layers() {
    let doc = overlapping();
    assert_eq!(hit_test(&doc, pt(500.0, 500.0)), None);
}

#[test]
fn miss_on_empty_document() {
    assert_eq!(hit_test(&DesignDocument::new(), pt(0.0, 0.0)), None);
}

#[test]
fn overlap_hits_topmost() {
    let doc = overlapping();
    assert_eq!(hit_test(&doc, pt(75.0, 75.0)), Some(LayerId::new("B")));
}

#[test]
fn overlap_follows_reorder() {
    let doc = ops::reorder_layer(&overlapping(), &LayerId::new("A"), ops::Direction::Up);
    assert_eq!(hit_test(&doc, pt(75.0, 75.0)), Some(LayerId::new("A")));
}

#[test]
fn non_overlapping_part_hits_lower_layer() {
    let doc = overlapping();
    assert_eq!(hit_test(&doc, pt(10.0, 10.0)), Some(LayerId::new("A")));
}

#[test]
fn boundary_is_inclusive() {
    let doc = DesignDocument::from_layers([layer("L1", 10.0, 10.0, 100.0, 50.0)]).unwrap();
    assert!(hit_test(&doc, pt(10.0, 10.0)).is_some());
    assert!(hit_test(&doc, pt(110.0, 60.0)).is_some());
    assert!(hit_test(&doc, pt(110.1, 60.0)).is_none());
}

#[test]
fn hidden_layers_are_skipped() {
    let doc = ops::toggle_visibility(&overlapping(), &LayerId::new("B"));
    assert_eq!(hit_test(&doc, pt(75.0, 75.0)), Some(LayerId::new("A")));
    assert_eq!(hit_test(&doc, pt(140.0, 140.0)), None);
}

#[test]
fn locked_layers_are_still_hit() {
    let doc = ops::toggle_lock(&overlapping(), &LayerId::new("B"));
    assert_eq!(hit_test(&doc, pt(75.0, 75.0)), Some(LayerId::new("B")));
}

#[test]
fn negative_positions_are_hit() {
    let doc = DesignDocument::from_layers([layer("L1", -40.0, -40.0, 50.0, 50.0)]).unwrap();
    assert!(hit_test(&doc, pt(-20.0, 5.0)).is_some());
}

// =============================================================
// resize_handle_at
// =============================================================

#[test]
fn each_handle_is_detected_at_its_position() {
    let l = layer("L", 0.0, 0.0, 100.0, 80.0);
    for (handle, p) in handle_points(&l.bounds()) {
        assert_eq!(resize_handle_at(&l, p, 8.0), Some(handle), "{handle:?}");
    }
}

#[test]
fn handle_positions_match_box() {
    let r = Rect::new(0.0, 0.0, 100.0, 80.0);
    assert_eq!(ResizeHandle::N.position(&r), pt(50.0, 0.0));
    assert_eq!(ResizeHandle::Se.position(&r), pt(100.0, 80.0));
    assert_eq!(ResizeHandle::W.position(&r), pt(0.0, 40.0));
    assert_eq!(ResizeHandle::Sw.position(&r), pt(0.0, 80.0));
}

#[test]
fn handle_within_tolerance() {
    let l = layer("L", 0.0, 0.0, 100.0, 80.0);
    assert_eq!(resize_handle_at(&l, pt(106.0, 86.0), 8.0), Some(ResizeHandle::Se));
    assert_eq!(resize_handle_at(&l, pt(108.0, 72.0), 8.0), Some(ResizeHandle::Se));
}

#[test]
fn handle_outside_tolerance() {
    let l = layer("L", 0.0, 0.0, 100.0, 80.0);
    assert_eq!(resize_handle_at(&l, pt(109.0, 80.0), 8.0), None);
    assert_eq!(resize_handle_at(&l, pt(50.0, 40.0), 8.0), None);
}

#[test]
fn corners_win_over_edges_on_tiny_layers() {
    let l = layer("L", 0.0, 0.0, 10.0, 10.0);
    assert_eq!(resize_handle_at(&l, pt(0.0, 0.0), 8.0), Some(ResizeHandle::Nw));
}

#[test]
fn handle_cursors() {
    assert_eq!(ResizeHandle::N.cursor(), "ns-resize");
    assert_eq!(ResizeHandle::W.cursor(), "ew-resize");
    assert_eq!(ResizeHandle::Ne.cursor(), "nesw-resize");
    assert_eq!(ResizeHandle::Se.cursor(), "nwse-resize");
}

#[test]
fn handle_edge_flags() {
    assert!(ResizeHandle::Nw.moves_left() && ResizeHandle::Nw.moves_top());
    assert!(ResizeHandle::Se.moves_right() && ResizeHandle::Se.moves_bottom());
    assert!(!ResizeHandle::N.moves_left() && !ResizeHandle::N.moves_right());
    assert!(!ResizeHandle::E.moves_top() && !ResizeHandle::E.moves_bottom());
}
