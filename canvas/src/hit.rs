#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{DesignDocument, Layer, LayerId};
use crate::geom::{Point, Rect};

/// One of the eight resize handles on a layer's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, corners first. Corners win when handles overlap on small layers.
    pub const ALL: [ResizeHandle; 8] = [Self::Nw, Self::Ne, Self::Se, Self::Sw, Self::N, Self::E, Self::S, Self::W];

    /// Position of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let cx = rect.x + rect.width * 0.5;
        let cy = rect.y + rect.height * 0.5;
        match self {
            Self::N => Point::new(cx, rect.y),
            Self::Ne => Point::new(rect.right(), rect.y),
            Self::E => Point::new(rect.right(), cy),
            Self::Se => Point::new(rect.right(), rect.bottom()),
            Self::S => Point::new(cx, rect.bottom()),
            Self::Sw => Point::new(rect.x, rect.bottom()),
            Self::W => Point::new(rect.x, cy),
            Self::Nw => Point::new(rect.x, rect.y),
        }
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }
}

/// The eight handle positions of `rect`, corners first.
#[must_use]
pub fn handle_points(rect: &Rect) -> [(ResizeHandle, Point); 8] {
    ResizeHandle::ALL.map(|h| (h, h.position(rect)))
}

/// The topmost visible layer containing `pt`, if any.
///
/// Locked layers are still hit: locking blocks mutation, not selection.
#[must_use]
pub fn hit_test(doc: &DesignDocument, pt: Point) -> Option<LayerId> {
    doc.layers_top_down()
        .find(|layer| layer.visible && layer.bounds().contains(pt))
        .map(|layer| layer.id.clone())
}

/// The resize handle of `layer` within `tolerance` of `pt`, if any.
///
/// `tolerance` is in canvas units; the box around each handle is inclusive.
#[must_use]
pub fn resize_handle_at(layer: &Layer, pt: Point, tolerance: f64) -> Option<ResizeHandle> {
    let bounds = layer.bounds();
    handle_points(&bounds)
        .into_iter()
        .find(|(_, hp)| (pt.x - hp.x).abs() <= tolerance && (pt.y - hp.y).abs() <= tolerance)
        .map(|(handle, _)| handle)
}
