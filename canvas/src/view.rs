#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, is_positive};

/// Logical size of the drawing surface in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Display scale between the on-screen element and the logical canvas.
///
/// The canvas is drawn at its logical size and shown scaled by `scale`
/// (CSS pixels per canvas pixel). Pointer coordinates arrive in CSS pixels
/// relative to the element and are divided by `scale` to reach canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    scale: f64,
}

impl Default for View {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl View {
    /// A view with the given scale, or the identity when `scale` is not
    /// finite and positive.
    #[must_use]
    pub fn new(scale: f64) -> Self {
        let mut view = Self::default();
        view.set_scale(scale);
        view
    }

    /// The scale that fits `canvas` into an element `display_width` CSS pixels wide.
    #[must_use]
    pub fn fit(canvas: CanvasSize, display_width: f64) -> Self {
        if !is_positive(canvas.width) {
            return Self::default();
        }
        Self::new(display_width / canvas.width)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Update the scale. Non-finite or non-positive values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if is_positive(scale) {
            self.scale = scale;
        } else {
            tracing::debug!(scale, "ignoring invalid display scale");
        }
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.scale, screen.y / self.scale)
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.scale, canvas.y * self.scale)
    }

    /// Convert a screen-space distance (pixels) to a canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
