//! Rendering: paints a design document onto a [`Surface`].
//!
//! Two passes make up a frame. The design pass belongs to the hosting tool:
//! it receives the document and the declared canvas size and must be a pure
//! function of them. [`render_design`] is the stock design pass, painting
//! each visible layer bottom to top with its kind's routine. The overlay pass
//! ([`draw_selection_overlay`]) is always drawn by the engine on top.
//!
//! Nothing here mutates application state, and identical inputs produce an
//! identical sequence of surface calls.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    HANDLE_FILL, HANDLE_SIZE_PX, IMAGE_PLACEHOLDER_FILL, IMAGE_PLACEHOLDER_STROKE, SELECTION_COLOR,
    SELECTION_LINE_PX, TEXT_LINE_HEIGHT,
};
use crate::doc::{DesignDocument, Layer, LayerKind, ShapeKind, TextAlign};
use crate::error::RenderError;
use crate::geom::{Point, Rect, is_positive};
use crate::hit::handle_points;
use crate::surface::Surface;

/// A tool's design pass.
///
/// Implemented for any `Fn(&mut dyn Surface, &DesignDocument, f64, f64)`, so
/// a plain function such as [`render_design`] can be passed directly.
pub trait DesignRenderer {
    /// Paint `doc` onto a `width` × `height` surface.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a surface call fails.
    fn render(&self, surface: &mut dyn Surface, doc: &DesignDocument, width: f64, height: f64)
    -> Result<(), RenderError>;
}

impl<F> DesignRenderer for F
where
    F: Fn(&mut dyn Surface, &DesignDocument, f64, f64) -> Result<(), RenderError>,
{
    fn render(
        &self,
        surface: &mut dyn Surface,
        doc: &DesignDocument,
        width: f64,
        height: f64,
    ) -> Result<(), RenderError> {
        self(surface, doc, width, height)
    }
}

/// The stock design pass: [`render_design`] as a value, for hosts that store
/// a renderer rather than pass a function.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerPainter;

impl DesignRenderer for LayerPainter {
    fn render(
        &self,
        surface: &mut dyn Surface,
        doc: &DesignDocument,
        width: f64,
        height: f64,
    ) -> Result<(), RenderError> {
        render_design(surface, doc, width, height)
    }
}

/// Size and clear the surface, paint the background, then every visible
/// layer in paint order.
///
/// # Errors
///
/// Returns `Err` if a surface call fails.
pub fn render_design(surface: &mut dyn Surface, doc: &DesignDocument, width: f64, height: f64) -> Result<(), RenderError> {
    surface.set_size(width, height);
    surface.clear(width, height);

    if let Some(background) = doc.background() {
        surface.set_fill(background);
        surface.fill_rect(Rect::new(0.0, 0.0, width, height));
    }

    for layer in doc.layers_bottom_up().filter(|layer| layer.visible) {
        draw_layer(surface, layer)?;
    }
    Ok(())
}

/// Paint one layer with its opacity and rotation. Surface state is restored afterwards.
///
/// # Errors
///
/// Returns `Err` if a surface call fails.
pub fn draw_layer(surface: &mut dyn Surface, layer: &Layer) -> Result<(), RenderError> {
    surface.save();
    let result = paint_layer(surface, layer);
    surface.restore();
    result
}

fn paint_layer(surface: &mut dyn Surface, layer: &Layer) -> Result<(), RenderError> {
    let bounds = layer.bounds();
    let center = bounds.center();

    surface.set_alpha(layer.opacity);
    surface.translate(center.x, center.y)?;
    if layer.rotation.abs() > f64::EPSILON {
        surface.rotate(layer.rotation.to_radians())?;
    }

    // Box in layer-local coordinates, centred on the origin.
    let local = Rect::new(-bounds.width * 0.5, -bounds.height * 0.5, bounds.width, bounds.height);

    match &layer.kind {
        LayerKind::Text { content, font_family, font_size, color, align } => {
            draw_text(surface, local, content, font_family, *font_size, color, *align)
        }
        LayerKind::Image { src } => draw_image(surface, local, src),
        LayerKind::Shape { shape, fill, stroke, stroke_width } => {
            draw_shape(surface, local, *shape, fill, stroke.as_deref(), *stroke_width)
        }
    }
}

// =============================================================
// Kind renderers
// =============================================================

fn draw_text(
    surface: &mut dyn Surface,
    local: Rect,
    content: &str,
    font_family: &str,
    font_size: f64,
    color: &str,
    align: TextAlign,
) -> Result<(), RenderError> {
    if content.is_empty() {
        return Ok(());
    }

    surface.set_fill(color);
    surface.set_font(&format!("{font_size}px {font_family}"));
    surface.set_text_align(align.as_css());
    surface.set_text_baseline("top");

    let x = match align {
        TextAlign::Left => local.x,
        TextAlign::Center => local.center().x,
        TextAlign::Right => local.right(),
    };
    let line_height = font_size * TEXT_LINE_HEIGHT;
    let mut y = local.y;
    for line in content.lines() {
        surface.fill_text(line, Point::new(x, y))?;
        y += line_height;
    }
    Ok(())
}

fn draw_image(surface: &mut dyn Surface, local: Rect, src: &str) -> Result<(), RenderError> {
    if surface.draw_image(src, local)? {
        return Ok(());
    }
    surface.set_fill(IMAGE_PLACEHOLDER_FILL);
    surface.fill_rect(local);
    surface.set_stroke(IMAGE_PLACEHOLDER_STROKE);
    surface.set_line_width(1.0);
    surface.stroke_rect(local);
    Ok(())
}

fn draw_shape(
    surface: &mut dyn Surface,
    local: Rect,
    shape: ShapeKind,
    fill: &str,
    stroke: Option<&str>,
    stroke_width: f64,
) -> Result<(), RenderError> {
    match shape {
        ShapeKind::Rectangle => {
            surface.set_fill(fill);
            surface.fill_rect(local);
            if let Some(color) = stroke {
                surface.set_stroke(color);
                surface.set_line_width(stroke_width);
                surface.stroke_rect(local);
            }
        }
        ShapeKind::Ellipse => {
            surface.begin_path();
            surface.ellipse(local.center(), local.width * 0.5, local.height * 0.5)?;
            fill_and_stroke(surface, fill, stroke, stroke_width);
        }
        ShapeKind::Triangle => {
            surface.begin_path();
            surface.move_to(Point::new(local.center().x, local.y));
            surface.line_to(Point::new(local.right(), local.bottom()));
            surface.line_to(Point::new(local.x, local.bottom()));
            surface.close_path();
            fill_and_stroke(surface, fill, stroke, stroke_width);
        }
        ShapeKind::Line => {
            // A line has no interior; it is stroked with the stroke colour, or the fill if unset.
            surface.begin_path();
            surface.move_to(local.origin());
            surface.line_to(Point::new(local.right(), local.bottom()));
            surface.set_stroke(stroke.unwrap_or(fill));
            surface.set_line_width(stroke_width);
            surface.stroke();
        }
    }
    Ok(())
}

fn fill_and_stroke(surface: &mut dyn Surface, fill: &str, stroke: Option<&str>, stroke_width: f64) {
    surface.set_fill(fill);
    surface.fill();
    if let Some(color) = stroke {
        surface.set_stroke(color);
        surface.set_line_width(stroke_width);
        surface.stroke();
    }
}

// =============================================================
// Selection overlay
// =============================================================

/// Outline the selected layer and draw its eight resize handles.
///
/// `scale` is the display scale, so outline width and handle size stay
/// constant on screen. Draws nothing when the selection is empty or stale.
pub fn draw_selection_overlay(surface: &mut dyn Surface, doc: &DesignDocument, scale: f64) {
    let Some(layer) = doc.selected_layer() else {
        return;
    };
    let px = if is_positive(scale) { 1.0 / scale } else { 1.0 };
    let bounds = layer.bounds();

    surface.save();
    surface.set_alpha(1.0);
    surface.set_stroke(SELECTION_COLOR);
    surface.set_line_width(SELECTION_LINE_PX * px);
    surface.stroke_rect(bounds);

    let size = HANDLE_SIZE_PX * px;
    surface.set_fill(HANDLE_FILL);
    for (_, p) in handle_points(&bounds) {
        let square = Rect::new(p.x - size * 0.5, p.y - size * 0.5, size, size);
        surface.fill_rect(square);
        surface.stroke_rect(square);
    }
    surface.restore();
}
