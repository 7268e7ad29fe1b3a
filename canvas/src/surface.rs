//! Drawing surfaces.
//!
//! [`Surface`] is the slice of the Canvas 2D API the renderer needs. This
//! module is the only place that touches [`web_sys::CanvasRenderingContext2d`]
//! (through [`CanvasSurface`]); everything else draws against the trait, so
//! the same render pass can run headless into a [`CommandRecorder`].

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::RenderError;
use crate::geom::{Point, Rect};

/// A 2D drawing target.
///
/// Fallible methods mirror the Canvas 2D calls that can throw.
pub trait Surface {
    /// Resize the backing store to `width` × `height` canvas pixels.
    fn set_size(&mut self, width: f64, height: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError>;
    fn rotate(&mut self, radians: f64) -> Result<(), RenderError>;
    fn set_alpha(&mut self, alpha: f64);
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    /// Add a full axis-aligned ellipse to the current path.
    fn ellipse(&mut self, center: Point, rx: f64, ry: f64) -> Result<(), RenderError>;
    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), RenderError>;
    /// Draw the image known as `src` scaled into `dest`.
    ///
    /// Returns `Ok(false)` when the image is not available (unknown or still loading).
    fn draw_image(&mut self, src: &str, dest: Rect) -> Result<bool, RenderError>;
}

// =============================================================
// Browser canvas
// =============================================================

/// [`Surface`] over a browser canvas element and its 2D context.
pub struct CanvasSurface<'a> {
    canvas: &'a HtmlCanvasElement,
    ctx: &'a CanvasRenderingContext2d,
    images: &'a HashMap<String, HtmlImageElement>,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(
        canvas: &'a HtmlCanvasElement,
        ctx: &'a CanvasRenderingContext2d,
        images: &'a HashMap<String, HtmlImageElement>,
    ) -> Self {
        Self { canvas, ctx, images }
    }
}

fn js_err(err: JsValue) -> RenderError {
    RenderError::Canvas(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(v: f64) -> u32 {
    v.max(0.0).round() as u32
}

impl Surface for CanvasSurface<'_> {
    fn set_size(&mut self, width: f64, height: f64) {
        // Assigning either dimension resets the context, so only do it on change.
        let (w, h) = (to_pixels(width), to_pixels(height));
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        self.ctx.translate(x, y).map_err(js_err)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), RenderError> {
        self.ctx.rotate(radians).map_err(js_err)
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_fill(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64) -> Result<(), RenderError> {
        self.ctx
            .ellipse(center.x, center.y, rx, ry, 0.0, 0.0, std::f64::consts::TAU)
            .map_err(js_err)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), RenderError> {
        self.ctx.fill_text(text, at.x, at.y).map_err(js_err)
    }

    fn draw_image(&mut self, src: &str, dest: Rect) -> Result<bool, RenderError> {
        let Some(img) = self.images.get(src) else {
            return Ok(false);
        };
        if !img.complete() || img.natural_width() == 0 {
            return Ok(false);
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, dest.x, dest.y, dest.width, dest.height)
            .map_err(js_err)?;
        Ok(true)
    }
}

// =============================================================
// Headless recorder
// =============================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetSize { width: f64, height: f64 },
    Clear { width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    SetAlpha { alpha: f64 },
    SetFill { color: String },
    SetStroke { color: String },
    SetLineWidth { width: f64 },
    FillRect { rect: Rect },
    StrokeRect { rect: Rect },
    BeginPath,
    MoveTo { point: Point },
    LineTo { point: Point },
    ClosePath,
    Ellipse { center: Point, rx: f64, ry: f64 },
    Fill,
    Stroke,
    SetFont { font: String },
    SetTextAlign { align: String },
    SetTextBaseline { baseline: String },
    FillText { text: String, at: Point },
    DrawImage { src: String, dest: Rect },
}

/// [`Surface`] that records every call instead of drawing.
///
/// Images count as available only after [`CommandRecorder::with_image`].
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    images: BTreeSet<String>,
}

impl CommandRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `src` as a loaded image.
    #[must_use]
    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.images.insert(src.into());
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl Surface for CommandRecorder {
    fn set_size(&mut self, width: f64, height: f64) {
        self.push(DrawCommand::SetSize { width, height });
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Translate { x, y });
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Rotate { radians });
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::SetAlpha { alpha });
    }

    fn set_fill(&mut self, color: &str) {
        self.push(DrawCommand::SetFill { color: color.to_owned() });
    }

    fn set_stroke(&mut self, color: &str) {
        self.push(DrawCommand::SetStroke { color: color.to_owned() });
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth { width });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::FillRect { rect });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::StrokeRect { rect });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.push(DrawCommand::MoveTo { point });
    }

    fn line_to(&mut self, point: Point) {
        self.push(DrawCommand::LineTo { point });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn ellipse(&mut self, center: Point, rx: f64, ry: f64) -> Result<(), RenderError> {
        self.push(DrawCommand::Ellipse { center, rx, ry });
        Ok(())
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::SetFont { font: font.to_owned() });
    }

    fn set_text_align(&mut self, align: &str) {
        self.push(DrawCommand::SetTextAlign { align: align.to_owned() });
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.push(DrawCommand::SetTextBaseline { baseline: baseline.to_owned() });
    }

    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), RenderError> {
        self.push(DrawCommand::FillText { text: text.to_owned(), at });
        Ok(())
    }

    fn draw_image(&mut self, src: &str, dest: Rect) -> Result<bool, RenderError> {
        if !self.images.contains(src) {
            return Ok(false);
        }
        self.push(DrawCommand::DrawImage { src: src.to_owned(), dest });
        Ok(true)
    }
}
