use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::{EngineConfig, ResizeMode};
use crate::doc::DesignDocument;
use crate::error::RenderError;
use crate::geom::{Point, Rect};
use crate::hit::{ResizeHandle, hit_test, resize_handle_at};
use crate::input::{Button, InputState, Key, Modifiers};
use crate::ops;
use crate::render::{DesignRenderer, draw_selection_overlay};
use crate::surface::CanvasSurface;
use crate::view::{CanvasSize, View};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The host should replace its document with this one and re-render.
    DocumentChanged(DesignDocument),
    /// CSS cursor for the canvas element.
    SetCursor(String),
    /// The host should call `preventDefault()` on the triggering DOM event.
    PreventDefault,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// The document itself lives with the host and is passed into every handler.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub config: EngineConfig,
    pub view: View,
    pub input: InputState,
    cursor: String,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle engine with the given (sanitized) tuning.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config: config.sanitized(), ..Self::default() }
    }

    /// The cursor most recently requested through [`Action::SetCursor`].
    #[must_use]
    pub fn cursor(&self) -> &str {
        if self.cursor.is_empty() { CURSOR_DEFAULT } else { &self.cursor }
    }

    // --- Input events ---

    /// Start a gesture: grab a resize handle of the selection, or select and
    /// start dragging the topmost layer under the pointer, or deselect.
    pub fn on_pointer_down(&mut self, doc: &DesignDocument, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let pt = self.view.screen_to_canvas(screen_pt);

        if let Some(layer) = doc.selected_layer().filter(|l| l.visible && !l.locked) {
            if let Some(handle) = resize_handle_at(layer, pt, self.handle_tolerance()) {
                tracing::debug!(id = %layer.id, ?handle, "resize started");
                self.input = InputState::Resizing { id: layer.id.clone(), handle, start: pt, original: layer.bounds() };
                return self.set_cursor(handle.cursor());
            }
        }

        let Some(id) = hit_test(doc, pt) else {
            self.input = InputState::Idle;
            let mut actions = changed(doc, ops::clear_selection(doc));
            actions.extend(self.set_cursor(CURSOR_DEFAULT));
            return actions;
        };

        let next = ops::select_layer(doc, &id);
        let mut actions = changed(doc, next);
        match doc.get(&id) {
            Some(layer) if !layer.locked => {
                tracing::debug!(%id, "drag started");
                self.input = InputState::Dragging { id, grab_offset: pt - layer.bounds().origin() };
                actions.extend(self.set_cursor(CURSOR_MOVE));
            }
            _ => {
                tracing::debug!(%id, "locked layer selected without a gesture");
                self.input = InputState::Idle;
            }
        }
        actions
    }

    /// Advance the active gesture, or update hover feedback when idle.
    pub fn on_pointer_move(&mut self, doc: &DesignDocument, screen_pt: Point) -> Vec<Action> {
        let pt = self.view.screen_to_canvas(screen_pt);
        if !self.input.is_active() {
            return self.hover(doc, pt);
        }
        if self.input.target().and_then(|id| doc.get(id)).is_some_and(|layer| layer.locked) {
            tracing::debug!("target locked mid-gesture; ignoring move");
            return Vec::new();
        }

        match &self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, grab_offset } => {
                let origin = pt - *grab_offset;
                changed(doc, ops::move_layer(doc, id, origin.x, origin.y))
            }
            InputState::Resizing { id, handle, start, original } => {
                let bounds = resize_bounds(&self.config, *handle, *original, pt - *start);
                changed(doc, ops::resize_layer(doc, id, bounds))
            }
        }
    }

    /// Commit the active gesture. The document already holds its final state.
    pub fn on_pointer_up(&mut self, doc: &DesignDocument, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let finished = std::mem::take(&mut self.input);
        if let Some(id) = finished.target() {
            tracing::debug!(%id, "gesture committed");
        }
        let pt = self.view.screen_to_canvas(screen_pt);
        self.hover(doc, pt)
    }

    /// Keyboard shortcuts: Delete/Backspace removes the selection and
    /// Ctrl/Cmd+D duplicates it. Ignored while a text input has focus.
    pub fn on_key_down(
        &mut self,
        doc: &DesignDocument,
        key: &Key,
        modifiers: Modifiers,
        text_input_focused: bool,
    ) -> Vec<Action> {
        if text_input_focused {
            return Vec::new();
        }

        if modifiers.command() && key.is_char('d') {
            let mut actions = vec![Action::PreventDefault];
            if let Some(id) = doc.selection() {
                let offset = self.config.duplicate_offset;
                let duplicated = changed(doc, ops::duplicate_layer_by(doc, id, offset, offset));
                // The copy becomes the selection, so a gesture on the original ends here.
                if !duplicated.is_empty() && self.input.is_active() {
                    tracing::debug!(%id, "duplicate ended active gesture");
                    self.input = InputState::Idle;
                }
                actions.extend(duplicated);
            }
            return actions;
        }

        if key.is_delete() {
            let Some(layer) = doc.selected_layer() else {
                return Vec::new();
            };
            if layer.locked {
                tracing::debug!(id = %layer.id, "refusing to delete locked layer");
                return Vec::new();
            }
            if self.input.target() == Some(&layer.id) {
                self.input = InputState::Idle;
            }
            return changed(doc, ops::delete_layer(doc, &layer.id));
        }

        Vec::new()
    }

    // --- Internals ---

    fn handle_tolerance(&self) -> f64 {
        self.view.screen_dist_to_canvas(self.config.handle_tolerance_px)
    }

    fn hover(&mut self, doc: &DesignDocument, pt: Point) -> Vec<Action> {
        let cursor = self.cursor_at(doc, pt);
        self.set_cursor(cursor)
    }

    fn cursor_at(&self, doc: &DesignDocument, pt: Point) -> &'static str {
        if let Some(layer) = doc.selected_layer().filter(|l| l.visible && !l.locked) {
            if let Some(handle) = resize_handle_at(layer, pt, self.handle_tolerance()) {
                return handle.cursor();
            }
        }
        match hit_test(doc, pt).and_then(|id| doc.get(&id).map(|layer| layer.locked)) {
            Some(false) => CURSOR_MOVE,
            _ => CURSOR_DEFAULT,
        }
    }

    fn set_cursor(&mut self, cursor: &str) -> Vec<Action> {
        if self.cursor() == cursor {
            return Vec::new();
        }
        cursor.clone_into(&mut self.cursor);
        vec![Action::SetCursor(self.cursor.clone())]
    }
}

/// `DocumentChanged` if `next` differs from `doc`, nothing otherwise.
fn changed(doc: &DesignDocument, next: DesignDocument) -> Vec<Action> {
    if next == *doc { Vec::new() } else { vec![Action::DocumentChanged(next)] }
}

/// Bounds produced by dragging `handle` by `delta` from `original`.
///
/// Width and height never drop below `config.min_layer_size`.
#[must_use]
pub fn resize_bounds(config: &EngineConfig, handle: ResizeHandle, original: Rect, delta: Point) -> Rect {
    let min = config.min_layer_size;
    match config.resize_mode {
        ResizeMode::Origin => Rect::new(
            original.x,
            original.y,
            (original.width + delta.x).max(min),
            (original.height + delta.y).max(min),
        ),
        ResizeMode::OppositeEdge => {
            let (mut left, mut top) = (original.x, original.y);
            let (mut right, mut bottom) = (original.right(), original.bottom());
            if handle.moves_left() {
                left = (original.x + delta.x).min(right - min);
            }
            if handle.moves_right() {
                right = (original.right() + delta.x).max(left + min);
            }
            if handle.moves_top() {
                top = (original.y + delta.y).min(bottom - min);
            }
            if handle.moves_bottom() {
                bottom = (original.bottom() + delta.y).max(top + min);
            }
            Rect::new(left, top, right - left, bottom - top)
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    size: CanvasSize,
    images: HashMap<String, HtmlImageElement>,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, drawing at `size`.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, size: CanvasSize) -> Self {
        Self { canvas, core: EngineCore::new(), size, images: HashMap::new() }
    }

    // --- Canvas and view ---

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.size
    }

    /// Change the logical canvas size. The display scale is left as is.
    pub fn set_canvas_size(&mut self, size: CanvasSize) {
        self.size = size;
    }

    /// Fit the view to the element's on-screen width in CSS pixels.
    pub fn set_display_width(&mut self, display_width: f64) {
        self.core.view = View::fit(self.size, display_width);
    }

    /// Make an image element available to layers whose `src` is `src`.
    pub fn register_image(&mut self, src: impl Into<String>, image: HtmlImageElement) {
        self.images.insert(src.into(), image);
    }

    pub fn forget_image(&mut self, src: &str) {
        self.images.remove(src);
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, doc: &DesignDocument, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(doc, screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, doc: &DesignDocument, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(doc, screen_pt)
    }

    pub fn on_pointer_up(&mut self, doc: &DesignDocument, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(doc, screen_pt, button)
    }

    pub fn on_key_down(
        &mut self,
        doc: &DesignDocument,
        key: &Key,
        modifiers: Modifiers,
        text_input_focused: bool,
    ) -> Vec<Action> {
        self.core.on_key_down(doc, key, modifiers, text_input_focused)
    }

    // --- Render ---

    /// Draw `doc` with the tool's design pass, then the selection overlay.
    ///
    /// A canvas without a 2D context skips the frame.
    ///
    /// # Errors
    ///
    /// Returns the design pass's error, if any. The overlay is not drawn then.
    pub fn render(&self, doc: &DesignDocument, renderer: &impl DesignRenderer) -> Result<(), RenderError> {
        let ctx = match self.canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(obj) => {
                    tracing::debug!(?obj, "context is not a 2d context; skipping frame");
                    return Ok(());
                }
            },
            Ok(None) => {
                tracing::debug!("no 2d context; skipping frame");
                return Ok(());
            }
            Err(err) => {
                tracing::debug!(?err, "get_context failed; skipping frame");
                return Ok(());
            }
        };

        let mut surface = CanvasSurface::new(&self.canvas, &ctx, &self.images);
        if let Err(err) = renderer.render(&mut surface, doc, self.size.width, self.size.height) {
            tracing::warn!(%err, "design pass failed");
            return Err(err);
        }
        draw_selection_overlay(&mut surface, doc, self.core.view.scale());
        Ok(())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn cursor(&self) -> &str {
        self.core.cursor()
    }
}
