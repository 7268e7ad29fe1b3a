//! Input model: modifier keys, mouse buttons, keys, and the gesture state.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. Only one gesture exists at a time: pointer-down builds a new
//! one and pointer-up drops it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::LayerId;
use crate::geom::{Point, Rect};
use crate::hit::ResizeHandle;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button, pen contact or single-finger touch.
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key`
/// (e.g. `"Delete"`, `"Backspace"`, `"d"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// Whether this is the single character `c`, ignoring case.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(k), None) if k.eq_ignore_ascii_case(&c))
    }
}

/// Internal state of the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving a layer. The grab offset keeps the point under the pointer fixed.
    Dragging {
        id: LayerId,
        /// Pointer minus layer origin at pointer-down, in canvas space.
        grab_offset: Point,
    },
    /// Resizing a layer by one of its handles.
    Resizing {
        id: LayerId,
        handle: ResizeHandle,
        /// Canvas-space pointer position at pointer-down.
        start: Point,
        /// Layer bounds at pointer-down.
        original: Rect,
    },
}

impl InputState {
    /// Whether a pointer gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The layer the active gesture operates on.
    #[must_use]
    pub fn target(&self) -> Option<&LayerId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }
}
