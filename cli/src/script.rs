//! Scripted input replay.
//!
//! A script is a JSON array of events in canvas-element screen coordinates,
//! fed through an [`EngineCore`] exactly as a browser host would feed DOM
//! events. Document changes are applied as they are returned.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use dmsuite_canvas::{Action, Button, DesignDocument, EngineCore, Key, Modifiers, Point};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for Button {
    fn from(button: ScriptButton) -> Self {
        match button {
            ScriptButton::Primary => Button::Primary,
            ScriptButton::Middle => Button::Middle,
            ScriptButton::Secondary => Button::Secondary,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ScriptModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl From<ScriptModifiers> for Modifiers {
    fn from(m: ScriptModifiers) -> Self {
        Modifiers { shift: m.shift, ctrl: m.ctrl, alt: m.alt, meta: m.meta }
    }
}

/// One recorded input event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: ScriptModifiers,
        /// Whether a text input had focus when the key was pressed.
        #[serde(default)]
        text_focus: bool,
    },
}

/// Result of a replay.
#[derive(Debug)]
pub struct Replay {
    pub doc: DesignDocument,
    /// Cursor requested after the last event.
    pub cursor: String,
    /// Number of `DocumentChanged` actions applied.
    pub changes: usize,
    /// Number of `PreventDefault` actions the host would have honoured.
    pub prevented: usize,
}

/// Feed `events` through `core`, starting from `doc`.
pub fn replay(core: &mut EngineCore, doc: DesignDocument, events: &[ScriptEvent]) -> Replay {
    let mut out = Replay { doc, cursor: core.cursor().to_owned(), changes: 0, prevented: 0 };

    for (step, event) in events.iter().enumerate() {
        let actions = match event {
            ScriptEvent::PointerDown { x, y, button } => {
                core.on_pointer_down(&out.doc, Point::new(*x, *y), (*button).into())
            }
            ScriptEvent::PointerMove { x, y } => core.on_pointer_move(&out.doc, Point::new(*x, *y)),
            ScriptEvent::PointerUp { x, y, button } => {
                core.on_pointer_up(&out.doc, Point::new(*x, *y), (*button).into())
            }
            ScriptEvent::KeyDown { key, modifiers, text_focus } => {
                core.on_key_down(&out.doc, &Key::new(key.as_str()), (*modifiers).into(), *text_focus)
            }
        };
        tracing::debug!(step, ?event, actions = actions.len(), "replayed event");

        for action in actions {
            match action {
                Action::DocumentChanged(next) => {
                    out.doc = next;
                    out.changes += 1;
                }
                Action::SetCursor(cursor) => out.cursor = cursor,
                Action::PreventDefault => out.prevented += 1,
            }
        }
    }
    out
}
