use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn default_modifiers_are_released() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.command());
}

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Default::default() }.command());
}

// =============================================================
// Key
// =============================================================

#[test]
fn delete_keys() {
    assert!(Key::new("Delete").is_delete());
    assert!(Key::new("Backspace").is_delete());
    assert!(!Key::new("d").is_delete());
    assert!(!Key::new("Escape").is_delete());
}

#[test]
fn char_match_ignores_case() {
    assert!(Key::new("d").is_char('d'));
    assert!(Key::new("D").is_char('d'));
    assert!(!Key::new("Delete").is_char('d'));
    assert!(!Key::new("").is_char('d'));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn default_state_is_idle() {
    let state = InputState::default();
    assert_eq!(state, InputState::Idle);
    assert!(!state.is_active());
    assert!(state.target().is_none());
}

#[test]
fn dragging_reports_target() {
    let state = InputState::Dragging { id: LayerId::new("L1"), grab_offset: Point::new(40.0, 20.0) };
    assert!(state.is_active());
    assert_eq!(state.target(), Some(&LayerId::new("L1")));
}

#[test]
fn resizing_reports_target() {
    let state = InputState::Resizing {
        id: LayerId::new("L2"),
        handle: ResizeHandle::Se,
        start: Point::new(0.0, 0.0),
        original: Rect::new(0.0, 0.0, 10.0, 10.0),
    };
    assert!(state.is_active());
    assert_eq!(state.target(), Some(&LayerId::new("L2")));
}
