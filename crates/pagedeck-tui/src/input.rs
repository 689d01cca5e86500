use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::keymap::{KeyBinding, Keymap};
use crate::pagination::Pagination;

/// Wheel delta reported for one notch; positive scrolls back
pub const WHEEL_NOTCH: i32 = 120;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPanel,
    PrevPanel,
    FirstPanel,
    LastPanel,
    NextDeck,
    PrevDeck,
    /// Raw wheel delta, sign decides the direction
    Wheel(i32),
    /// Pagination marker clicked
    JumpTo(usize),
    None,
}

impl Action {
    /// Actions gated behind keyboard navigation
    pub fn is_panel_navigation(&self) -> bool {
        matches!(
            self,
            Action::NextPanel | Action::PrevPanel | Action::FirstPanel | Action::LastPanel
        )
    }
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap, keyboard_enabled: bool) -> Action {
    let action = lookup(key, keymap);
    if action.is_panel_navigation() && !keyboard_enabled {
        return Action::None;
    }
    action
}

fn lookup(key: KeyEvent, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);
    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    // Terminals disagree on how Shift is reported for letters and Tab
    let alternate = match key.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            Some(KeyBinding::shift(KeyCode::Char(c)))
        }
        KeyCode::BackTab => Some(KeyBinding::shift(KeyCode::Tab)),
        _ if key.modifiers == KeyModifiers::SHIFT => {
            Some(KeyBinding::simple(key.code))
        }
        _ => None,
    };

    alternate
        .and_then(|binding| keymap.get(&binding).copied())
        .unwrap_or(Action::None)
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent, pagination: Option<&Pagination>) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => Action::Wheel(WHEEL_NOTCH),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => Action::Wheel(-WHEEL_NOTCH),
        MouseEventKind::Down(MouseButton::Left) => pagination
            .and_then(|p| p.hit_test(mouse.column, mouse.row))
            .map(Action::JumpTo)
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use pagedeck_core::config::Orientation;
    use ratatui::layout::Rect;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_requires_keyboard_flag() {
        let keymap = Keymap::default();
        let down = key(KeyCode::Down, KeyModifiers::NONE);

        assert_eq!(handle_key_event(down, &keymap, false), Action::None);
        assert_eq!(handle_key_event(down, &keymap, true), Action::NextPanel);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('k'), KeyModifiers::NONE), &keymap, true),
            Action::PrevPanel
        );
    }

    #[test]
    fn test_quit_and_deck_switch_always_available() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &keymap, false),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL), &keymap, false),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Tab, KeyModifiers::NONE), &keymap, false),
            Action::NextDeck
        );
        assert_eq!(
            handle_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT), &keymap, false),
            Action::PrevDeck
        );
    }

    #[test]
    fn test_uppercase_without_shift_modifier() {
        let keymap = Keymap::default();
        let mut event = key(KeyCode::Char('G'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Press;
        assert_eq!(handle_key_event(event, &keymap, true), Action::LastPanel);
    }

    #[test]
    fn test_wheel_direction() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0), None),
            Action::Wheel(WHEEL_NOTCH)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0), None),
            Action::Wheel(-WHEEL_NOTCH)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollRight, 0, 0), None),
            Action::Wheel(-WHEEL_NOTCH)
        );
    }

    #[test]
    fn test_click_on_marker_jumps() {
        let mut pagination = Pagination::new(3, 0, Orientation::Vertical);
        pagination.arrange(Rect::new(0, 0, 40, 20), "●");
        let target = pagination.areas()[2];

        assert_eq!(
            handle_mouse_event(
                mouse(MouseEventKind::Down(MouseButton::Left), target.x, target.y),
                Some(&pagination)
            ),
            Action::JumpTo(2)
        );
        assert_eq!(
            handle_mouse_event(
                mouse(MouseEventKind::Down(MouseButton::Left), 0, 0),
                Some(&pagination)
            ),
            Action::None
        );
    }
}
