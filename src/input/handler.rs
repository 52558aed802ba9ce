use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// What a key press asks the arcade mode to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Action),
    Restart,
    Quit,
    /// Any other key; still counts as "press any key" on the level-complete screen
    Other,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let steer = |direction| KeyAction::Steer(Action::Turn(direction));

        match key.code {
            KeyCode::Up => steer(Direction::Up),
            KeyCode::Down => steer(Direction::Down),
            KeyCode::Left => steer(Direction::Left),
            KeyCode::Right => steer(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => steer(Direction::Up),
                's' => steer(Direction::Down),
                'a' => steer(Direction::Left),
                'd' => steer(Direction::Right),
                'q' => KeyAction::Quit,
                'r' | ' ' => KeyAction::Restart,
                _ => KeyAction::Other,
            },

            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::Other,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Steer(Action::Turn(Direction::Up)));
        assert_eq!(press(KeyCode::Down), KeyAction::Steer(Action::Turn(Direction::Down)));
        assert_eq!(press(KeyCode::Left), KeyAction::Steer(Action::Turn(Direction::Left)));
        assert_eq!(press(KeyCode::Right), KeyAction::Steer(Action::Turn(Direction::Right)));
    }

    #[test]
    fn test_wasd_keys_any_case() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Steer(Action::Turn(Direction::Up)));
        assert_eq!(press(KeyCode::Char('A')), KeyAction::Steer(Action::Turn(Direction::Left)));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Steer(Action::Turn(Direction::Down)));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Steer(Action::Turn(Direction::Right)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::Other);
        assert_eq!(press(KeyCode::Enter), KeyAction::Other);
        assert_eq!(press(KeyCode::Char('c')), KeyAction::Other);
    }
}
