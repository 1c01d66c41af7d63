use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Direction, Level};
use crate::session::{MenuItem, SessionInput};

/// Translates terminal key and mouse events into session inputs
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Option<SessionInput> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(SessionInput::Quit);
        }

        let input = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => SessionInput::Steer(Direction::Up),
            KeyCode::Down => SessionInput::Steer(Direction::Down),
            KeyCode::Left => SessionInput::Steer(Direction::Left),
            KeyCode::Right => SessionInput::Steer(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                // Movement - WASD
                'w' => SessionInput::Steer(Direction::Up),
                's' => SessionInput::Steer(Direction::Down),
                'a' => SessionInput::Steer(Direction::Left),
                'd' => SessionInput::Steer(Direction::Right),

                // Controls
                'p' | ' ' => SessionInput::TogglePause,
                'q' => SessionInput::Quit,

                // Menu shortcuts
                'l' => SessionInput::Choose(MenuItem::LevelSelect),
                '1' => SessionInput::Choose(MenuItem::Level(Level::One)),
                '2' => SessionInput::Choose(MenuItem::Level(Level::Two)),
                'm' => SessionInput::Choose(MenuItem::MainMenu),
                'r' => SessionInput::Choose(MenuItem::Restart),
                _ => return None,
            },
            KeyCode::Enter => SessionInput::Choose(MenuItem::LevelSelect),
            KeyCode::Esc => SessionInput::Quit,

            _ => return None,
        };

        Some(input)
    }

    /// Terminal cell of a left-button press, if this event is one
    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<(u16, u16)> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some((mouse.column, mouse.row)),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
