use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::grid::Direction;

/// What a physical key means to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Pause,
    Select,
    Interrupt,
    Other,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Move(d) => Some(d),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(ev: KeyEvent) -> Self {
        if is_ctrl_c(&ev) {
            return Key::Interrupt;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Key::Move(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Key::Move(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Key::Move(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Key::Move(Direction::Right),
            KeyCode::Char('p') | KeyCode::Char('P') => Key::Pause,
            KeyCode::Char(' ') | KeyCode::Enter => Key::Select,
            _ => Key::Other,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
