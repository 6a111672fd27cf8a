use crate::input::Key;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PauseChoice {
    Continue,
    Restart,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RestartChoice {
    Restart,
    Quit,
}

pub trait MenuItem: Copy {
    fn label(&self) -> &'static str;
}

impl MenuItem for PauseChoice {
    fn label(&self) -> &'static str {
        match self {
            PauseChoice::Continue => "Continue",
            PauseChoice::Restart => "Restart",
            PauseChoice::Quit => "Quit",
        }
    }
}

impl MenuItem for RestartChoice {
    fn label(&self) -> &'static str {
        match self {
            RestartChoice::Restart => "Restart",
            RestartChoice::Quit => "Quit",
        }
    }
}

/// A vertical list with a wrapping cursor, starting on the first item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu<T> {
    items: Vec<T>,
    index: usize,
}

impl<T: MenuItem> Menu<T> {
    pub fn new(items: Vec<T>) -> Self {
        debug_assert!(!items.is_empty());
        Menu { items, index: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> T {
        self.items[self.index]
    }

    /// Moves the cursor on Up/Down; returns the chosen item on Select.
    pub fn handle(&mut self, key: Key) -> Option<T> {
        use crate::grid::Direction::*;

        let len = self.items.len();
        match key {
            Key::Move(Up) => self.index = (self.index + len - 1) % len,
            Key::Move(Down) => self.index = (self.index + 1) % len,
            Key::Select => return Some(self.selected()),
            _ => {}
        }
        None
    }
}

impl Menu<PauseChoice> {
    pub fn pause() -> Self {
        Menu::new(vec![PauseChoice::Continue, PauseChoice::Restart, PauseChoice::Quit])
    }
}

impl Menu<RestartChoice> {
    pub fn restart() -> Self {
        Menu::new(vec![RestartChoice::Restart, RestartChoice::Quit])
    }
}
