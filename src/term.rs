use std::{collections::VecDeque, io::{Stdout, Write, stdout}, thread::sleep, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read, poll};
use log::warn;

use crate::config::{INFORMATION_HEIGHT, INSTRUCTION_WIDTH};
use crate::input::Key;
use crate::TermInt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Information,
    Board,
    Instruction,
}

/// Drawing side of the terminal. Coordinates are relative to the surface;
/// anything outside it is dropped. Calls never fail.
pub trait Screen {
    fn clear_surface(&mut self, surface: Surface);
    fn draw_cell(&mut self, surface: Surface, x: i32, y: i32, symbol: char);
    fn refresh(&mut self, surface: Surface);

    fn draw_text(&mut self, surface: Surface, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_cell(surface, x + i as i32, y, ch);
        }
    }

    /// Box outline with its top left corner at (x, y).
    fn draw_frame(&mut self, surface: Surface, x: i32, y: i32, width: i32, height: i32) {
        let (end_x, end_y) = (x + width - 1, y + height - 1);

        for cx in x..=end_x {
            let ch = if cx == x || cx == end_x {'+'} else {'-'};
            self.draw_cell(surface, cx, y, ch);
            self.draw_cell(surface, cx, end_y, ch);
        }

        for cy in y + 1..end_y {
            self.draw_cell(surface, x, cy, '|');
            self.draw_cell(surface, end_x, cy, '|');
        }
    }
}

/// Reading side of the terminal, plus the pause between ticks.
pub trait Input {
    fn poll_key(&mut self) -> Option<Key>;
    fn read_key(&mut self) -> Key;
    fn idle(&mut self, delay: Duration);
}

#[derive(Copy, Clone, Debug)]
struct Area {
    left: TermInt,
    top: TermInt,
    width: TermInt,
    height: TermInt,
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    pending_keys: VecDeque<Key>,
    active: bool,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            pending_keys: VecDeque::new(),
            active: false,
        })
    }

    pub fn get_terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    fn area(&self, surface: Surface) -> Area {
        let side = INSTRUCTION_WIDTH.min(self.width);
        let below_header = self.height.saturating_sub(INFORMATION_HEIGHT);

        match surface {
            Surface::Information => Area {
                left: 0,
                top: 0,
                width: self.width,
                height: INFORMATION_HEIGHT.min(self.height),
            },
            Surface::Board => Area {
                left: 0,
                top: INFORMATION_HEIGHT,
                width: self.width - side,
                height: below_header,
            },
            Surface::Instruction => Area {
                left: self.width - side,
                top: INFORMATION_HEIGHT,
                width: side,
                height: below_header,
            },
        }
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) {
        if let Err(e) = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)) {
            warn!("Could not draw at {:?}: {}", pos, e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.stdout.flush() {
            warn!("Could not flush terminal: {}", e);
        }
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Could not restore terminal: {}", e);
        }
    }
}

impl Screen for TermManager {
    fn clear_surface(&mut self, surface: Surface) {
        let area = self.area(surface);
        for y in 0..area.height {
            for x in 0..area.width {
                self.print_at((area.left + x, area.top + y), ' ');
            }
        }
    }

    fn draw_cell(&mut self, surface: Surface, x: i32, y: i32, symbol: char) {
        let area = self.area(surface);
        if x < 0 || y < 0 || x >= area.width as i32 || y >= area.height as i32 {
            return;
        }
        self.print_at((area.left + x as TermInt, area.top + y as TermInt), symbol);
    }

    fn refresh(&mut self, _surface: Surface) {
        self.flush();
    }
}

impl Input for TermManager {
    fn poll_key(&mut self) -> Option<Key> {
        loop {
            match poll(Duration::from_millis(0)) {
                Ok(true) => match read() {
                    Ok(Event::Key(ev)) => self.pending_keys.push_back(Key::from(ev)),
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Could not read key: {}", e);
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    warn!("Could not poll keyboard: {}", e);
                    break;
                }
            }
        }

        self.pending_keys.pop_front()
    }

    fn read_key(&mut self) -> Key {
        if let Some(key) = self.pending_keys.pop_front() {
            return key;
        }

        loop {
            match read() {
                Ok(Event::Key(ev)) => return Key::from(ev),
                Ok(_) => {}
                Err(e) => {
                    // Without a keyboard there is no way to continue.
                    warn!("Could not read key: {}", e);
                    return Key::Interrupt;
                }
            }
        }
    }

    fn idle(&mut self, delay: Duration) {
        sleep(delay);
    }
}
