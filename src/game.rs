use std::mem;

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{GameConfig, INFORMATION_HEIGHT, INSTRUCTION_WIDTH};
use crate::error::GameError;
use crate::input::Key;
use crate::leaderboard::{Leaderboard, LeaderboardStore};
use crate::menu::{Menu, MenuItem, PauseChoice, RestartChoice};
use crate::session::{Session, TickOutcome};
use crate::term::{Input, Screen, Surface};

const INFORMATION_LINES: &[&str] = &[
    "Welcome to termsnake!",
    "Eat food to grow, one point per bite.",
    "Walls, obstacles and your own tail are deadly.",
    "The snake speeds up every 5 points.",
];

const MANUAL_LINES: &[(i32, &str)] = &[
    (1, "Manual"),
    (3, "Up: W"),
    (4, "Down: S"),
    (5, "Left: A"),
    (6, "Right: D"),
    (7, "Pause: P"),
    (8, "Difficulty"),
    (11, "Points"),
];

const DIFFICULTY_ROW: i32 = 9;
const POINTS_ROW: i32 = 12;
const LEADERS_ROW: i32 = 14;
const MENU_ITEMS_ROW: i32 = 4;
const MENU_MIN_WIDTH: i32 = 20;

#[derive(Debug)]
pub enum GameState {
    Running,
    Paused(Menu<PauseChoice>),
    RestartPrompt(Menu<RestartChoice>),
    Dead,
    Quit,
}

/// How a session ended, as written to the log with its score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionExit {
    Died,
    /// No free cell was left for the next food.
    BoardFull,
    /// Restart picked from the pause menu; a fresh session follows directly.
    Restart,
    Quit,
}

pub struct SnakeGame<T> {
    config: GameConfig,
    term: T,
    store: LeaderboardStore,
    leaderboard: Leaderboard,
    session: Session<StdRng>,
    sessions_played: u64,
    state: GameState,
}

impl<T: Screen + Input> SnakeGame<T> {
    pub fn new(config: GameConfig, term: T) -> Result<Self, GameError> {
        let store = LeaderboardStore::new(config.leaderboard.clone());
        let leaderboard = store.load();
        info!("Leaderboard at {:?}: {:?}", store.path(), leaderboard.scores());
        let session = Session::new(&config, session_rng(config.seed, 0))?;

        Ok(SnakeGame {
            config,
            term,
            store,
            leaderboard,
            session,
            sessions_played: 0,
            state: GameState::Running,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<StdRng> {
        &self.session
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn sessions_played(&self) -> u64 {
        self.sessions_played
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &T {
        &self.term
    }

    /// Plays sessions until the player quits. Every session that ends has
    /// its score recorded before the next state is entered.
    pub fn run(&mut self) -> Result<(), GameError> {
        self.render_boards();
        self.render_playfield();

        loop {
            self.state = match mem::replace(&mut self.state, GameState::Quit) {
                GameState::Running => self.tick()?,
                GameState::Paused(menu) => self.pause_menu(menu)?,
                GameState::Dead => {
                    self.record_score(SessionExit::Died);
                    self.restart_prompt(Menu::restart())
                }
                GameState::RestartPrompt(menu) => self.restart_menu(menu)?,
                GameState::Quit => {
                    info!("Quitting after {} sessions", self.sessions_played + 1);
                    return Ok(());
                }
            };
        }
    }

    fn tick(&mut self) -> Result<GameState, GameError> {
        let key = self.term.poll_key();

        match key {
            Some(Key::Interrupt) => {
                self.record_score(SessionExit::Quit);
                return Ok(GameState::Quit);
            }
            Some(Key::Pause) => {
                let menu = Menu::pause();
                self.render_menu("PAUSE", None, &menu);
                return Ok(GameState::Paused(menu));
            }
            _ => {}
        }

        let outcome = match self.session.tick(key) {
            Ok(outcome) => outcome,
            Err(GameError::BoardFull(bounds)) => {
                info!("No room left for food on the {}x{} board", bounds.width, bounds.height);
                self.render_playfield();
                self.record_score(SessionExit::BoardFull);
                return Ok(self.restart_prompt(Menu::restart()));
            }
            Err(e) => return Err(e),
        };
        self.render_playfield();

        if let TickOutcome::Died(cause) = outcome {
            let snake = self.session.snake();
            info!("Snake died ({:?}) at {:?}, length {}", cause, snake.head(), snake.len());
            return Ok(GameState::Dead);
        }

        self.render_score();
        self.term.idle(self.session.delay());
        Ok(GameState::Running)
    }

    fn pause_menu(&mut self, mut menu: Menu<PauseChoice>) -> Result<GameState, GameError> {
        let key = self.term.read_key();
        if key == Key::Interrupt {
            self.record_score(SessionExit::Quit);
            return Ok(GameState::Quit);
        }

        Ok(match menu.handle(key) {
            Some(PauseChoice::Continue) => {
                self.render_playfield();
                GameState::Running
            }
            Some(PauseChoice::Restart) => {
                self.record_score(SessionExit::Restart);
                self.new_session()?
            }
            Some(PauseChoice::Quit) => {
                self.record_score(SessionExit::Quit);
                GameState::Quit
            }
            None => {
                self.render_menu("PAUSE", None, &menu);
                GameState::Paused(menu)
            }
        })
    }

    fn restart_prompt(&mut self, menu: Menu<RestartChoice>) -> GameState {
        let score = self.session.points().to_string();
        self.render_menu("Your Final Score:", Some(&score), &menu);
        GameState::RestartPrompt(menu)
    }

    /// The score is already recorded by the time the prompt is up.
    fn restart_menu(&mut self, mut menu: Menu<RestartChoice>) -> Result<GameState, GameError> {
        let key = self.term.read_key();
        if key == Key::Interrupt {
            return Ok(GameState::Quit);
        }

        Ok(match menu.handle(key) {
            Some(RestartChoice::Restart) => self.new_session()?,
            Some(RestartChoice::Quit) => GameState::Quit,
            None => self.restart_prompt(menu),
        })
    }

    fn record_score(&mut self, exit: SessionExit) {
        let points = self.session.points();
        info!("Session ended ({:?}) with {} points", exit, points);

        if self.leaderboard.update(points) {
            info!("New leaderboard: {:?}", self.leaderboard.scores());
        }

        // Losing the record is acceptable, losing the game is not.
        if let Err(e) = self.store.save(&self.leaderboard) {
            warn!("{}", e);
        }
    }

    fn new_session(&mut self) -> Result<GameState, GameError> {
        self.sessions_played += 1;
        self.leaderboard = self.store.load();
        let rng = session_rng(self.config.seed, self.sessions_played);
        self.session = Session::new(&self.config, rng)?;

        self.render_boards();
        self.render_playfield();
        Ok(GameState::Running)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn render_boards(&mut self) {
        for surface in [Surface::Information, Surface::Board, Surface::Instruction] {
            self.term.clear_surface(surface);
        }

        for (i, line) in INFORMATION_LINES.iter().enumerate() {
            self.term.draw_text(Surface::Information, 1, i as i32 + 1, line);
        }

        for (row, line) in MANUAL_LINES {
            self.term.draw_text(Surface::Instruction, 1, *row, line);
        }

        let bounds = self.config.bounds;
        let header_width = bounds.width + INSTRUCTION_WIDTH as i32;
        self.term.draw_frame(Surface::Information, 0, 0, header_width, INFORMATION_HEIGHT as i32);
        self.term.draw_frame(Surface::Instruction, 0, 0, INSTRUCTION_WIDTH as i32, bounds.height);

        self.render_leaderboard();
        self.render_score();

        for surface in [Surface::Information, Surface::Instruction] {
            self.term.refresh(surface);
        }
    }

    /// Only drawn when the sidebar has room for it.
    fn render_leaderboard(&mut self) {
        let room = self.config.bounds.height - LEADERS_ROW - 2;
        if room < 3 * 2 {
            return;
        }

        self.term.draw_text(Surface::Instruction, 1, LEADERS_ROW, "Leader Board");
        for (i, score) in self.leaderboard.scores().iter().take(room as usize).enumerate() {
            let row = LEADERS_ROW + i as i32 + 1;
            self.term.draw_text(Surface::Instruction, 1, row, &format!("#{}:", i + 1));
            self.term.draw_text(Surface::Instruction, 5, row, &score.to_string());
        }
    }

    fn render_playfield(&mut self) {
        let bounds = self.config.bounds;
        let symbols = self.config.symbols;

        self.term.clear_surface(Surface::Board);
        self.term.draw_frame(Surface::Board, 0, 0, bounds.width, bounds.height);

        for cell in self.session.snake().body() {
            self.term.draw_cell(Surface::Board, cell.x, cell.y, symbols.snake);
        }

        let food = self.session.food();
        self.term.draw_cell(Surface::Board, food.x, food.y, symbols.food);

        for cell in self.session.obstacles().cells() {
            self.term.draw_cell(Surface::Board, cell.x, cell.y, symbols.obstacle);
        }

        self.term.refresh(Surface::Board);
    }

    fn render_score(&mut self) {
        let difficulty = format!("{:<8}", self.session.difficulty());
        let points = format!("{:<8}", self.session.points());
        self.term.draw_text(Surface::Instruction, 1, DIFFICULTY_ROW, &difficulty);
        self.term.draw_text(Surface::Instruction, 1, POINTS_ROW, &points);
        self.term.refresh(Surface::Instruction);
    }

    fn render_menu<I: MenuItem>(&mut self, title: &str, detail: Option<&str>, menu: &Menu<I>) {
        let bounds = self.config.bounds;
        let width = (bounds.width / 2).max(MENU_MIN_WIDTH).min(bounds.width);
        let min_height = MENU_ITEMS_ROW + menu.items().len() as i32 + 1;
        let height = (bounds.height / 2).max(min_height).min(bounds.height);
        let (left, top) = ((bounds.width - width) / 2, (bounds.height - height) / 2);

        for y in top..top + height {
            for x in left..left + width {
                self.term.draw_cell(Surface::Board, x, y, ' ');
            }
        }
        self.term.draw_frame(Surface::Board, left, top, width, height);

        self.term.draw_text(Surface::Board, left + 1, top + 1, title);
        if let Some(detail) = detail {
            self.term.draw_text(Surface::Board, left + 1, top + 2, detail);
        }

        for (i, item) in menu.items().iter().enumerate() {
            let marker = if i == menu.index() {'>'} else {' '};
            let line = format!("{} {}", marker, item.label());
            self.term.draw_text(Surface::Board, left + 1, top + MENU_ITEMS_ROW + i as i32, &line);
        }

        self.term.refresh(Surface::Board);
    }
}

/// A fixed seed makes every session reproducible; each session still gets its own stream.
fn session_rng(seed: Option<u64>, session: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(session)),
        None => StdRng::from_entropy(),
    }
}
