use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::food::FoodSpawner;
use crate::grid::{Bounds, Cell, Direction};
use crate::input::Key;
use crate::obstacles::ObstacleField;
use crate::snake::{DeathCause, MoveResult, Snake};

const POINTS_PER_LEVEL: i32 = 5;
const SPEEDUP_PER_LEVEL: f64 = 0.75;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    Died(DeathCause),
}

/// One play-through: owns the snake, the obstacles and the food until the
/// snake dies or the player leaves. A restart builds a new session.
pub struct Session<R> {
    snake: Snake,
    obstacles: ObstacleField,
    food: Cell,
    spawner: FoodSpawner<R>,
    points: i32,
    difficulty: i32,
    base_delay_ms: u64,
    delay: Duration,
}

impl<R: Rng> Session<R> {
    pub fn new(config: &GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let bounds = config.bounds;
        let length = config.initial_snake_length;
        let snake = Snake::new(bounds, start_cell(bounds, length), length, Direction::Right);

        // Keep the starting body and the first cell ahead of it free.
        let mut keep_clear: Vec<Cell> = snake.body().copied().collect();
        keep_clear.push(snake.head().step(snake.direction()));

        let mut spawner = FoodSpawner::new(bounds, rng);
        let obstacles = ObstacleField::generate(
            config.obstacle_layout,
            bounds,
            config.obstacle_count,
            &keep_clear,
            spawner.rng(),
        )?;

        info!(
            "New session on {}x{} board, {} obstacles ({:?})",
            bounds.width, bounds.height, obstacles.len(), config.obstacle_layout
        );

        Self::from_parts(snake, obstacles, spawner, config.base_delay_ms)
    }

    /// Assembles a session around an existing snake and places the first food.
    pub fn from_parts(
        snake: Snake,
        obstacles: ObstacleField,
        spawner: FoodSpawner<R>,
        base_delay_ms: u64,
    ) -> Result<Self, GameError> {
        let mut session = Session {
            snake,
            obstacles,
            food: Cell::new(0, 0),
            spawner,
            points: 0,
            difficulty: 0,
            base_delay_ms,
            delay: Duration::from_millis(base_delay_ms),
        };
        session.place_food()?;
        Ok(session)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The delay only moves when the score sits exactly on a level boundary.
    pub fn adjust_delay(&mut self) {
        let difficulty = self.points / POINTS_PER_LEVEL;
        if difficulty != self.difficulty {
            debug!("Difficulty {} -> {}", self.difficulty, difficulty);
        }
        self.difficulty = difficulty;

        if self.points % POINTS_PER_LEVEL == 0 {
            let millis = self.base_delay_ms as f64 * SPEEDUP_PER_LEVEL.powi(self.difficulty);
            self.delay = Duration::from_millis(millis as u64);
        }
    }

    /// Advances one step. Pausing is the caller's business; any key that is
    /// not a direction is ignored here.
    pub fn tick(&mut self, key: Option<Key>) -> Result<TickOutcome, GameError> {
        self.adjust_delay();

        if let Some(direction) = key.and_then(Key::direction) {
            self.snake.change_direction(direction);
        }

        for cell in self.obstacles.cells() {
            self.snake.sense_obstacle(*cell);
        }

        if self.snake.move_forward() == MoveResult::Grew {
            self.points += 1;
            debug!("Ate food at {:?}, {} points", self.food, self.points);
            self.place_food()?;
        }

        Ok(match self.snake.death_cause() {
            Some(cause) => TickOutcome::Died(cause),
            None => TickOutcome::Alive,
        })
    }

    /// Moves the current food to a known cell.
    #[cfg(test)]
    pub fn place_food_at(&mut self, food: Cell) {
        self.food = food;
        self.snake.sense_food(food);
    }

    fn place_food(&mut self) -> Result<(), GameError> {
        let snake = &self.snake;
        let obstacles = &self.obstacles;
        let food = self.spawner.spawn(|c| snake.contains(c) || obstacles.contains(c))?;

        debug_assert!(!snake.contains(food) && !obstacles.contains(food));
        self.food = food;
        self.snake.sense_food(food);
        Ok(())
    }
}

fn start_cell(bounds: Bounds, length: usize) -> Cell {
    Cell::new(bounds.width / 4 + length as i32, (bounds.height / 4).max(1))
}
