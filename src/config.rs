use std::path::PathBuf;

use clap::Parser;

use crate::error::GameError;
use crate::grid::Bounds;
use crate::leaderboard::LeaderboardConfig;
use crate::obstacles::{ObstacleField, ObstacleLayout};

pub const MIN_BOARD_SIZE: i32 = 10;
pub const INFORMATION_HEIGHT: u16 = 6;
pub const INSTRUCTION_WIDTH: u16 = 18;

const INITIAL_SNAKE_LENGTH: usize = 2;
const SNAKE_CHAR: char = '@';
const FOOD_CHAR: char = '#';
const OBSTACLE_CHAR: char = '!';

#[derive(Parser, Debug)]
#[command(name = "termsnake", about = "Snake in the terminal, with obstacles and a leaderboard")]
pub struct Args {
    /// Leaderboard file
    #[arg(long, default_value = "record.dat")]
    pub leaderboard: PathBuf,

    /// Number of leaderboard entries kept
    #[arg(long, default_value_t = 3)]
    pub leaders: usize,

    /// Number of obstacle cells
    #[arg(long, default_value_t = 10)]
    pub obstacles: usize,

    /// Scatter obstacles randomly instead of a centered wall
    #[arg(long)]
    pub random_obstacles: bool,

    /// Tick delay at difficulty 0, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub base_delay: u64,

    /// Seed for food and obstacle placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "termsnake.log")]
    pub log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub snake: char,
    pub food: char,
    pub obstacle: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Symbols { snake: SNAKE_CHAR, food: FOOD_CHAR, obstacle: OBSTACLE_CHAR }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub bounds: Bounds,
    pub initial_snake_length: usize,
    pub obstacle_count: usize,
    pub obstacle_layout: ObstacleLayout,
    pub base_delay_ms: u64,
    pub seed: Option<u64>,
    pub symbols: Symbols,
    pub leaderboard: LeaderboardConfig,
}

impl GameConfig {
    pub fn from_args(args: &Args, bounds: Bounds) -> Self {
        GameConfig {
            bounds,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            obstacle_count: args.obstacles,
            obstacle_layout: if args.random_obstacles {
                ObstacleLayout::Random
            } else {
                ObstacleLayout::Centered
            },
            base_delay_ms: args.base_delay,
            seed: args.seed,
            symbols: Symbols::default(),
            leaderboard: LeaderboardConfig {
                path: args.leaderboard.clone(),
                max_entries: args.leaders,
            },
        }
    }

    /// Rejects boards that are too small in general, or too small for the
    /// chosen obstacle layout.
    pub fn validate(&self) -> Result<(), GameError> {
        let bounds = self.bounds;
        if bounds.width < MIN_BOARD_SIZE || bounds.height < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall { bounds, min: MIN_BOARD_SIZE });
        }

        match self.obstacle_layout {
            ObstacleLayout::Centered => {
                ObstacleField::centered(bounds, self.obstacle_count)?;
            }
            ObstacleLayout::Random => {
                // The snake, the cell ahead of it and the first food stay free.
                let reserved = self.initial_snake_length + 2;
                if self.obstacle_count + reserved > bounds.interior_area() {
                    let count = self.obstacle_count;
                    return Err(GameError::ObstacleOutOfBounds { count, bounds });
                }
            }
        }
        Ok(())
    }

    /// Board surface left over once the header and sidebar are laid out.
    pub fn board_bounds(term_width: u16, term_height: u16) -> Bounds {
        Bounds::new(
            term_width.saturating_sub(INSTRUCTION_WIDTH) as i32,
            term_height.saturating_sub(INFORMATION_HEIGHT) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn defaults_match_the_classic_game() {
        let args = Args::parse_from(["termsnake"]);
        let config = GameConfig::from_args(&args, Bounds::new(40, 20));

        assert_eq!(config.initial_snake_length, 2);
        assert_eq!(config.obstacle_count, 10);
        assert_eq!(config.obstacle_layout, ObstacleLayout::Centered);
        assert_eq!(config.base_delay_ms, 100);
        assert_eq!(config.leaderboard.path, PathBuf::from("record.dat"));
        assert_eq!(config.leaderboard.max_entries, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "termsnake",
            "--leaderboard",
            "/tmp/x.dat",
            "--leaders",
            "5",
            "--random-obstacles",
            "--seed",
            "9",
        ]);
        let config = GameConfig::from_args(&args, Bounds::new(40, 20));

        assert_eq!(config.leaderboard.max_entries, 5);
        assert_eq!(config.obstacle_layout, ObstacleLayout::Random);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn board_leaves_room_for_panels() {
        assert_eq!(GameConfig::board_bounds(80, 24), Bounds::new(62, 18));
        assert_eq!(GameConfig::board_bounds(10, 3), Bounds::new(0, 0));
    }

    #[test]
    fn validated_defaults_always_start_a_session() {
        let args = Args::parse_from(["termsnake"]);

        for width in MIN_BOARD_SIZE..MIN_BOARD_SIZE + 6 {
            for height in MIN_BOARD_SIZE..MIN_BOARD_SIZE + 4 {
                let config = GameConfig::from_args(&args, Bounds::new(width, height));
                let session = Session::new(&config, StdRng::seed_from_u64(width as u64));
                assert_eq!(config.validate().is_ok(), session.is_ok(), "{}x{}", width, height);
            }
        }
    }

    #[test]
    fn default_wall_needs_twelve_columns() {
        let args = Args::parse_from(["termsnake"]);
        let config = |w, h| GameConfig::from_args(&args, Bounds::new(w, h));

        for (w, h) in [(10, 10), (11, 14)] {
            let res = config(w, h).validate();
            assert!(matches!(res, Err(GameError::ObstacleOutOfBounds { count: 10, .. })));
        }
        config(12, 10).validate().unwrap();
        Session::new(&config(12, 10), StdRng::seed_from_u64(0)).unwrap();

        let fewer = Args::parse_from(["termsnake", "--obstacles", "8"]);
        let small = GameConfig::from_args(&fewer, Bounds::new(10, 10));
        small.validate().unwrap();
        Session::new(&small, StdRng::seed_from_u64(0)).unwrap();
    }

    #[test]
    fn crowded_random_layout_is_rejected() {
        let args = Args::parse_from(["termsnake", "--random-obstacles", "--obstacles", "60"]);
        // 64 interior cells: 60 obstacles plus a 2-long snake, its next cell and the food.
        let config = GameConfig::from_args(&args, Bounds::new(10, 10));
        config.validate().unwrap();
        Session::new(&config, StdRng::seed_from_u64(4)).unwrap();

        let args = Args::parse_from(["termsnake", "--random-obstacles", "--obstacles", "61"]);
        let config = GameConfig::from_args(&args, Bounds::new(10, 10));
        assert!(matches!(config.validate(), Err(GameError::ObstacleOutOfBounds { .. })));
    }
}
