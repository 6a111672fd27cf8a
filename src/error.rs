use std::{io, path::PathBuf};

use thiserror::Error;

use crate::grid::{Bounds, Cell};

/// Conditions that end a session abnormally.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no free cell left on a {}x{} board", .0.width, .0.height)]
    BoardFull(Bounds),
    #[error(
        "board of {}x{} is too small, need at least {min}x{min}",
        .bounds.width, .bounds.height
    )]
    BoardTooSmall { bounds: Bounds, min: i32 },
    #[error("{count} obstacles do not fit inside a {}x{} board", .bounds.width, .bounds.height)]
    ObstacleOutOfBounds { count: usize, bounds: Bounds },
    #[error("obstacle at ({}, {}) overlaps the snake", .0.x, .0.y)]
    ObstacleOverlap(Cell),
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("could not read leaderboard {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write leaderboard {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
