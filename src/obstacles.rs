use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::error::GameError;
use crate::grid::{Bounds, Cell};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObstacleLayout {
    /// A horizontal wall through the middle of the board.
    Centered,
    /// Scattered cells, kept clear of the snake's starting area.
    Random,
}

/// Static blocking cells, generated once per session and never changed.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    cells: Vec<Cell>,
    lookup: HashSet<Cell>,
}

impl ObstacleField {
    pub fn generate<R: Rng>(
        layout: ObstacleLayout,
        bounds: Bounds,
        count: usize,
        keep_clear: &[Cell],
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let field = match layout {
            ObstacleLayout::Centered => Self::centered(bounds, count)?,
            ObstacleLayout::Random => Self::scattered(bounds, count, keep_clear, rng)?,
        };

        if let Some(cell) = field.cells.iter().find(|c| keep_clear.contains(c)) {
            return Err(GameError::ObstacleOverlap(*cell));
        }

        Ok(field)
    }

    pub fn centered(bounds: Bounds, count: usize) -> Result<Self, GameError> {
        let center = bounds.center();
        let start_x = center.x - count as i32 / 2;
        let cells: Vec<Cell> =
            (0..count as i32).map(|i| Cell::new(start_x + i, center.y)).collect();

        if !cells.iter().all(|c| bounds.in_interior(*c)) {
            return Err(GameError::ObstacleOutOfBounds { count, bounds });
        }

        Ok(Self::from_cells(cells))
    }

    pub fn scattered<R: Rng>(
        bounds: Bounds,
        count: usize,
        keep_clear: &[Cell],
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let free: Vec<Cell> = bounds.interior_cells().filter(|c| !keep_clear.contains(c)).collect();

        if free.len() < count {
            return Err(GameError::ObstacleOutOfBounds { count, bounds });
        }

        let cells = free.choose_multiple(rng, count).copied().collect();
        Ok(Self::from_cells(cells))
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self::from_cells(vec![])
    }

    fn from_cells(cells: Vec<Cell>) -> Self {
        let lookup: HashSet<Cell> = cells.iter().copied().collect();
        debug_assert_eq!(lookup.len(), cells.len(), "obstacle cells overlap");
        ObstacleField { cells, lookup }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.lookup.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}
