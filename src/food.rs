use rand::{seq::SliceRandom, Rng};

use crate::error::GameError;
use crate::grid::{Bounds, Cell};

// Random probes per interior cell before falling back to scanning the free cells.
const PROBES_PER_CELL: usize = 2;

pub struct FoodSpawner<R> {
    bounds: Bounds,
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub fn new(bounds: Bounds, rng: R) -> Self {
        FoodSpawner { bounds, rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Picks a uniformly random interior cell for which `occupied` is false.
    /// Sampling is capped; once the cap is hit the free cells are listed and
    /// one is chosen from them, so a full board fails instead of spinning.
    pub fn spawn<F>(&mut self, occupied: F) -> Result<Cell, GameError>
    where
        F: Fn(Cell) -> bool,
    {
        let (w, h) = (self.bounds.width, self.bounds.height);
        if w < 3 || h < 3 {
            return Err(GameError::BoardFull(self.bounds));
        }

        for _ in 0..self.bounds.interior_area() * PROBES_PER_CELL {
            let cell = Cell::new(self.rng.gen_range(1..w - 1), self.rng.gen_range(1..h - 1));
            if !occupied(cell) {
                return Ok(cell);
            }
        }

        let free: Vec<Cell> = self.bounds.interior_cells().filter(|c| !occupied(*c)).collect();
        free.choose(&mut self.rng).copied().ok_or(GameError::BoardFull(self.bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn spawner(bounds: Bounds, seed: u64) -> FoodSpawner<StdRng> {
        FoodSpawner::new(bounds, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn never_lands_on_taken_cells() {
        let bounds = Bounds::new(10, 8);
        let taken: HashSet<Cell> =
            bounds.interior_cells().filter(|c| (c.x + c.y) % 3 != 0).collect();

        let mut spawner = spawner(bounds, 3);
        for _ in 0..200 {
            let food = spawner.spawn(|c| taken.contains(&c)).unwrap();
            assert!(bounds.in_interior(food));
            assert!(!taken.contains(&food));
        }
    }

    #[test]
    fn finds_the_last_free_cell() {
        let bounds = Bounds::new(7, 7);
        let last = Cell::new(4, 2);

        let mut spawner = spawner(bounds, 11);
        assert_eq!(spawner.spawn(|c| c != last).unwrap(), last);
    }

    #[test]
    fn full_board_fails_fast() {
        let bounds = Bounds::new(6, 6);
        let mut spawner = spawner(bounds, 0);
        assert!(matches!(spawner.spawn(|_| true), Err(GameError::BoardFull(b)) if b == bounds));
    }

    #[test]
    fn degenerate_board_is_full() {
        let mut spawner = spawner(Bounds::new(2, 9), 0);
        assert!(spawner.spawn(|_| false).is_err());
    }
}
