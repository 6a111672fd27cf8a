use Direction::*;

/// A single board cell, 0-indexed from the top left corner of the board surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Size of the board surface. The outermost row and column on every side
/// hold the box border, so only the interior is playable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Bounds { width, height }
    }

    pub fn in_interior(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.y >= 1 && cell.x < self.width - 1 && cell.y < self.height - 1
    }

    pub fn interior_area(&self) -> usize {
        ((self.width - 2).max(0) * (self.height - 2).max(0)) as usize
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..self.height - 1).flat_map(move |y| (1..self.width - 1).map(move |x| Cell::new(x, y)))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_excludes_border() {
        let bounds = Bounds::new(5, 4);
        assert!(!bounds.in_interior(Cell::new(0, 2)));
        assert!(!bounds.in_interior(Cell::new(4, 2)));
        assert!(!bounds.in_interior(Cell::new(2, 3)));
        assert!(bounds.in_interior(Cell::new(3, 2)));
        assert!(!bounds.in_interior(Cell::new(5, 0)));
        assert!(!bounds.in_interior(Cell::new(-1, 2)));
    }

    #[test]
    fn interior_cells_match_area() {
        let bounds = Bounds::new(6, 5);
        let cells: Vec<Cell> = bounds.interior_cells().collect();
        assert_eq!(cells.len(), bounds.interior_area());
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|c| bounds.in_interior(*c)));
    }

    #[test]
    fn step_and_opposite() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Up), Cell::new(3, 2));
        assert_eq!(c.step(Right).step(Right.opposite()), c);
        for d in [Up, Down, Left, Right] {
            assert_eq!(d.opposite().opposite(), d);
        }
    }
}
