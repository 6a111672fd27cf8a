use std::collections::{HashSet, VecDeque};

use crate::grid::{Bounds, Cell, Direction};
use MoveResult::*;

pub const MIN_SNAKE_LENGTH: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Grew,
    Moved,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfBite,
    Obstacle,
}

/// The snake only observes food and obstacles. The session owns them and
/// pushes their positions in through `sense_food` and `sense_obstacle`.
pub struct Snake {
    body: VecDeque<Cell>, // head first
    direction: Direction,
    pending: Direction,
    bounds: Bounds,
    food: Option<Cell>,
    obstacles: HashSet<Cell>,
}

impl Snake {
    pub fn new(bounds: Bounds, head: Cell, length: usize, direction: Direction) -> Self {
        let length = length.max(MIN_SNAKE_LENGTH);
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;

        for _ in 0..length {
            body.push_back(cell);
            cell = cell.step(back);
        }

        Snake { body, direction, pending: direction, bounds, food: None, obstacles: HashSet::new() }
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Direction the next move will take.
    pub fn direction(&self) -> Direction {
        self.pending
    }

    pub fn change_direction(&mut self, direction: Direction) {
        if self.body.len() > 1 && direction == self.direction.opposite() {
            return;
        }
        self.pending = direction;
    }

    pub fn sense_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    pub fn sense_obstacle(&mut self, cell: Cell) {
        self.obstacles.insert(cell);
    }

    pub fn move_forward(&mut self) -> MoveResult {
        self.direction = self.pending;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.food == Some(new_head) {
            Grew
        } else {
            self.body.pop_back();
            debug_assert!(self.body.len() >= MIN_SNAKE_LENGTH, "snake shrank below minimum length");
            Moved
        }
    }

    /// Why the head is dead where it stands, if it is. The tail has already
    /// vacated its cell when the last move did not grow.
    pub fn death_cause(&self) -> Option<DeathCause> {
        let head = self.head();

        if !self.bounds.in_interior(head) {
            Some(DeathCause::Wall)
        } else if self.obstacles.contains(&head) {
            Some(DeathCause::Obstacle)
        } else if self.body.iter().skip(1).any(|segment| *segment == head) {
            Some(DeathCause::SelfBite)
        } else {
            None
        }
    }

    pub fn check_death(&self) -> bool {
        self.death_cause().is_some()
    }
}
