use crate::pos::Pos;
use ahash::AHashSet;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Discrete board state: bounds, the snake body and the food cell.
#[derive(Debug, Clone)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    /// Head first. No cell appears twice.
    pub snake: VecDeque<Pos>,
    /// Never on the snake. `None` once the board is full.
    pub food: Option<Pos>,
}

impl Grid {
    /// Board with a three-cell snake centred and facing `Dir::Right`. No food yet.
    pub fn new(cols: u32, rows: u32) -> Self {
        let (cols, rows) = (cols as i32, rows as i32);
        let (mid_x, mid_y) = (cols / 2, rows / 2);
        let snake = (0..3).map(|i| Pos::new(mid_x - i, mid_y)).collect();
        Self {
            cols,
            rows,
            snake,
            food: None,
        }
    }

    /// Board holding the given body, head first. The body must not be empty.
    pub fn with_snake(cols: u32, rows: u32, snake: impl IntoIterator<Item = Pos>) -> Self {
        let snake: VecDeque<Pos> = snake.into_iter().collect();
        debug_assert!(!snake.is_empty(), "a snake needs at least its head");
        Self {
            cols: cols as i32,
            rows: rows as i32,
            snake,
            food: None,
        }
    }

    pub fn head(&self) -> Pos {
        debug_assert!(!self.snake.is_empty());
        self.snake.front().copied().unwrap_or(Pos::new(0, 0))
    }

    pub fn is_inside(&self, p: Pos) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    pub fn occupied_cells(&self) -> AHashSet<Pos> {
        self.snake.iter().copied().collect()
    }

    /// Uniform pick among the cells not covered by the snake.
    pub fn random_unoccupied_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Pos> {
        let occupied = self.occupied_cells();
        let free: Vec<Pos> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| Pos::new(x, y)))
            .filter(|p| !occupied.contains(p))
            .collect();
        free.choose(rng).copied()
    }

    /// Re-roll the food cell. Leaves `food` empty when the board is full.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.food = self.random_unoccupied_cell(rng);
    }
}
