use crate::config::GameConfig;
use crate::grid::Grid;
use crate::pos::{Dir, Pos};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

/// What a single grid tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused or over; nothing changed
    Idle,
    Moved,
    /// Food at this cell was eaten and the snake grew
    Ate(Pos),
    Crashed(Crash),
}

pub struct Game {
    pub grid: Grid,
    pub dir: Dir,
    pub phase: Phase,
    pub score: u32,
    /// Grid moves per second
    pub speed: f32,
    speed_step: f32,
    max_speed: f32,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut grid = Grid::new(config.cols, config.rows);
        grid.place_food(rng);
        Self::from_grid(config, grid, Dir::Right)
    }

    /// A running game on an arbitrary board. Food is taken as-is from `grid`.
    pub fn from_grid(config: &GameConfig, grid: Grid, dir: Dir) -> Self {
        Self {
            grid,
            dir,
            phase: Phase::Running,
            score: 0,
            speed: config.initial_speed,
            speed_step: config.speed_step,
            max_speed: config.max_speed,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Milliseconds between grid moves at the current speed
    pub fn ms_per_tick(&self) -> f32 {
        if self.speed > 0.0 {
            1000.0 / self.speed
        } else {
            1000.0
        }
    }

    /// Advance by exactly one grid tick.
    ///
    /// Both collision checks run before the snake is touched, so a crash leaves
    /// the body exactly as it was.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        if self.phase != Phase::Running {
            return StepOutcome::Idle;
        }

        let new_head = self.grid.head().step(self.dir);
        if !self.grid.is_inside(new_head) {
            self.phase = Phase::GameOver;
            return StepOutcome::Crashed(Crash::Wall);
        }

        // The tail cell frees up this tick unless we grow into the food.
        let grows = self.grid.food == Some(new_head);
        let checked = if grows {
            self.grid.snake.len()
        } else {
            self.grid.snake.len().saturating_sub(1)
        };
        if self.grid.snake.iter().take(checked).any(|&s| s == new_head) {
            self.phase = Phase::GameOver;
            return StepOutcome::Crashed(Crash::Body);
        }

        self.grid.snake.push_front(new_head);
        if grows {
            self.score += 1;
            self.speed = (self.speed + self.speed_step).min(self.max_speed);
            self.grid.place_food(rng);
            if self.grid.food.is_none() {
                log::info!("board full at length {}", self.grid.snake.len());
            }
            StepOutcome::Ate(new_head)
        } else {
            self.grid.snake.pop_back();
            StepOutcome::Moved
        }
    }

    /// Turn, unless `new_dir` would reverse straight into the neck.
    /// Returns whether the direction changed.
    pub fn change_dir(&mut self, new_dir: Dir) -> bool {
        if new_dir == self.dir.opposite() {
            return false;
        }
        self.dir = new_dir;
        true
    }

    /// Flip between running and paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => Phase::GameOver,
        };
    }
}
