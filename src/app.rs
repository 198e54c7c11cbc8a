//! Per-frame controller: turns intents into state changes and drives the
//! fixed-rate grid ticks from variable frame times.

use crate::config::GameConfig;
use crate::game::{Game, Phase, StepOutcome};
use crate::input::Intent;
use crate::interp::{Segments, cell_center};
use crate::particles::Particles;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Longest frame the clock reports, so a stalled window cannot queue up a
/// long burst of catch-up ticks.
pub const MAX_FRAME_MS: f32 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one window owns between frames.
pub struct Session {
    pub config: GameConfig,
    pub game: Game,
    pub particles: Particles,
    pub segments: Segments,
    /// Milliseconds accumulated towards the next grid tick
    pub move_timer: f32,
    pub seed: u64,
    rng: SmallRng,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let mut rng = SmallRng::seed_from_u64(seed);
        let game = Game::new(&config, &mut rng);
        let segments = Segments::seeded(&game.grid.snake, config.cell_size);
        Self {
            config,
            game,
            particles: Particles::new(),
            segments,
            move_timer: 0.0,
            seed,
            rng,
        }
    }

    /// Start a fresh round. The RNG carries on, so rounds differ.
    pub fn reset(&mut self) {
        self.game = Game::new(&self.config, &mut self.rng);
        self.segments = Segments::seeded(&self.game.grid.snake, self.config.cell_size);
        self.particles.clear();
        self.move_timer = 0.0;
    }

    pub fn handle(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::Turn(dir) => {
                if !self.game.change_dir(dir) {
                    log::trace!("ignored reversal {:?} -> {:?}", self.game.dir, dir);
                }
            }
            Intent::TogglePause => {
                self.game.toggle_pause();
                match self.game.phase {
                    Phase::Paused => log::info!("paused"),
                    Phase::Running => log::info!("resumed"),
                    Phase::GameOver => {}
                }
            }
            Intent::Restart => {
                if self.game.is_over() {
                    log::info!("restarting");
                    self.reset();
                }
            }
            Intent::Quit => {
                log::info!("quit with score {}", self.game.score);
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Advance by one frame of `elapsed_ms`: run every grid tick that came
    /// due, then age particles and ease the rendered segments.
    pub fn update(&mut self, elapsed_ms: f32) {
        self.move_timer += elapsed_ms;
        loop {
            let ms_per_tick = self.game.ms_per_tick();
            if self.move_timer < ms_per_tick {
                break;
            }
            self.move_timer -= ms_per_tick;
            self.tick();
        }

        self.particles.advance(elapsed_ms);
        let targets = self.targets();
        self.segments
            .advance(&targets, elapsed_ms, self.game.ms_per_tick());
    }

    fn tick(&mut self) {
        match self.game.step(&mut self.rng) {
            StepOutcome::Idle => {}
            StepOutcome::Moved => {}
            StepOutcome::Ate(cell) => {
                log::debug!(
                    "ate food at {:?}: score {} speed {:.1}",
                    cell,
                    self.game.score,
                    self.game.speed
                );
                let origin = cell_center(cell, self.config.cell_size);
                self.particles
                    .spawn_burst(origin, self.config.burst_size, &mut self.rng);
            }
            StepOutcome::Crashed(crash) => {
                log::info!(
                    "game over ({:?}) with score {} at length {}",
                    crash,
                    self.game.score,
                    self.game.grid.snake.len()
                );
            }
        }
        self.segments.resync(self.game.grid.snake.len());
    }

    /// Pixel centres of the snake cells, head first.
    pub fn targets(&self) -> Vec<Vec2> {
        self.game
            .grid
            .snake
            .iter()
            .map(|&p| cell_center(p, self.config.cell_size))
            .collect()
    }
}

/// Wall-clock frame timing and pacing.
pub struct FrameClock {
    last: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame: Duration::from_secs(1) / target_fps.max(1),
        }
    }

    /// Milliseconds since the previous call, capped at `MAX_FRAME_MS`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        (elapsed.as_secs_f32() * 1000.0).min(MAX_FRAME_MS)
    }

    /// When the next frame is due.
    pub fn next_deadline(&self) -> Instant {
        self.last + self.frame
    }
}
