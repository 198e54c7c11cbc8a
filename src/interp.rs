//! Rendered snake positions that chase the logical grid cells.
//!
//! The grid moves in whole cells a few times per second while frames come at
//! the display rate. Each frame every segment closes a fraction of the gap to
//! its cell centre, so motion looks continuous and settles within a few frames
//! whatever the frame timing.

use crate::pos::Pos;
use glam::Vec2;

/// Keeps the per-frame step short of the full gap so segments never overshoot.
const DAMPING: f32 = 0.9;

/// Pixel centre of a cell
pub fn cell_center(p: Pos, cell_size: u32) -> Vec2 {
    let cell = cell_size as i32;
    Vec2::new((p.x * cell + cell / 2) as f32, (p.y * cell + cell / 2) as f32)
}

/// Fraction of the remaining distance to cover this frame.
pub fn smoothing_alpha(elapsed_ms: f32, ms_per_tick: f32) -> f32 {
    if ms_per_tick <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / ms_per_tick * DAMPING).min(1.0)
}

/// One pixel position per snake cell, head first.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    positions: Vec<Vec2>,
}

impl Segments {
    /// Start exactly on the given cells.
    pub fn seeded<'a>(cells: impl IntoIterator<Item = &'a Pos>, cell_size: u32) -> Self {
        Self {
            positions: cells.into_iter().map(|&p| cell_center(p, cell_size)).collect(),
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Match the snake length. New tail entries copy the current last position
    /// so growth does not pop in; extra entries are cut from the end.
    pub fn resync(&mut self, len: usize) {
        if let Some(&last) = self.positions.last() {
            self.positions.resize(len, last);
        } else {
            self.positions.truncate(len);
        }
    }

    /// Move every segment towards its target centre.
    pub fn advance(&mut self, targets: &[Vec2], elapsed_ms: f32, ms_per_tick: f32) {
        if self.positions.is_empty() {
            self.positions = targets.to_vec();
            return;
        }
        self.resync(targets.len());

        let alpha = smoothing_alpha(elapsed_ms, ms_per_tick);
        for (pos, &target) in self.positions.iter_mut().zip(targets) {
            *pos = pos.lerp(target, alpha);
        }
    }
}
