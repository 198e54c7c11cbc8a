use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup configuration for a game window and its rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of one board cell in pixels
    pub cell_size: u32,
    /// Board columns
    pub cols: u32,
    /// Board rows
    pub rows: u32,
    /// Grid moves per second at the start of a round
    pub initial_speed: f32,
    /// Speed added per food eaten
    pub speed_step: f32,
    /// Speed never exceeds this
    pub max_speed: f32,
    /// Particles spawned when food is eaten
    pub burst_size: usize,
    pub target_fps: u32,
    /// Draw faint grid lines (only when cells are at least 8px)
    pub show_grid: bool,
    /// Fixed RNG seed; a random one is picked when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            cols: 30,
            rows: 30,
            initial_speed: 8.0,
            speed_step: 0.5,
            max_speed: 25.0,
            burst_size: 12,
            target_fps: 60,
            show_grid: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Read a JSON file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        // The starting snake covers the centre column and the two cells left of it.
        if self.cols < 4 {
            bail!("board needs at least 4 columns, got {}", self.cols);
        }
        if self.rows < 1 {
            bail!("board needs at least 1 row");
        }
        if self.cell_size < 4 {
            bail!("cell size must be at least 4px, got {}", self.cell_size);
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            bail!("initial speed must be positive, got {}", self.initial_speed);
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            bail!("speed step must not be negative, got {}", self.speed_step);
        }
        if !self.max_speed.is_finite() || self.max_speed < self.initial_speed {
            bail!(
                "max speed {} is below initial speed {}",
                self.max_speed,
                self.initial_speed
            );
        }
        if self.target_fps == 0 {
            bail!("target fps must be positive");
        }
        // Board coordinates are i32.
        if self.cols > i32::MAX as u32 || self.rows > i32::MAX as u32 {
            bail!("board of {}x{} cells is too large", self.cols, self.rows);
        }
        let (Some(width), Some(height)) = (
            self.cols.checked_mul(self.cell_size),
            self.rows.checked_mul(self.cell_size),
        ) else {
            bail!(
                "{}x{} cells of {}px do not fit in a window",
                self.cols,
                self.rows,
                self.cell_size
            );
        };
        if width.checked_mul(height).and_then(|px| px.checked_mul(4)).is_none() {
            bail!("{width}x{height} frame buffer is too large");
        }
        Ok(())
    }

    /// Window size in pixels. Exact for a config that passed `validate`.
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.cols.saturating_mul(self.cell_size),
            self.rows.saturating_mul(self.cell_size),
        )
    }

    pub fn grid_visible(&self) -> bool {
        self.show_grid && self.cell_size >= 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 30);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.initial_speed, 8.0);
        assert_eq!(config.window_size(), (600, 600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "cols": 12, "seed": 7 }"#).unwrap();
        assert_eq!(config.cols, 12);
        assert_eq!(config.rows, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_speed, 25.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(GameConfig::new(3, 10).validate().is_err());
        assert!(GameConfig::new(4, 1).validate().is_ok());
        assert!(GameConfig::new(10, 0).validate().is_err());

        let mut config = GameConfig::default();
        config.initial_speed = 0.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.max_speed = 4.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.cell_size = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_window() {
        let mut config = GameConfig::new(70_000, 30);
        config.cell_size = 70_000;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(30, 70_000);
        config.cell_size = 70_000;
        assert!(config.validate().is_err());

        // Each side fits, but the RGBA frame does not.
        let mut config = GameConfig::new(40_000, 40_000);
        config.cell_size = 4;
        assert!(config.validate().is_err());

        assert!(GameConfig::new(i32::MAX as u32 + 1, 1).validate().is_err());
        assert!(GameConfig::new(200, 100).validate().is_ok());
    }

    #[test]
    fn test_grid_hidden_for_tiny_cells() {
        let mut config = GameConfig::default();
        assert!(config.grid_visible());
        config.cell_size = 6;
        assert!(!config.grid_visible());
    }
}
