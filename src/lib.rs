//! Snake Glide - grid Snake with smooth movement
//!
//! Core modules:
//! - `grid`, `game`: board state and the fixed-step simulation
//! - `particles`, `interp`: frame-rate visual state layered on top
//! - `draw`, `render`: software rasteriser and the frame renderer
//! - `input`, `app`: key bindings and the per-frame controller

pub mod app;
pub mod config;
pub mod draw;
pub mod game;
pub mod grid;
pub mod input;
pub mod interp;
pub mod particles;
pub mod pos;
pub mod render;

pub use app::{FrameClock, Session};
pub use config::GameConfig;
pub use game::{Game, Phase, StepOutcome};
pub use pos::{Dir, Pos};
