//! Core rules of the snake arcade game
//!
//! Everything here is deterministic given a seed and free of I/O. The arcade
//! mode drives it one tick at a time and draws whatever state it leaves behind.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, LevelConfig};
pub use engine::{EatResult, GameEngine, TickEvent};
pub use state::{CollisionType, GameState, Phase, Position, RunState, Snake};
