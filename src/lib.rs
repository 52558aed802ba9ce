//! Hungry Snakes - a terminal snake arcade game and a word-guessing game
//!
//! This library provides:
//! - Core snake rules, free of I/O (game module)
//! - Word-guessing rules (guess module)
//! - Terminal rendering and key mapping (render, input modules)
//! - Synthesized sound effects (audio module)
//! - The interactive loops for both games (modes module)

pub mod audio;
pub mod game;
pub mod guess;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
