use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Fastest tick rate a level may ask for
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// Largest grid side; every cell is drawn each frame
pub const MAX_GRID_SIDE: usize = 500;

const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Speed and apple target of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Snake moves per second while this level is active
    pub ticks_per_second: u32,
    /// Apples to eat before moving on; `None` means the level never ends
    pub apples_needed: Option<u32>,
}

impl LevelConfig {
    pub const fn new(ticks_per_second: u32, apples_needed: Option<u32>) -> Self {
        Self {
            ticks_per_second,
            apples_needed,
        }
    }

    /// Time between two ticks, never shorter than a millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second.max(1)))
            .max(MIN_TICK_PERIOD)
    }
}

/// Configuration for the arcade game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Lives at the start of a run
    pub initial_lives: u32,
    /// Level progression, first level first. The last entry never advances.
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_lives: 3,
            levels: vec![
                LevelConfig::new(4, Some(5)),
                LevelConfig::new(6, Some(10)),
                LevelConfig::new(8, Some(15)),
                LevelConfig::new(10, None),
            ],
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their default.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid must be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width * self.grid_height >= 2,
            "grid needs room for both the snake and an apple"
        );
        ensure!(self.initial_lives > 0, "initial lives must be positive");
        ensure!(!self.levels.is_empty(), "at least one level is required");
        for (index, level) in self.levels.iter().enumerate() {
            ensure!(
                level.ticks_per_second > 0,
                "level {} has a tick rate of zero",
                index + 1
            );
            ensure!(
                level.ticks_per_second <= MAX_TICKS_PER_SECOND,
                "level {} ticks {} times a second, the limit is {MAX_TICKS_PER_SECOND}",
                index + 1,
                level.ticks_per_second
            );
        }
        Ok(())
    }

    /// Index of the final level
    pub fn last_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Apples needed to leave `level`, or `None` if it cannot be left
    pub fn level_threshold(&self, level: usize) -> Option<u32> {
        if level >= self.last_level() {
            return None;
        }
        self.levels.get(level).and_then(|l| l.apples_needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.initial_lives, 3);
        assert_eq!(config.levels.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.levels, GameConfig::default().levels);
    }

    #[test]
    fn test_level_thresholds() {
        let config = GameConfig::default();
        assert_eq!(config.level_threshold(0), Some(5));
        assert_eq!(config.level_threshold(1), Some(10));
        assert_eq!(config.level_threshold(2), Some(15));
        assert_eq!(config.level_threshold(3), None);
        assert_eq!(config.level_threshold(9), None);
    }

    #[test]
    fn test_final_level_never_advances_even_with_target() {
        let mut config = GameConfig::small();
        config.levels = vec![LevelConfig::new(5, Some(1)), LevelConfig::new(7, Some(1))];
        assert_eq!(config.level_threshold(0), Some(1));
        assert_eq!(config.level_threshold(1), None);
    }

    #[test]
    fn test_tick_period() {
        assert_eq!(
            LevelConfig::new(4, None).tick_period(),
            Duration::from_millis(250)
        );
        assert_eq!(
            LevelConfig::new(10, None).tick_period(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_tick_period_never_zero() {
        assert_eq!(
            LevelConfig::new(u32::MAX, None).tick_period(),
            Duration::from_millis(1)
        );
        assert_eq!(
            LevelConfig::new(MAX_TICKS_PER_SECOND, None).tick_period(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_tick_rate_above_limit_rejected() {
        let json = r#"{ "levels": [{ "ticks_per_second": 4294967295, "apples_needed": null }] }"#;
        assert!(GameConfig::from_json(json).is_err());

        let mut config = GameConfig::default();
        config.levels[0].ticks_per_second = MAX_TICKS_PER_SECOND;
        assert!(config.validate().is_ok());
        config.levels[0].ticks_per_second = MAX_TICKS_PER_SECOND + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert!(GameConfig::new(100_000, 100_000).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 10).validate().is_err());
        assert!(GameConfig::new(10, usize::MAX).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "grid_width": 12, "initial_lives": 5 }"#).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.levels.len(), 4);
    }

    #[test]
    fn test_json_levels() {
        let json = r#"{
            "levels": [
                { "ticks_per_second": 3, "apples_needed": 2 },
                { "ticks_per_second": 9, "apples_needed": null }
            ]
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.levels[0], LevelConfig::new(3, Some(2)));
        assert_eq!(config.levels[1], LevelConfig::new(9, None));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = GameConfig::default();
        config.levels.clear();
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(1, 1);
        assert!(config.validate().is_err());
        config.grid_width = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_lives = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.levels[1].ticks_per_second = 0;
        assert!(config.validate().is_err());

        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
