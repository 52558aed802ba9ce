use super::{
    action::Action,
    config::GameConfig,
    state::{CollisionType, GameState, Phase, Position, RunState, Snake},
};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::time::Duration;

/// Random draws before falling back to listing the free cells
const REJECTION_ATTEMPTS: usize = 64;

/// Result of checking the head against the apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EatResult {
    /// Head is not on the apple
    Missed,
    /// Apple eaten, level unchanged
    Ate,
    /// Apple eaten and the level target was reached
    LevelUp,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The game was not in the playing phase, nothing moved
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake ate an apple
    AteApple,
    /// The snake ate the last apple of a level; `level` is the new zero-based index
    LevelUp { level: usize },
    /// A collision cost a life and the board was reset
    LostLife {
        collision: CollisionType,
        lives_left: u32,
    },
    /// A collision cost the last life
    GameOver { collision: CollisionType },
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose apple placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh run: initial snake, new apple, full lives, level 1
    pub fn new_game(&mut self) -> GameState {
        let snake = Snake::spawn(&self.config);
        let apple = self.spawn_apple(&snake);
        GameState::new(snake, apple, &self.config)
    }

    /// Time between ticks at the state's current level
    pub fn tick_period(&self, state: &GameState) -> Duration {
        let index = state.run.level.min(self.config.last_level());
        self.config.levels[index].tick_period()
    }

    /// Execute one tick: move, then resolve a collision or try the apple
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> TickEvent {
        if !state.is_playing() {
            return TickEvent::Idle;
        }

        self.advance(state, action);
        state.ticks += 1;

        let collision = if self.check_border_collision(state) {
            Some(CollisionType::Wall)
        } else if self.check_self_collision(state) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        };

        if let Some(collision) = collision {
            return self.resolve_collision(state, collision);
        }

        match self.try_eat_apple(state) {
            EatResult::Missed => TickEvent::Moved,
            EatResult::Ate => TickEvent::AteApple,
            EatResult::LevelUp => TickEvent::LevelUp {
                level: state.run.level,
            },
        }
    }

    /// Apply the steering input and move the snake one cell. Reversals are ignored.
    pub fn advance(&self, state: &mut GameState, action: Action) {
        if let Action::Turn(direction) = action {
            state.snake.turn(direction);
        }
        state.snake.slither();
    }

    /// True if the head is outside the grid
    pub fn check_border_collision(&self, state: &GameState) -> bool {
        !state.is_in_bounds(state.snake.head())
    }

    /// True if the head overlaps the rest of the body
    pub fn check_self_collision(&self, state: &GameState) -> bool {
        state.snake.bites_itself()
    }

    /// Eat the apple if the head is on it, respawn it and handle level progress
    pub fn try_eat_apple(&mut self, state: &mut GameState) -> EatResult {
        if state.apple != Some(state.snake.head()) {
            return EatResult::Missed;
        }

        state.snake.growing = true;
        state.run.score += 1;
        state.run.apples_in_level += 1;
        state.apple = self.spawn_apple(&state.snake);
        debug!(
            "Apple eaten: score {}, {} in level {}",
            state.run.score,
            state.run.apples_in_level,
            state.run.level_number()
        );

        match self.config.level_threshold(state.run.level) {
            Some(needed) if state.run.apples_in_level >= needed => {
                state.run.level += 1;
                state.run.apples_in_level = 0;
                state.phase = Phase::LevelComplete;
                info!(
                    "Level {} complete, entering level {}",
                    state.run.level,
                    state.run.level_number()
                );
                EatResult::LevelUp
            }
            _ => EatResult::Ate,
        }
    }

    /// Take a life; end the run at zero, otherwise put snake and apple back at the start
    pub fn resolve_collision(
        &mut self,
        state: &mut GameState,
        collision: CollisionType,
    ) -> TickEvent {
        state.run.lives = state.run.lives.saturating_sub(1);

        if state.run.lives == 0 {
            state.phase = Phase::GameOver;
            info!(
                "Game over after {:?} collision, final score {}",
                collision, state.run.score
            );
            return TickEvent::GameOver { collision };
        }

        info!(
            "{:?} collision, {} lives left",
            collision, state.run.lives
        );
        self.reset_board(state);
        TickEvent::LostLife {
            collision,
            lives_left: state.run.lives,
        }
    }

    /// Leave the level-complete screen. Returns false in any other phase.
    pub fn continue_level(&self, state: &mut GameState) -> bool {
        if state.phase != Phase::LevelComplete {
            return false;
        }
        state.phase = Phase::Playing;
        true
    }

    /// Start a new run after game over. Returns false in any other phase.
    pub fn restart(&mut self, state: &mut GameState) -> bool {
        if !state.is_game_over() {
            return false;
        }
        state.run = RunState::new(self.config.initial_lives);
        state.ticks = 0;
        self.reset_board(state);
        state.phase = Phase::Playing;
        info!("Restarted with {} lives", state.run.lives);
        true
    }

    fn reset_board(&mut self, state: &mut GameState) {
        state.snake = Snake::spawn(&self.config);
        state.apple = self.spawn_apple(&state.snake);
    }

    /// Pick a uniformly random cell the snake does not occupy
    pub fn spawn_apple(&mut self, snake: &Snake) -> Option<Position> {
        let width = self.config.grid_width as i32;
        let height = self.config.grid_height as i32;

        for _ in 0..REJECTION_ATTEMPTS {
            let pos = Position::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height));
            if !snake.contains(pos) {
                return Some(pos);
            }
        }

        // Crowded board: sample from the free cells directly
        let free: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snake.contains(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
