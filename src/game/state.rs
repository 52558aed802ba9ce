use std::collections::VecDeque;

use super::action::Direction;
use super::config::GameConfig;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Set by eating; the next move keeps the tail
    pub growing: bool,
}

impl Snake {
    /// Create a snake whose body trails straight back from `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.step(direction.opposite());
            body.push_back(cell);
        }

        Self {
            body,
            direction,
            growing: false,
        }
    }

    /// Length 1, centred on the grid, heading right
    pub fn spawn(config: &GameConfig) -> Self {
        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        Self::new(center, Direction::Right, 1)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Turn unless it would reverse the snake. Returns whether the heading changed.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Push a new head one step ahead and drop the tail unless growing
    pub fn slither(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop_back();
        }
    }

    /// True if the head shares a cell with any later segment
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a snake built through `new`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the grid
    Wall,
    /// Head landed on the body
    SelfCollision,
}

/// What the game is currently waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Paused on the celebration screen until a key is pressed
    LevelComplete,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// Counters that survive a lost life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    /// Zero-based index into `GameConfig::levels`
    pub level: usize,
    pub apples_in_level: u32,
}

impl RunState {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 0,
            apples_in_level: 0,
        }
    }

    /// Level as shown to the player, starting at 1
    pub fn level_number(&self) -> usize {
        self.level + 1
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only when the snake covers every cell
    pub apple: Option<Position>,
    pub run: RunState,
    pub phase: Phase,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Ticks since the run started
    pub ticks: u64,
}

impl GameState {
    pub fn new(snake: Snake, apple: Option<Position>, config: &GameConfig) -> Self {
        Self {
            snake,
            apple,
            run: RunState::new(config.initial_lives),
            phase: Phase::Playing,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            ticks: 0,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
