//! Game state engine: owns the snake, the food and the free-cell pool and
//! advances them one tick at a time. Nothing in here knows about Bevy
//! entities; the plugins read [`BoardSnapshot`]s and feed input and ticks in.

mod cell;
mod free_cells;

pub use cell::*;
pub use free_cells::*;

use std::collections::VecDeque;

use bevy::log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

use crate::game::{GRID_SIZE, INITIAL_SNAKE_LENGTH};

/// Board dimensions and starting snake length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    grid_size: u32,
    initial_length: u32,
}

impl EngineConfig {
    pub fn new(grid_size: u32, initial_length: u32) -> Result<Self, ConfigError> {
        if grid_size < 2 {
            return Err(ConfigError::GridTooSmall(grid_size));
        }
        // The starting snake is laid out along row 0.
        if initial_length == 0 || initial_length > grid_size {
            return Err(ConfigError::InvalidInitialLength {
                length: initial_length,
                grid_size,
            });
        }
        Ok(EngineConfig {
            grid_size,
            initial_length,
        })
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn initial_length(&self) -> u32 {
        self.initial_length
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            grid_size: GRID_SIZE,
            initial_length: INITIAL_SNAKE_LENGTH,
        }
    }
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid side must be at least 2, got {0}")]
    GridTooSmall(u32),
    #[error("initial snake length {length} does not fit a row of {grid_size} cells")]
    InvalidInitialLength { length: u32, grid_size: u32 },
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    SelfCollision,
    /// No free cell was left to place food on.
    BoardFull,
}

/// Receives game-over notifications, synchronously from inside the failing tick.
pub trait GameListener: Send + Sync {
    fn on_fail(&mut self, reason: FailReason, score: usize);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    /// Ticks are ignored until the next `start()`.
    Failed,
}

/// Result of a single `tick()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running; nothing changed.
    Idle,
    Moved,
    Grew,
    Failed(FailReason),
}

impl TickOutcome {
    /// Whether the board changed in a way that must be redrawn.
    pub fn needs_redraw(&self) -> bool {
        matches!(self, TickOutcome::Moved | TickOutcome::Grew)
    }
}

/// Immutable copy of everything the renderer needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub grid_size: u32,
    pub snake: Vec<Cell>,
    pub heading: Direction,
    pub food: Option<Cell>,
    pub phase: Phase,
    pub score: usize,
}

impl BoardSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub fn orientation(&self) -> Orientation {
        self.heading.orientation()
    }
}

pub struct GameEngine {
    config: EngineConfig,
    snake: VecDeque<Cell>,
    food: Option<Cell>,
    free_cells: FreeCells,
    pending: Direction,
    committed: Direction,
    phase: Phase,
    rng: StdRng,
    listener: Option<Box<dyn GameListener>>,
}

impl GameEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Engine with a deterministic food sequence.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        GameEngine {
            config,
            snake: VecDeque::new(),
            food: None,
            free_cells: FreeCells::full(config.grid_size),
            pending: Direction::Right,
            committed: Direction::Right,
            phase: Phase::Idle,
            rng,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listener = Some(listener);
    }

    /// Detaches the listener. Ticking is the caller's business.
    pub fn finish(&mut self) {
        self.listener = None;
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.snake.iter()
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn committed_direction(&self) -> Direction {
        self.committed
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn free_cell_count(&self) -> usize {
        self.free_cells.len()
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        self.free_cells.contains(cell)
    }

    pub fn score(&self) -> usize {
        self.snake
            .len()
            .saturating_sub(self.config.initial_length as usize)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            grid_size: self.config.grid_size,
            snake: self.snake.iter().copied().collect(),
            heading: self.committed,
            food: self.food,
            phase: self.phase,
            score: self.score(),
        }
    }

    /// Requests a turn for the next tick. Reversing onto the committed
    /// direction is silently ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.committed.opposite() {
            self.pending = direction;
        }
    }

    /// Resets the board: straight snake on row 0 heading right, fresh food.
    pub fn start(&mut self) {
        self.pending = Direction::Right;
        self.committed = Direction::Right;
        self.snake = (0..self.config.initial_length)
            .rev()
            .map(|x| Cell::new(x, 0))
            .collect();
        self.free_cells = FreeCells::excluding(self.config.grid_size, &self.snake);
        self.food = None;
        self.phase = Phase::Running;
        info!(
            "Game started on a {0}x{0} grid with a {1}-cell snake",
            self.config.grid_size,
            self.snake.len()
        );
        self.spawn_food();
    }

    /// Advances the game by one frame.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }
        let Some(head) = self.head() else {
            return TickOutcome::Idle;
        };

        self.committed = self.pending;
        let previous: Vec<Cell> = self.snake.iter().copied().collect();

        let new_head = head.step(self.committed, self.config.grid_size);
        self.snake.push_front(new_head);
        let vacated = self.snake.pop_back();

        if self.snake.iter().skip(1).any(|cell| *cell == new_head) {
            self.fail(FailReason::SelfCollision, Some(previous));
            return TickOutcome::Failed(FailReason::SelfCollision);
        }

        if let Some(tail) = vacated {
            self.free_cells.release(tail);
        }
        self.free_cells.claim(new_head);

        if self.food != Some(new_head) {
            return TickOutcome::Moved;
        }

        if let Some(tail) = vacated {
            self.snake.push_back(tail);
        }
        self.free_cells = FreeCells::excluding(self.config.grid_size, &self.snake);
        self.food = None;
        debug!(
            "Food eaten at ({}, {}), length {}",
            new_head.x,
            new_head.y,
            self.snake.len()
        );
        match self.spawn_food() {
            Some(reason) => TickOutcome::Failed(reason),
            None => TickOutcome::Grew,
        }
    }

    fn spawn_food(&mut self) -> Option<FailReason> {
        match self.free_cells.take_random(&mut self.rng) {
            Some(cell) => {
                self.food = Some(cell);
                None
            }
            None => {
                self.fail(FailReason::BoardFull, None);
                Some(FailReason::BoardFull)
            }
        }
    }

    /// Rolls the snake back to `restore` (the last good board) and halts.
    fn fail(&mut self, reason: FailReason, restore: Option<Vec<Cell>>) {
        if let Some(previous) = restore {
            self.snake = previous.into();
            self.free_cells = FreeCells::excluding(self.config.grid_size, &self.snake);
        }
        self.pending = Direction::Right;
        self.committed = Direction::Right;
        self.food = None;
        self.phase = Phase::Failed;

        let score = self.score();
        info!("Game over ({reason:?}), score {score}");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_fail(reason, score);
        }
    }

    /// Moves the food to `cell`, which must be free.
    #[cfg(test)]
    pub(crate) fn place_food(&mut self, cell: Cell) {
        if let Some(old) = self.food.take() {
            self.free_cells.release(old);
        }
        assert!(self.free_cells.claim(cell), "food must go on a free cell");
        self.food = Some(cell);
    }
}
