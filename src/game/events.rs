//! Game events (messages).

use bevy::prelude::*;

use crate::engine::FailReason;

/// Message triggered when the board changed and must be redrawn.
#[derive(Message)]
pub struct RedrawEvent;

/// Message triggered when the engine reports a game over.
#[derive(Message, Clone, Copy, Debug)]
pub struct GameOverEvent {
    pub reason: FailReason,
    pub score: usize,
}

/// Message asking for a fresh game.
#[derive(Message)]
pub struct RestartEvent;
