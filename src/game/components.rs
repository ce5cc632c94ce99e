//! ECS components for the snake game.

use bevy::prelude::*;

use crate::engine::Direction;

/// On-screen button that turns the snake.
#[derive(Component, Clone, Copy, Debug)]
pub struct DirectionButton(pub Direction);

/// Component to mark the "More" button shown after a game over.
#[derive(Component)]
pub struct RestartButton;

/// Component to mark the game over info text.
#[derive(Component)]
pub struct InfoText;

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;
