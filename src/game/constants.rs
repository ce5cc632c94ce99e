//! Game constants for board size, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

// Board dimensions
pub const GRID_SIZE: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: u32 = 5;

// Timing
pub const FRAME_DURATION: Duration = Duration::from_millis(250);

// Visual settings
pub const CELL_SIZE: f32 = 70.0;
pub const GRID_LINE_THICKNESS: f32 = 1.5;
pub const FOOD_INSET: f32 = 1.0;
pub const EYE_RADIUS: f32 = 8.0;
pub const EYE_SHIFT: f32 = 14.0;

// Control strip below the board
pub const CONTROLS_HEIGHT: f32 = 200.0;
pub const BUTTON_SIZE: f32 = 56.0;

// Colors
pub const GRID_COLOR: Color = Color::srgba(0.0, 0.0, 1.0, 1.0);
pub const SNAKE_COLOR: Color = Color::srgba(0.0, 0.0, 1.0, 1.0);
pub const FOOD_COLOR: Color = Color::srgba(1.0, 1.0, 0.0, 1.0);
pub const EYE_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);
pub const BUTTON_COLOR: Color = Color::srgba(0.15, 0.15, 0.3, 1.0);
pub const BUTTON_PRESSED_COLOR: Color = Color::srgba(0.3, 0.3, 0.6, 1.0);

// Z-index constants for rendering layers
pub const Z_GRID: f32 = 0.0;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE: f32 = 1.5;
pub const Z_EYES: f32 = 2.0;
