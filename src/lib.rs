//! Single-screen snake on a wrapping grid.
//!
//! [`engine`] holds the game rules and knows nothing about Bevy entities; the
//! plugins feed it ticks and input and render its snapshots.

pub mod engine;
pub mod game;
pub mod rendering;
pub mod snake;
pub mod ui;
