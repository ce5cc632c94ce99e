//! Game resources (singleton state).

use bevy::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::engine::{BoardSnapshot, FailReason, GameEngine, GameListener};

use super::{FRAME_DURATION, GameOverEvent};

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// The engine driving the board. Systems mutate it only through its
/// public operations.
#[derive(Resource, Deref, DerefMut)]
pub struct SnakeGame(pub GameEngine);

/// Tick source for the engine: a repeating timer that stays paused while
/// no game is running.
#[derive(Resource)]
pub struct TickClock {
    pub timer: Timer,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        let mut timer = Timer::new(interval, TimerMode::Repeating);
        timer.pause();
        TickClock { timer }
    }

    pub fn is_running(&self) -> bool {
        !self.timer.is_paused()
    }

    /// Restarts the schedule; the first frame is due one interval from now.
    pub fn start(&mut self) {
        self.timer.reset();
        self.timer.unpause();
    }

    pub fn stop(&mut self) {
        self.timer.pause();
        self.timer.reset();
    }

    /// Adds `delta` and returns how many frames became due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta).times_finished_this_tick()
    }
}

impl Default for TickClock {
    fn default() -> Self {
        TickClock::new(FRAME_DURATION)
    }
}

/// Last board handed to the renderer.
#[derive(Resource, Default)]
pub struct BoardView(pub Option<BoardSnapshot>);

/// Main UI state resource.
#[derive(Resource, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub games_played: u32,
}

/// Game-over notices delivered by the engine listener, waiting to be
/// turned into messages.
#[derive(Resource, Clone, Default)]
pub struct GameOverInbox(Arc<Mutex<Vec<GameOverEvent>>>);

impl GameOverInbox {
    pub fn push(&self, event: GameOverEvent) {
        if let Ok(mut pending) = self.0.lock() {
            pending.push(event);
        }
    }

    pub fn drain(&self) -> Vec<GameOverEvent> {
        self.0
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }
}

/// Listener installed on the engine; forwards failures to the inbox.
pub struct GameOverRelay(pub GameOverInbox);

impl GameListener for GameOverRelay {
    fn on_fail(&mut self, reason: FailReason, score: usize) {
        self.0.push(GameOverEvent { reason, score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(250);

    #[test]
    fn stopped_clock_never_fires() {
        let mut clock = TickClock::new(FRAME);
        assert!(!clock.is_running());
        assert_eq!(clock.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut clock = TickClock::new(FRAME);
        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.advance(Duration::from_millis(100)), 0);
        assert_eq!(clock.advance(Duration::from_millis(150)), 1);
        assert_eq!(clock.advance(Duration::from_millis(249)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn catches_up_after_a_long_frame() {
        let mut clock = TickClock::new(FRAME);
        clock.start();
        assert_eq!(clock.advance(Duration::from_millis(800)), 3);
        assert_eq!(clock.advance(Duration::from_millis(200)), 1);
    }

    #[test]
    fn restart_discards_partial_frame() {
        let mut clock = TickClock::new(FRAME);
        clock.start();
        clock.advance(Duration::from_millis(200));
        clock.stop();
        assert_eq!(clock.advance(Duration::from_millis(200)), 0);
        clock.start();
        assert_eq!(clock.advance(Duration::from_millis(200)), 0);
        assert_eq!(clock.advance(Duration::from_millis(50)), 1);
    }

    #[test]
    fn relay_queues_failures_until_drained() {
        let inbox = GameOverInbox::default();
        let mut relay = GameOverRelay(inbox.clone());
        relay.on_fail(FailReason::SelfCollision, 4);

        let events = inbox.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].reason, FailReason::SelfCollision);
        assert_eq!(events[0].score, 4);
        assert!(inbox.drain().is_empty());
    }
}
