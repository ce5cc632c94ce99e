//! Snake plugin - feeds input and ticks into the engine and reports what happened.

use bevy::prelude::*;

use crate::engine::{Direction, EngineConfig, GameEngine, TickOutcome};
use crate::game::{
    DirectionButton, GameOverEvent, GameOverInbox, GameOverRelay, GamePhase, GameState,
    RedrawEvent, RestartEvent, SnakeGame, TickClock,
};

/// Plugin for snake-related systems. Owns the engine and its tick clock.
#[derive(Default)]
pub struct SnakePlugin {
    pub config: EngineConfig,
}

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        let inbox = GameOverInbox::default();
        let mut engine = GameEngine::new(self.config);
        engine.set_listener(Box::new(GameOverRelay(inbox.clone())));

        app.insert_resource(SnakeGame(engine))
            .insert_resource(inbox)
            .init_resource::<TickClock>()
            .init_resource::<GameState>()
            .add_message::<RedrawEvent>()
            .add_message::<GameOverEvent>()
            .add_message::<RestartEvent>()
            .add_systems(Startup, start_first_game)
            .add_systems(
                Update,
                (
                    keyboard_direction_input,
                    button_direction_input,
                    advance_game,
                    relay_game_over,
                    restart_game,
                )
                    .chain(),
            )
            .add_systems(Last, finish_on_exit);
    }
}

/// Maps arrow keys and WASD to directions.
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
        _ => None,
    }
}

/// Resets the board and (re)starts the tick schedule.
fn begin_game(
    game: &mut SnakeGame,
    clock: &mut TickClock,
    game_state: &mut GameState,
    redraw_writer: &mut MessageWriter<RedrawEvent>,
) {
    game.start();
    clock.start();
    game_state.phase = GamePhase::Playing;
    game_state.games_played += 1;
    redraw_writer.write(RedrawEvent);
}

/// The game starts as soon as the window is up.
fn start_first_game(
    mut game: ResMut<SnakeGame>,
    mut clock: ResMut<TickClock>,
    mut game_state: ResMut<GameState>,
    mut redraw_writer: MessageWriter<RedrawEvent>,
) {
    begin_game(&mut game, &mut clock, &mut game_state, &mut redraw_writer);
}

/// System to read keyboard input and forward direction changes.
fn keyboard_direction_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game: ResMut<SnakeGame>,
) {
    for direction in keyboard_input
        .get_just_pressed()
        .filter_map(|key| direction_for_key(*key))
    {
        game.set_direction(direction);
    }
}

/// System to forward presses of the on-screen arrows.
fn button_direction_input(
    buttons: Query<(&Interaction, &DirectionButton), Changed<Interaction>>,
    mut game: ResMut<SnakeGame>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            game.set_direction(button.0);
        }
    }
}

/// System to run every engine tick that became due this frame.
fn advance_game(
    time: Res<Time>,
    mut clock: ResMut<TickClock>,
    mut game: ResMut<SnakeGame>,
    mut redraw_writer: MessageWriter<RedrawEvent>,
) {
    let frames = clock.advance(time.delta());
    for _ in 0..frames {
        let outcome = game.tick();
        if outcome.needs_redraw() {
            redraw_writer.write(RedrawEvent);
        }
        if let TickOutcome::Failed(_) = outcome {
            break;
        }
    }
}

/// System to act on the listener's game-over notices: halt the tick
/// source and tell the UI.
fn relay_game_over(
    inbox: Res<GameOverInbox>,
    mut clock: ResMut<TickClock>,
    mut game_state: ResMut<GameState>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    for event in inbox.drain() {
        clock.stop();
        game_state.phase = GamePhase::GameOver;
        game_over_writer.write(event);
    }
}

/// System to start a new game when the UI asks for one.
fn restart_game(
    mut restart_reader: MessageReader<RestartEvent>,
    mut game: ResMut<SnakeGame>,
    mut clock: ResMut<TickClock>,
    mut game_state: ResMut<GameState>,
    mut redraw_writer: MessageWriter<RedrawEvent>,
) {
    if restart_reader.read().last().is_some() {
        info!("Restarting game #{}", game_state.games_played + 1);
        begin_game(&mut game, &mut clock, &mut game_state, &mut redraw_writer);
    }
}

fn finish_on_exit(mut exit_reader: MessageReader<AppExit>, mut game: ResMut<SnakeGame>) {
    if exit_reader.read().next().is_some() {
        debug!("Detaching game listener");
        game.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, FailReason, Phase};
    use crate::game::{FRAME_DURATION, GRID_SIZE, INITIAL_SNAKE_LENGTH};
    use bevy::time::TimeUpdateStrategy;

    #[derive(Resource, Default)]
    struct Seen {
        redraws: usize,
        game_overs: Vec<GameOverEvent>,
    }

    fn count_messages(
        mut redraw_reader: MessageReader<RedrawEvent>,
        mut game_over_reader: MessageReader<GameOverEvent>,
        mut seen: ResMut<Seen>,
    ) {
        seen.redraws += redraw_reader.read().count();
        seen.game_overs.extend(game_over_reader.read().copied());
    }

    fn test_app() -> App {
        let config = EngineConfig::new(GRID_SIZE, INITIAL_SNAKE_LENGTH).expect("valid config");
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME_DURATION))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(SnakePlugin { config })
            .init_resource::<Seen>()
            .add_systems(PostUpdate, count_messages);
        app.update();
        app
    }

    fn snake(app: &App) -> Vec<Cell> {
        app.world().resource::<SnakeGame>().snake().copied().collect()
    }

    /// Runs frames until the engine has ticked once (or stopped running).
    fn step(app: &mut App, direction: Direction) {
        app.world_mut()
            .resource_mut::<SnakeGame>()
            .set_direction(direction);
        let before = snake(app);
        for _ in 0..8 {
            app.update();
            let game = app.world().resource::<SnakeGame>();
            if game.phase() != Phase::Running || snake(app) != before {
                return;
            }
        }
        panic!("engine did not tick");
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::ArrowLeft), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::KeyW), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::KeyD), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::ArrowDown), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Space), None);
    }

    #[test]
    fn game_starts_on_launch_and_ticks() {
        let mut app = test_app();
        assert_eq!(app.world().resource::<GameState>().games_played, 1);
        assert!(app.world().resource::<TickClock>().is_running());
        assert!(app.world().resource::<Seen>().redraws >= 1);

        let head_before = snake(&app)[0];
        step(&mut app, Direction::Down);
        assert_eq!(snake(&app)[0], head_before.step(Direction::Down, GRID_SIZE));
    }

    #[test]
    fn self_collision_stops_clock_and_restart_reseeds() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<SnakeGame>()
            .place_food(Cell::new(9, 9));

        step(&mut app, Direction::Down);
        step(&mut app, Direction::Left);
        let before_fatal_move = snake(&app);
        let redraws_before = app.world().resource::<Seen>().redraws;

        step(&mut app, Direction::Up);
        assert_eq!(
            app.world().resource::<SnakeGame>().phase(),
            Phase::Failed
        );
        assert!(!app.world().resource::<TickClock>().is_running());
        assert_eq!(app.world().resource::<GameState>().phase, GamePhase::GameOver);
        assert_eq!(snake(&app), before_fatal_move);

        // A few idle frames: nothing moves, nothing is redrawn, one game over.
        for _ in 0..4 {
            app.update();
        }
        let seen = app.world().resource::<Seen>();
        assert_eq!(seen.redraws, redraws_before);
        assert_eq!(seen.game_overs.len(), 1);
        assert_eq!(seen.game_overs[0].reason, FailReason::SelfCollision);
        assert_eq!(snake(&app), before_fatal_move);

        app.world_mut().write_message(RestartEvent);
        app.update();

        let canonical: Vec<Cell> = (0..INITIAL_SNAKE_LENGTH)
            .rev()
            .map(|x| Cell::new(x, 0))
            .collect();
        assert_eq!(snake(&app), canonical);
        let game = app.world().resource::<SnakeGame>();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.committed_direction(), Direction::Right);
        let food = game.food().expect("food placed on restart");
        assert!(!canonical.contains(&food));
        assert!(app.world().resource::<TickClock>().is_running());
        assert_eq!(app.world().resource::<GameState>().games_played, 2);
        assert_eq!(app.world().resource::<GameState>().phase, GamePhase::Playing);
        assert_eq!(app.world().resource::<Seen>().redraws, redraws_before + 1);

        step(&mut app, Direction::Right);
        assert_eq!(snake(&app)[0], Cell::new(INITIAL_SNAKE_LENGTH, 0));
    }

    #[test]
    fn finish_silences_game_over_notices() {
        let mut app = test_app();
        app.world_mut().resource_mut::<SnakeGame>().finish();
        app.world_mut()
            .resource_mut::<SnakeGame>()
            .place_food(Cell::new(9, 9));

        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            step(&mut app, direction);
        }
        app.update();
        assert_eq!(
            app.world().resource::<SnakeGame>().phase(),
            Phase::Failed
        );
        assert!(app.world().resource::<Seen>().game_overs.is_empty());
        assert_eq!(app.world().resource::<GameState>().phase, GamePhase::Playing);
    }
}
