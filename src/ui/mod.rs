//! UI plugin - camera, on-screen controls, score, and the game over / restart flow.

use bevy::prelude::*;

use crate::engine::{Direction, FailReason};
use crate::game::{
    BUTTON_COLOR, BUTTON_PRESSED_COLOR, BUTTON_SIZE, CONTROLS_HEIGHT, DirectionButton,
    GameOverEvent, GamePhase, GameState, InfoText, RestartButton, RestartEvent, ScoreText,
    SnakeGame,
};

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                show_game_over,
                restart_input,
                button_feedback,
                update_score_text,
            )
                .chain(),
        );
    }
}

type ButtonColorQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Interaction, &'static mut BackgroundColor),
    (Changed<Interaction>, With<Button>),
>;

fn game_over_message(reason: FailReason, score: usize) -> String {
    let headline = match reason {
        FailReason::SelfCollision => "Game over",
        FailReason::BoardFull => "Board full!",
    };
    format!("{headline}\nScore: {score}")
}

/// Initial setup system - camera, score text, hidden game over UI, controls.
fn setup_system(mut commands: Commands) {
    commands.spawn(Camera2d);

    commands.spawn((
        Text::from("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(CONTROLS_HEIGHT - 30.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));

    // Game over overlay, hidden until the engine reports a failure
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Px(0.0),
                bottom: Val::Px(CONTROLS_HEIGHT),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from(""),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 0.3, 0.3, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
                Visibility::Hidden,
                InfoText,
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(BUTTON_SIZE * 2.5),
                        height: Val::Px(BUTTON_SIZE),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_COLOR),
                    Visibility::Hidden,
                    RestartButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::from("More"),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });

    spawn_controls(&mut commands);
}

/// Spawns the arrow pad under the board.
fn spawn_controls(commands: &mut Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Px(CONTROLS_HEIGHT),
            bottom: Val::Px(0.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|pad| {
            let rows: [&[(Direction, &str)]; 3] = [
                &[(Direction::Up, "^")],
                &[(Direction::Left, "<"), (Direction::Right, ">")],
                &[(Direction::Down, "v")],
            ];
            for row in rows {
                pad.spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(BUTTON_SIZE),
                    ..default()
                })
                .with_children(|line| {
                    for &(direction, label) in row {
                        spawn_direction_button(line, direction, label);
                    }
                });
            }
        });
}

fn spawn_direction_button(parent: &mut ChildSpawnerCommands, direction: Direction, label: &str) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(BUTTON_SIZE),
                height: Val::Px(BUTTON_SIZE),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            DirectionButton(direction),
        ))
        .with_children(|button| {
            button.spawn((
                Text::from(label),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// System to surface the game over affordance when the engine fails.
fn show_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut game_state: ResMut<GameState>,
    mut info: Query<(&mut Text, &mut Visibility), With<InfoText>>,
    mut restart_button: Query<&mut Visibility, (With<RestartButton>, Without<InfoText>)>,
) {
    let Some(event) = game_over_reader.read().last() else {
        return;
    };

    game_state.phase = GamePhase::GameOver;

    if let Ok((mut text, mut visibility)) = info.single_mut() {
        *text = Text::from(game_over_message(event.reason, event.score));
        *visibility = Visibility::Inherited;
    }
    if let Ok(mut visibility) = restart_button.single_mut() {
        *visibility = Visibility::Inherited;
    }
}

/// System to restart from the "More" button or the space bar.
fn restart_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    game_state: Res<GameState>,
    restart_button: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut restart_writer: MessageWriter<RestartEvent>,
    mut hidden: Query<&mut Visibility, Or<(With<InfoText>, With<RestartButton>)>>,
) {
    if game_state.phase != GamePhase::GameOver {
        return;
    }

    let clicked = restart_button
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);
    if clicked || keyboard_input.just_pressed(KeyCode::Space) {
        for mut visibility in hidden.iter_mut() {
            *visibility = Visibility::Hidden;
        }
        restart_writer.write(RestartEvent);
    }
}

/// System to tint buttons while they are held.
fn button_feedback(mut buttons: ButtonColorQuery) {
    for (interaction, mut color) in buttons.iter_mut() {
        *color = match interaction {
            Interaction::Pressed => BackgroundColor(BUTTON_PRESSED_COLOR),
            _ => BackgroundColor(BUTTON_COLOR),
        };
    }
}

/// System to update the score display.
fn update_score_text(game: Res<SnakeGame>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !game.is_changed() {
        return;
    }
    if let Ok(mut text) = query.single_mut() {
        *text = Text::from(format!("Score: {}", game.score()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_message_names_reason_and_score() {
        assert_eq!(
            game_over_message(FailReason::SelfCollision, 3),
            "Game over\nScore: 3"
        );
        assert!(game_over_message(FailReason::BoardFull, 95).starts_with("Board full!"));
    }
}
