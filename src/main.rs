use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

use gridsnake::game::{BACKGROUND_COLOR, CELL_SIZE, CONTROLS_HEIGHT, GRID_SIZE};
use gridsnake::rendering::RenderingPlugin;
use gridsnake::snake::SnakePlugin;
use gridsnake::ui::UiPlugin;

fn main() {
    let board_size = GRID_SIZE as f32 * CELL_SIZE;

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(
                        board_size as u32,
                        (board_size + CONTROLS_HEIGHT) as u32,
                    ),
                    title: "Snake".to_string(),
                    ..default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_plugins((SnakePlugin::default(), RenderingPlugin, UiPlugin))
        .run();
}
