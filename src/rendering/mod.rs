//! Rendering plugin - paints the last board snapshot every frame.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::engine::{BoardSnapshot, Cell, Orientation};
use crate::game::{
    BoardView, CELL_SIZE, CONTROLS_HEIGHT, EYE_COLOR, EYE_RADIUS, EYE_SHIFT, FOOD_COLOR,
    FOOD_INSET, GRID_COLOR, GRID_LINE_THICKNESS, RedrawEvent, SNAKE_COLOR, SnakeGame, Z_EYES,
    Z_FOOD, Z_GRID, Z_SNAKE,
};

/// Plugin for rendering.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardView>()
            .add_systems(PostUpdate, (refresh_board_view, draw_board).chain());
    }
}

/// World-space center of the board; it sits above the control strip.
fn board_origin() -> Vec2 {
    Vec2::new(0.0, CONTROLS_HEIGHT / 2.0)
}

/// World-space center of `cell`. Board rows grow downwards, world y grows upwards.
pub fn cell_center(cell: Cell, grid_size: u32) -> Vec2 {
    let half = grid_size as f32 / 2.0;
    board_origin()
        + Vec2::new(
            (cell.x as f32 - half + 0.5) * CELL_SIZE,
            (half - cell.y as f32 - 0.5) * CELL_SIZE,
        )
}

/// Eye offsets from the head center: side by side when moving vertically,
/// stacked when moving horizontally.
pub fn eye_offsets(orientation: Orientation) -> [Vec2; 2] {
    match orientation {
        Orientation::Vertical => [Vec2::new(-EYE_SHIFT, 0.0), Vec2::new(EYE_SHIFT, 0.0)],
        Orientation::Horizontal => [Vec2::new(0.0, -EYE_SHIFT), Vec2::new(0.0, EYE_SHIFT)],
    }
}

/// System to take a fresh snapshot whenever the board was redrawn.
fn refresh_board_view(
    mut redraw_reader: MessageReader<RedrawEvent>,
    game: Res<SnakeGame>,
    mut view: ResMut<BoardView>,
) {
    if redraw_reader.read().last().is_some() {
        view.0 = Some(game.snapshot());
    }
}

/// System to paint grid, snake, eyes and food.
fn draw_board(mut painter: ShapePainter, view: Res<BoardView>) {
    let Some(board) = view.0.as_ref() else {
        return;
    };

    draw_grid(&mut painter, board.grid_size);
    draw_snake(&mut painter, board);
    if let Some(food) = board.food {
        painter.reset();
        painter.color = FOOD_COLOR;
        painter.transform =
            Transform::from_translation(cell_center(food, board.grid_size).extend(Z_FOOD));
        painter.rect(Vec2::splat(CELL_SIZE - FOOD_INSET * 2.0));
    }
}

fn draw_grid(painter: &mut ShapePainter, grid_size: u32) {
    painter.reset();
    painter.color = GRID_COLOR;
    painter.thickness = GRID_LINE_THICKNESS;

    let extent = grid_size as f32 * CELL_SIZE;
    let origin = board_origin();
    let left = origin.x - extent / 2.0;
    let top = origin.y + extent / 2.0;
    for i in 0..=grid_size {
        let offset = i as f32 * CELL_SIZE;
        painter.line(
            Vec3::new(left, top - offset, Z_GRID),
            Vec3::new(left + extent, top - offset, Z_GRID),
        );
        painter.line(
            Vec3::new(left + offset, top, Z_GRID),
            Vec3::new(left + offset, top - extent, Z_GRID),
        );
    }
}

fn draw_snake(painter: &mut ShapePainter, board: &BoardSnapshot) {
    painter.reset();
    painter.color = SNAKE_COLOR;
    for part in &board.snake {
        painter.transform =
            Transform::from_translation(cell_center(*part, board.grid_size).extend(Z_SNAKE));
        painter.rect(Vec2::splat(CELL_SIZE));
    }

    let Some(head) = board.head() else {
        return;
    };
    let center = cell_center(head, board.grid_size);
    painter.color = EYE_COLOR;
    for offset in eye_offsets(board.orientation()) {
        painter.transform = Transform::from_translation((center + offset).extend(Z_EYES));
        painter.circle(EYE_RADIUS);
    }
}
