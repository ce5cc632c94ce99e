//! Grid cells and movement directions.

/// One square of the board. `y` grows downwards, so `Up` decreases it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub const fn new(x: u32, y: u32) -> Self {
        Cell { x, y }
    }

    /// Rebuilds a cell from its linear index on a board of side `grid_size`.
    pub fn from_index(index: usize, grid_size: u32) -> Self {
        let side = grid_size as usize;
        Cell {
            x: (index % side) as u32,
            y: (index / side) as u32,
        }
    }

    /// Linear index `y * N + x`.
    pub fn index(&self, grid_size: u32) -> usize {
        self.y as usize * grid_size as usize + self.x as usize
    }

    /// Moves one cell in `direction`, wrapping around the board edges.
    pub fn step(&self, direction: Direction, grid_size: u32) -> Self {
        match direction {
            Direction::Left => Cell {
                x: if self.x == 0 { grid_size - 1 } else { self.x - 1 },
                y: self.y,
            },
            Direction::Right => Cell {
                x: if self.x + 1 >= grid_size { 0 } else { self.x + 1 },
                y: self.y,
            },
            Direction::Up => Cell {
                x: self.x,
                y: if self.y == 0 { grid_size - 1 } else { self.y - 1 },
            },
            Direction::Down => Cell {
                x: self.x,
                y: if self.y + 1 >= grid_size { 0 } else { self.y + 1 },
            },
        }
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum Direction {
    Left,
    Up,
    #[default]
    Right,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn orientation(&self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }
}

/// Movement axis of the head, used to place the eyes.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: u32 = 10;

    #[test]
    fn wraps_on_every_edge() {
        assert_eq!(Cell::new(9, 3).step(Direction::Right, N), Cell::new(0, 3));
        assert_eq!(Cell::new(0, 3).step(Direction::Left, N), Cell::new(9, 3));
        assert_eq!(Cell::new(5, 0).step(Direction::Up, N), Cell::new(5, 9));
        assert_eq!(Cell::new(5, 9).step(Direction::Down, N), Cell::new(5, 0));
    }

    #[test]
    fn steps_inside_the_board() {
        let cell = Cell::new(4, 4);
        assert_eq!(cell.step(Direction::Right, N), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Left, N), Cell::new(3, 4));
        assert_eq!(cell.step(Direction::Up, N), Cell::new(4, 3));
        assert_eq!(cell.step(Direction::Down, N), Cell::new(4, 5));
    }

    #[test]
    fn linear_index_matches_row_major_layout() {
        let cell = Cell::new(7, 2);
        assert_eq!(cell.index(N), 27);
        assert_eq!(Cell::from_index(27, N), cell);
        assert_eq!(Cell::from_index(0, N), Cell::new(0, 0));
        assert_eq!(Cell::from_index(99, N), Cell::new(9, 9));
    }

    #[test]
    fn opposite_and_orientation() {
        for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.orientation(), direction.opposite().orientation());
        }
        assert_eq!(Direction::Up.orientation(), Orientation::Vertical);
        assert_eq!(Direction::Left.orientation(), Orientation::Horizontal);
    }
}
