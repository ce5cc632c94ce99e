//! Set of unoccupied cells, used as the candidate pool for food.

use rand::Rng;

use super::Cell;

/// Linear cell indices not covered by the snake or the food.
///
/// `cells` holds the members in arbitrary order so a uniform pick is a single
/// index draw; `slots` maps every board index to its position in `cells`.
#[derive(Clone, Debug)]
pub struct FreeCells {
    grid_size: u32,
    cells: Vec<usize>,
    slots: Vec<Option<usize>>,
}

impl FreeCells {
    /// Every cell of the board is free.
    pub fn full(grid_size: u32) -> Self {
        let total = grid_size as usize * grid_size as usize;
        FreeCells {
            grid_size,
            cells: (0..total).collect(),
            slots: (0..total).map(Some).collect(),
        }
    }

    /// All cells except `occupied`.
    pub fn excluding<'a>(grid_size: u32, occupied: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut free = Self::full(grid_size);
        for cell in occupied {
            free.claim(*cell);
        }
        free
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.slots
            .get(cell.index(self.grid_size))
            .is_some_and(|slot| slot.is_some())
    }

    /// Marks `cell` as occupied. Returns false if it was not free.
    pub fn claim(&mut self, cell: Cell) -> bool {
        let index = cell.index(self.grid_size);
        let Some(slot) = self.slots.get_mut(index).and_then(Option::take) else {
            return false;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[moved] = Some(slot);
        }
        true
    }

    /// Marks `cell` as free again. Returns false if it already was.
    pub fn release(&mut self, cell: Cell) -> bool {
        let index = cell.index(self.grid_size);
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(self.cells.len());
        self.cells.push(index);
        true
    }

    /// Uniformly picks a free cell and claims it.
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        if self.is_empty() {
            return None;
        }
        let index = self.cells[rng.random_range(0..self.cells.len())];
        let cell = Cell::from_index(index, self.grid_size);
        self.claim(cell);
        Some(cell)
    }
}
