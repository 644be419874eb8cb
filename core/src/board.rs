use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Board in play, derived from a finalized layout and immutable for the round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<BoardCell>,
}

impl Board {
    pub fn new(mines: &MineSet) -> Self {
        let config = mines.config();
        let mut cells: Array2<BoardCell> = Array2::default(config.grid_shape());
        for index in mines.iter() {
            cells[config.coords_of(index).to_nd_index()] = BoardCell::Mine;
        }
        Self { config, cells }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn safe_cells(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<BoardCell> {
        let index = self.config.validate_index(index)?;
        Ok(self.cells[self.config.coords_of(index).to_nd_index()])
    }
}

/// Cells uncovered so far, in reveal order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealState {
    side: Coord,
    order: Vec<CellIndex>,
    mask: Array2<bool>,
    safe_count: CellCount,
}

impl RevealState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            side: config.side,
            order: Vec::new(),
            mask: Array2::default(config.grid_shape()),
            safe_count: 0,
        }
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.mask
            .get(index_to_coords(index, self.side).to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Marks `index` revealed, false if it already was.
    pub fn insert(&mut self, index: CellIndex, cell: BoardCell) -> bool {
        let pos = index_to_coords(index, self.side).to_nd_index();
        if self.mask[pos] {
            return false;
        }
        self.mask[pos] = true;
        self.order.push(index);
        if !cell.is_mine() {
            self.safe_count += 1;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn safe_count(&self) -> CellCount {
        self.safe_count
    }

    pub fn last(&self) -> Option<CellIndex> {
        self.order.last().copied()
    }

    pub fn order(&self) -> &[CellIndex] {
        &self.order
    }

    /// Indices not revealed yet, ascending.
    pub fn unrevealed(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..mult(self.side, self.side)).filter(|&index| !self.contains(index))
    }
}
