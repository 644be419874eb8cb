use std::collections::BTreeSet;

use ndarray::Array2;
use serde::Serialize;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Placed,
    Removed,
}

/// Player-authored mine placement, edited before a round starts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    config: GameConfig,
    cells: Array2<LayoutCell>,
    placed: CellCount,
}

impl MineLayout {
    pub fn new(config: GameConfig) -> Self {
        let config = GameConfig::new(config.side, config.mines);
        Self {
            config,
            cells: Array2::default(config.grid_shape()),
            placed: 0,
        }
    }

    /// Builds a layout from mine indices; the target becomes the number of distinct mines.
    /// A round needs at least one mine, so an empty list is an incomplete layout.
    pub fn from_mine_indices(side: Coord, mines: &[CellIndex]) -> Result<Self> {
        let distinct: BTreeSet<CellIndex> = mines.iter().copied().collect();
        if distinct.is_empty() {
            return Err(GameError::IncompleteLayout {
                placed: 0,
                required: 1,
            });
        }
        let mut layout = Self::new(GameConfig::new(side, distinct.len() as CellCount));
        for index in distinct {
            layout.toggle(index)?;
        }
        Ok(layout)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn side(&self) -> Coord {
        self.config.side
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn target(&self) -> CellCount {
        self.config.mines
    }

    pub fn placed(&self) -> CellCount {
        self.placed
    }

    /// Diamonds the finished board will hold.
    pub fn gems(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<LayoutCell> {
        let index = self.config.validate_index(index)?;
        Ok(self.cells[self.config.coords_of(index).to_nd_index()])
    }

    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.cell_at(index).is_ok_and(LayoutCell::is_mine)
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.total_cells()).filter(|&index| self.contains_mine(index))
    }

    /// Flips a cell; placing beyond the target is rejected, removing is always allowed.
    pub fn toggle(&mut self, index: CellIndex) -> Result<ToggleOutcome> {
        let index = self.config.validate_index(index)?;
        let pos = self.config.coords_of(index).to_nd_index();

        match self.cells[pos] {
            LayoutCell::Mine => {
                self.cells[pos] = LayoutCell::Empty;
                self.placed -= 1;
                log::trace!("Removed mine at {}, {}/{}", index, self.placed, self.target());
                Ok(ToggleOutcome::Removed)
            }
            LayoutCell::Empty if self.placed >= self.target() => {
                log::debug!("Mine cap of {} reached, rejected {}", self.target(), index);
                Err(GameError::MineCapReached {
                    target: self.target(),
                })
            }
            LayoutCell::Empty => {
                self.cells[pos] = LayoutCell::Mine;
                self.placed += 1;
                log::trace!("Placed mine at {}, {}/{}", index, self.placed, self.target());
                Ok(ToggleOutcome::Placed)
            }
        }
    }

    /// Sets a new mine target (clamped) and clears every placed mine.
    pub fn set_target(&mut self, mines: CellCount) -> CellCount {
        self.config = self.config.with_mines(mines);
        self.clear();
        log::debug!("Mine target set to {}", self.config.mines);
        self.config.mines
    }

    pub fn clear(&mut self) {
        self.cells.fill(LayoutCell::Empty);
        self.placed = 0;
    }

    pub fn is_ready(&self) -> bool {
        self.placed == self.target()
    }

    pub fn finalize(&self) -> Result<MineSet> {
        if !self.is_ready() {
            return Err(GameError::IncompleteLayout {
                placed: self.placed,
                required: self.target(),
            });
        }

        Ok(MineSet {
            config: self.config,
            mines: self.mine_indices().collect(),
        })
    }
}

impl Default for MineLayout {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Validated, immutable mine positions of a finalized layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MineSet {
    config: GameConfig,
    mines: BTreeSet<CellIndex>,
}

impl MineSet {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.mines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.mines.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.mines.iter().copied()
    }
}
