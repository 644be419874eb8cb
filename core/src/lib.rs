use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use notification::*;
pub use payout::*;
pub use session::*;
pub use settle::*;
pub use snapshot::*;
pub use table::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod layout;
mod notification;
mod payout;
mod session;
mod settle;
mod snapshot;
mod table;
mod tile;
mod types;

/// Smallest playable side length, anything smaller cannot hold a mine and a gem.
pub const MIN_SIDE: Coord = 2;

/// Grid side used by the reference table.
pub const DEFAULT_SIDE: Coord = 5;

/// Square grid size and the mine count a round requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, mines: CellCount) -> Self {
        Self { side, mines }
    }

    /// Clamps `side` to at least [`MIN_SIDE`] and `mines` to `[1, side² - 1]`.
    pub fn new(side: Coord, mines: CellCount) -> Self {
        let side = side.clamp(MIN_SIDE, Coord::MAX);
        let clamped = Self::clamp_mines(side, mines);
        if clamped != mines {
            log::warn!(
                "Mine count {} out of range for a {}x{} grid, clamped to {}",
                mines,
                side,
                side,
                clamped
            );
        }
        Self::new_unchecked(side, clamped)
    }

    pub fn clamp_mines(side: Coord, mines: CellCount) -> CellCount {
        mines.clamp(1, mult(side, side).saturating_sub(1).max(1))
    }

    /// Same grid, different mine count (clamped).
    pub fn with_mines(self, mines: CellCount) -> Self {
        Self::new(self.side, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        let total = self.total_cells();
        if index < total {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex { index, total })
        }
    }

    pub const fn coords_of(&self, index: CellIndex) -> Coord2 {
        index_to_coords(index, self.side)
    }

    pub const fn grid_shape(&self) -> [usize; 2] {
        [self.side as usize, self.side as usize]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIDE, 1)
    }
}
