use serde::{Deserialize, Serialize};

/// Cell of the mine editor grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutCell {
    Empty,
    Mine,
}

impl LayoutCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Empty => Self::Mine,
            Self::Mine => Self::Empty,
        }
    }
}

impl Default for LayoutCell {
    fn default() -> Self {
        Self::Empty
    }
}

/// Cell of a board in play, fixed for the whole round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Diamond,
    Mine,
}

impl BoardCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Diamond
    }
}

/// What the player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Diamond,
    Mine,
}

impl CellView {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}
