use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index {index}, grid has {total} cells")]
    InvalidIndex { index: CellIndex, total: CellCount },
    #[error("Bet must be a number greater than zero")]
    InvalidBet,
    #[error("Layout incomplete, {placed} of {required} mines placed")]
    IncompleteLayout { placed: CellCount, required: CellCount },
    #[error("Layout not ready, place exactly {required} mines ({placed} placed)")]
    LayoutNotReady { placed: CellCount, required: CellCount },
    #[error("All {target} mines already placed")]
    MineCapReached { target: CellCount },
    #[error("A round is in progress")]
    RoundInProgress,
    #[error("No active round")]
    NotActive,
    #[error("Reveal at least {required} tile(s) before cashing out ({revealed} revealed)")]
    CashoutTooEarly { revealed: CellCount, required: CellCount },
    #[error("Invalid payout setting {field}, must be a finite number of at least zero")]
    InvalidPayout { field: &'static str },
}

pub type Result<T> = core::result::Result<T, GameError>;
