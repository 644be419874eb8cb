use std::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// User feedback produced by table commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    InvalidBet,
    LayoutIncomplete { placed: CellCount, required: CellCount },
    MineCapReached { target: CellCount },
    RoundInProgress,
    CashoutTooEarly { revealed: CellCount, required: CellCount },
    BetPlaced { bet: f64 },
    RoundLost,
    RoundWon { profit: f64 },
    CashedOut { amount: f64 },
}

impl Notification {
    /// Rejections render as errors, the rest as regular messages.
    pub const fn is_error(&self) -> bool {
        use Notification::*;
        match self {
            InvalidBet => true,
            LayoutIncomplete { .. } => true,
            MineCapReached { .. } => true,
            RoundInProgress => true,
            CashoutTooEarly { .. } => true,
            BetPlaced { .. } => false,
            RoundLost => true,
            RoundWon { .. } => false,
            CashedOut { .. } => false,
        }
    }

    pub fn title(&self) -> &'static str {
        use Notification::*;
        match self {
            InvalidBet => "Invalid Bet",
            LayoutIncomplete { placed: 0, .. } => "No Mines Placed",
            LayoutIncomplete { .. } => "Incorrect Mine Count",
            MineCapReached { .. } => "Maximum mines reached",
            RoundInProgress => "Round in progress",
            CashoutTooEarly { .. } => "Too early",
            BetPlaced { .. } => "Bet Placed",
            RoundLost => "Game Over!",
            RoundWon { .. } => "Board Cleared!",
            CashedOut { .. } => "Cashout Successful!",
        }
    }

    /// Maps a rejected command to its feedback, `None` for errors the player can't cause.
    pub fn from_error(error: GameError) -> Option<Self> {
        Some(match error {
            GameError::InvalidBet => Self::InvalidBet,
            GameError::IncompleteLayout { placed, required }
            | GameError::LayoutNotReady { placed, required } => {
                Self::LayoutIncomplete { placed, required }
            }
            GameError::MineCapReached { target } => Self::MineCapReached { target },
            GameError::RoundInProgress => Self::RoundInProgress,
            GameError::CashoutTooEarly { revealed, required } => {
                Self::CashoutTooEarly { revealed, required }
            }
            GameError::InvalidIndex { .. }
            | GameError::NotActive
            | GameError::InvalidPayout { .. } => return None,
        })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Notification::*;
        write!(f, "{}: ", self.title())?;
        match self {
            InvalidBet => write!(f, "Please enter a valid bet amount greater than zero."),
            LayoutIncomplete { placed: 0, .. } => {
                write!(f, "Please place mines on the grid before starting the game.")
            }
            LayoutIncomplete { placed, required } => write!(
                f,
                "Please place exactly {} mines before starting the game ({} placed).",
                required, placed
            ),
            MineCapReached { target } => write!(
                f,
                "All {} mines are placed, remove a mine before placing a new one.",
                target
            ),
            RoundInProgress => write!(f, "Finish the current round first."),
            CashoutTooEarly { required, .. } => write!(
                f,
                "Reveal at least {} tile(s) before cashing out.",
                required
            ),
            BetPlaced { bet } => write!(f, "Game started with a bet of {:.2} coins.", bet),
            RoundLost => write!(f, "You hit a mine. Better luck next time!"),
            RoundWon { profit } => write!(f, "Every gem found, you won {:.2} coins!", profit),
            CashedOut { amount } => write!(f, "You won {:.2} coins!", amount),
        }
    }
}
