use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Active
/// - Active -> Lost
/// - Active -> Won
/// - Active -> CashedOut
/// - Lost | Won | CashedOut -> Active
/// - any -> Idle (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round, layout still being edited
    Idle,
    /// No round, layout complete and waiting for a stake. Only reported by snapshots.
    AwaitingBet,
    /// Round running, reveals and cashout accepted
    Active,
    /// Round ended on a mine, stake forfeit
    Lost,
    /// Every safe cell uncovered, settled automatically
    Won,
    /// Player took the profit before hitting a mine
    CashedOut,
}

impl Phase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Indicates the round has ended and no moves can be made anymore
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won | Self::CashedOut)
    }

    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Won | Self::CashedOut)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Diamond,
    HitMine,
    FullClear,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the session
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Final figures of a won or cashed out round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub bet: Bet,
    pub multiplier: f64,
    pub profit: f64,
    pub revealed_safe: CellCount,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct Round {
    board: Board,
    reveals: RevealState,
    bet: Bet,
}

/// One player's round state machine, owns the board and reveals of the current round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    payout: PayoutTable,
    phase: Phase,
    round: Option<Round>,
    multiplier: f64,
    profit: f64,
    settlement: Option<Settlement>,
}

impl GameSession {
    /// Falls back to the default rates when `payout` fails validation.
    pub fn new(payout: PayoutTable) -> Self {
        let payout = match payout.validate() {
            Ok(()) => payout,
            Err(error) => {
                log::warn!("{}, using default payout table", error);
                PayoutTable::default()
            }
        };
        let multiplier = payout.starting_multiplier();
        Self {
            payout,
            phase: Phase::Idle,
            round: None,
            multiplier,
            profit: 0.0,
            settlement: None,
        }
    }

    pub fn payout(&self) -> &PayoutTable {
        &self.payout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn bet(&self) -> Option<Bet> {
        self.round.as_ref().map(|round| round.bet)
    }

    pub fn config(&self) -> Option<GameConfig> {
        self.round.as_ref().map(|round| round.board.config())
    }

    pub fn revealed(&self) -> &[CellIndex] {
        self.round
            .as_ref()
            .map(|round| round.reveals.order())
            .unwrap_or_default()
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.round
            .as_ref()
            .map(|round| round.reveals.safe_count())
            .unwrap_or(0)
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.round
            .as_ref()
            .is_some_and(|round| round.reveals.contains(index))
    }

    /// Mine that ended the round, only known once lost.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        match (self.phase, &self.round) {
            (Phase::Lost, Some(round)) => round.reveals.last(),
            _ => None,
        }
    }

    pub fn settlement(&self) -> Option<Settlement> {
        self.settlement
    }

    /// Starts a round from a complete layout, replacing whatever round came before.
    pub fn start_round(&mut self, layout: &MineLayout, bet: f64) -> Result<()> {
        let bet = Bet::new(bet)?;
        let mines = layout
            .finalize()
            .map_err(|_| GameError::LayoutNotReady {
                placed: layout.placed(),
                required: layout.target(),
            })?;
        if self.phase.is_active() {
            return Err(GameError::RoundInProgress);
        }

        let board = Board::new(&mines);
        let reveals = RevealState::new(board.config());
        self.round = Some(Round {
            board,
            reveals,
            bet,
        });
        self.phase = Phase::Active;
        self.multiplier = self.payout.starting_multiplier();
        self.profit = 0.0;
        self.settlement = None;
        log::debug!(
            "Round started, bet {}, {} mines, multiplier {:.2}",
            bet,
            mines.len(),
            self.multiplier
        );
        Ok(())
    }

    /// Uncovers a cell. Repeated or out-of-round reveals are ignored.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        if !self.phase.is_active() {
            log::trace!("Ignored reveal of {} while {:?}", index, self.phase);
            return Ok(RevealOutcome::NoChange);
        }
        let Some(round) = self.round.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };

        let cell = round.board.cell_at(index)?;
        if !round.reveals.insert(index, cell) {
            log::trace!("Cell {} already revealed", index);
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine() {
            self.phase = Phase::Lost;
            log::debug!("Hit mine at {}, round lost", index);
            return Ok(RevealOutcome::HitMine);
        }

        let config = round.board.config();
        let revealed_safe = round.reveals.safe_count();
        self.multiplier = self.payout.multiplier_after(config, revealed_safe);
        self.profit = profit_from(round.bet, self.multiplier);
        log::debug!(
            "Diamond at {}, multiplier {:.2}, profit {:.2}",
            index,
            self.multiplier,
            self.profit
        );

        if revealed_safe == config.safe_cells() {
            self.phase = Phase::Won;
            self.settlement = Some(Settlement {
                bet: round.bet,
                multiplier: self.multiplier,
                profit: self.profit,
                revealed_safe,
            });
            log::debug!("Board cleared, settled {:.2}", self.profit);
            Ok(RevealOutcome::FullClear)
        } else {
            Ok(RevealOutcome::Diamond)
        }
    }

    /// Reveals a uniformly chosen cell among the ones still covered.
    pub fn reveal_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RevealOutcome> {
        if !self.phase.is_active() {
            return Ok(RevealOutcome::NoChange);
        }
        let Some(round) = self.round.as_ref() else {
            return Ok(RevealOutcome::NoChange);
        };

        let candidates: Vec<CellIndex> = round.reveals.unrevealed().collect();
        if candidates.is_empty() {
            return Ok(RevealOutcome::NoChange);
        }
        let index = candidates[rng.random_range(0..candidates.len())];
        log::trace!("Random pick {} of {} covered cells", index, candidates.len());
        self.reveal(index)
    }

    /// Locks in the profit at the current multiplier.
    pub fn cashout(&mut self) -> Result<Settlement> {
        if !self.phase.is_active() {
            return Err(GameError::NotActive);
        }
        let Some(round) = self.round.as_ref() else {
            return Err(GameError::NotActive);
        };

        let revealed_safe = round.reveals.safe_count();
        let required = self.payout.min_reveals_for_cashout;
        if revealed_safe < required {
            return Err(GameError::CashoutTooEarly {
                revealed: revealed_safe,
                required,
            });
        }

        self.profit = profit_from(round.bet, self.multiplier);
        let settlement = Settlement {
            bet: round.bet,
            multiplier: self.multiplier,
            profit: self.profit,
            revealed_safe,
        };
        self.phase = Phase::CashedOut;
        self.settlement = Some(settlement);
        log::debug!(
            "Cashed out at {:.2}x, profit {:.2}",
            settlement.multiplier,
            settlement.profit
        );
        Ok(settlement)
    }

    /// Discards the round and returns to `Idle`.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.round = None;
        self.multiplier = self.payout.starting_multiplier();
        self.profit = 0.0;
        self.settlement = None;
        log::debug!("Session reset");
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(PayoutTable::default())
    }
}
