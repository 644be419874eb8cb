use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub game: GameConfig,
    pub payout: PayoutTable,
    pub settle_delay_ms: u64,
    /// Fixed seed for random picks and layouts, OS entropy when unset
    pub seed: Option<u64>,
}

impl TableConfig {
    /// Parses a config and rejects payout settings that break the multiplier rules.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config
            .payout
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(config)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            payout: PayoutTable::default(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            seed: None,
        }
    }
}

/// Command surface for a presentation layer: the mine editor, one session, and the
/// settlement window that follows a win or cashout.
#[derive(Clone, Debug)]
pub struct Table {
    layout: MineLayout,
    session: GameSession,
    rng: SmallRng,
    settle_delay: Duration,
    settlement: Option<SettlementTimer>,
    outbox: VecDeque<Notification>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            layout: MineLayout::new(config.game),
            session: GameSession::new(config.payout.clone()),
            rng,
            settle_delay: config.settle_delay(),
            settlement: None,
            outbox: VecDeque::new(),
        }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.snapshot().phase
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(&self.session, &self.layout)
    }

    pub fn layout_snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::from_layout(&self.layout, self.is_editable())
    }

    pub fn pending_settlement(&self) -> Option<SettlementTimer> {
        self.settlement
    }

    pub fn is_editable(&self) -> bool {
        !self.session.phase().is_active()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain(..).collect()
    }

    pub fn set_mine_target(&mut self, mines: CellCount) -> Result<CellCount> {
        let result = self
            .check_editable()
            .map(|()| self.layout.set_target(mines));
        self.record(result)
    }

    pub fn toggle_mine(&mut self, index: CellIndex) -> Result<ToggleOutcome> {
        let result = self
            .check_editable()
            .and_then(|()| self.layout.toggle(index));
        self.record(result)
    }

    /// Fills the editor with a random layout for the current target.
    pub fn randomize_layout(&mut self) -> Result<()> {
        let seed = self.rng.random();
        let result = self
            .check_editable()
            .and_then(|()| RandomLayoutGenerator::new(seed).generate(&mut self.layout));
        self.record(result)
    }

    pub fn start_round(&mut self, bet: &str) -> Result<()> {
        let result = Bet::parse(bet).and_then(|bet| {
            self.session
                .start_round(&self.layout, bet.amount())
                .map(|()| bet)
        });
        let bet = self.record(result)?;

        self.cancel_settlement();
        self.notify(Notification::BetPlaced { bet: bet.amount() });
        Ok(())
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let result = self.session.reveal(index);
        let outcome = self.record(result)?;
        self.after_reveal(outcome);
        Ok(outcome)
    }

    pub fn reveal_random(&mut self) -> Result<RevealOutcome> {
        let result = self.session.reveal_random(&mut self.rng);
        let outcome = self.record(result)?;
        self.after_reveal(outcome);
        Ok(outcome)
    }

    pub fn cashout(&mut self) -> Result<Settlement> {
        let result = self.session.cashout();
        let settlement = self.record(result)?;
        self.arm_settlement();
        self.notify(Notification::CashedOut {
            amount: settlement.profit,
        });
        Ok(settlement)
    }

    /// Resets to `Idle` once the settlement window has passed, true if it did.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.settlement {
            Some(timer) if timer.is_due(now) => {
                self.settlement = None;
                self.session.reset();
                log::debug!("Settlement window over");
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn cancel_settlement(&mut self) {
        if self.settlement.take().is_some() {
            log::trace!("Settlement window cancelled");
        }
    }

    fn after_reveal(&mut self, outcome: RevealOutcome) {
        match outcome {
            RevealOutcome::HitMine => self.notify(Notification::RoundLost),
            RevealOutcome::FullClear => {
                self.arm_settlement();
                self.notify(Notification::RoundWon {
                    profit: self.session.profit(),
                });
            }
            RevealOutcome::Diamond | RevealOutcome::NoChange => {}
        }
    }

    fn arm_settlement(&mut self) {
        self.settlement = Some(SettlementTimer::new(Instant::now(), self.settle_delay));
    }

    fn check_editable(&self) -> Result<()> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(GameError::RoundInProgress)
        }
    }

    fn notify(&mut self, notification: Notification) {
        log::debug!("{}", notification);
        self.outbox.push_back(notification);
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            log::debug!("Rejected: {}", error);
            if let Some(notification) = Notification::from_error(*error) {
                self.outbox.push_back(notification);
            }
        }
        result
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}
