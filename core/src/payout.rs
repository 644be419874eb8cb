use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Premium over 1x applied as soon as a round starts.
pub const DEFAULT_START_BONUS: f64 = 0.08;

/// Multiplier gained per safe reveal on the reference table.
pub const DEFAULT_STEP: f64 = 0.2;

/// A positive, finite stake.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bet(f64);

impl Bet {
    pub fn new(amount: f64) -> Result<Self> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(GameError::InvalidBet)
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    pub const fn amount(self) -> f64 {
        self.0
    }

    pub fn halved(self) -> Result<Self> {
        Self::new(self.0 / 2.0)
    }

    pub fn doubled(self) -> Result<Self> {
        Self::new(self.0 * 2.0)
    }
}

impl FromStr for Bet {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let amount: f64 = s.trim().parse().map_err(|_| GameError::InvalidBet)?;
        Self::new(amount)
    }
}

impl TryFrom<f64> for Bet {
    type Error = GameError;

    fn try_from(amount: f64) -> Result<Self> {
        Self::new(amount)
    }
}

impl From<Bet> for f64 {
    fn from(bet: Bet) -> Self {
        bet.0
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// How much each safe reveal adds to the multiplier, keyed by mine count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepSchedule {
    /// Same step regardless of mine count.
    Flat(f64),
    /// `base * total_cells / safe_cells`, denser boards pay more per reveal.
    DensityScaled(f64),
    /// Explicit steps per mine count, `default` for the rest.
    PerMineCount {
        default: f64,
        overrides: BTreeMap<CellCount, f64>,
    },
}

impl StepSchedule {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Flat(step) => check_rate("step", *step),
            Self::DensityScaled(base) => check_rate("step base", *base),
            Self::PerMineCount { default, overrides } => {
                check_rate("step default", *default)?;
                overrides
                    .values()
                    .try_for_each(|&step| check_rate("step override", step))
            }
        }
    }

    pub fn step_for(&self, config: GameConfig) -> f64 {
        match self {
            Self::Flat(step) => *step,
            Self::DensityScaled(base) => {
                base * f64::from(config.total_cells()) / f64::from(config.safe_cells())
            }
            Self::PerMineCount { default, overrides } => overrides
                .get(&config.mines)
                .copied()
                .unwrap_or(*default),
        }
    }
}

impl Default for StepSchedule {
    fn default() -> Self {
        Self::Flat(DEFAULT_STEP)
    }
}

/// Stateless multiplier and profit rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutTable {
    pub start_bonus: f64,
    pub step: StepSchedule,
    pub min_reveals_for_cashout: CellCount,
}

impl PayoutTable {
    /// Rejects settings that would start a round below 1x or shrink the multiplier.
    pub fn validate(&self) -> Result<()> {
        check_rate("start_bonus", self.start_bonus)?;
        self.step.validate()
    }

    pub fn starting_multiplier(&self) -> f64 {
        1.0 + self.start_bonus
    }

    pub fn step_for(&self, config: GameConfig) -> f64 {
        self.step.step_for(config)
    }

    /// Multiplier after `revealed_safe` diamonds: `1 + start_bonus + revealed_safe * step`.
    pub fn multiplier_after(&self, config: GameConfig, revealed_safe: CellCount) -> f64 {
        self.starting_multiplier() + f64::from(revealed_safe) * self.step_for(config)
    }

    /// Multiplier once every safe cell is uncovered.
    pub fn max_multiplier(&self, config: GameConfig) -> f64 {
        self.multiplier_after(config, config.safe_cells())
    }
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self {
            start_bonus: DEFAULT_START_BONUS,
            step: StepSchedule::default(),
            min_reveals_for_cashout: 0,
        }
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidPayout { field })
    }
}

/// Net profit, stake excluded. Cashouts settle this amount.
pub fn profit_from(bet: Bet, multiplier: f64) -> f64 {
    bet.amount() * (multiplier - 1.0)
}

/// Stake plus profit.
pub fn payout_from(bet: Bet, multiplier: f64) -> f64 {
    bet.amount() * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bet_parsing_rejects_invalid_input() {
        assert_eq!(Bet::parse("-5"), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse("0"), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse("abc"), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse(""), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse("NaN"), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse("inf"), Err(GameError::InvalidBet));
        assert_eq!(Bet::parse(" 2.5 ").map(Bet::amount), Ok(2.5));
    }

    #[test]
    fn bet_halves_and_doubles() {
        let bet = Bet::new(10.0).unwrap();
        assert_eq!(bet.halved().map(Bet::amount), Ok(5.0));
        assert_eq!(bet.doubled().map(Bet::amount), Ok(20.0));
        assert_eq!(Bet::new(f64::MAX).unwrap().doubled(), Err(GameError::InvalidBet));
    }

    #[test]
    fn multiplier_starts_with_bonus_and_grows_by_step() {
        let table = PayoutTable::default();
        let config = GameConfig::new(5, 1);

        assert!(close(table.multiplier_after(config, 0), 1.08));
        assert!(close(table.multiplier_after(config, 1), 1.28));
        assert!(close(table.multiplier_after(config, 3), 1.68));
        assert!(close(table.max_multiplier(config), 1.08 + 24.0 * 0.2));
    }

    #[test]
    fn profit_excludes_stake() {
        let bet = Bet::new(10.0).unwrap();

        assert!(close(profit_from(bet, 1.28), 2.8));
        assert!(close(payout_from(bet, 1.28), 12.8));
        assert!(close(profit_from(bet, 1.0), 0.0));
    }

    #[test]
    fn density_scaled_step_grows_with_mines() {
        let schedule = StepSchedule::DensityScaled(0.2);
        let sparse = schedule.step_for(GameConfig::new(5, 1));
        let dense = schedule.step_for(GameConfig::new(5, 20));

        assert!(close(sparse, 0.2 * 25.0 / 24.0));
        assert!(close(dense, 0.2 * 25.0 / 5.0));
        assert!(dense > sparse);
    }

    #[test]
    fn per_mine_count_step_falls_back_to_default() {
        let schedule = StepSchedule::PerMineCount {
            default: 0.2,
            overrides: BTreeMap::from([(10, 0.5)]),
        };

        assert!(close(schedule.step_for(GameConfig::new(5, 10)), 0.5));
        assert!(close(schedule.step_for(GameConfig::new(5, 3)), 0.2));
    }

    #[test]
    fn payout_table_reads_partial_json() {
        let table: PayoutTable = serde_json::from_str(r#"{"start_bonus": 0.1}"#).unwrap();

        assert!(close(table.starting_multiplier(), 1.1));
        assert_eq!(table.step, StepSchedule::Flat(DEFAULT_STEP));
    }

    #[test]
    fn payout_table_rejects_shrinking_rates() {
        assert_eq!(PayoutTable::default().validate(), Ok(()));

        let table = PayoutTable {
            start_bonus: -0.5,
            ..PayoutTable::default()
        };
        assert_eq!(
            table.validate(),
            Err(GameError::InvalidPayout {
                field: "start_bonus"
            })
        );

        let table = PayoutTable {
            start_bonus: f64::INFINITY,
            ..PayoutTable::default()
        };
        assert!(table.validate().is_err());

        let table = PayoutTable {
            step: StepSchedule::Flat(-0.3),
            ..PayoutTable::default()
        };
        assert_eq!(
            table.validate(),
            Err(GameError::InvalidPayout { field: "step" })
        );

        let table = PayoutTable {
            step: StepSchedule::DensityScaled(f64::NAN),
            ..PayoutTable::default()
        };
        assert!(table.validate().is_err());

        let table = PayoutTable {
            step: StepSchedule::PerMineCount {
                default: 0.2,
                overrides: BTreeMap::from([(3, -1.0)]),
            },
            ..PayoutTable::default()
        };
        assert_eq!(
            table.validate(),
            Err(GameError::InvalidPayout {
                field: "step override"
            })
        );
    }
}
