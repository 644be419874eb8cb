use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gemsweeper_core::{
    Bet, CellCount, Coord, GameConfig, GameError, RevealOutcome, Table, TableConfig,
};

use command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Place your mines, bet, find gems", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Table configuration as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long)]
    side: Option<Coord>,

    /// Number of mines to place
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn table_config(&self) -> anyhow::Result<TableConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                TableConfig::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => TableConfig::default(),
        };

        let side = self.side.unwrap_or(config.game.side);
        let mines = self.mines.unwrap_or(config.game.mines);
        config.game = GameConfig::new(side, mines);
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Front end state that lives outside the table: the bet field.
struct Console {
    table: Table,
    bet: String,
}

impl Console {
    fn run(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
        // the table reports rejections through notifications, results only matter for flow
        match command {
            Command::Mines(mines) => {
                let _ = self.table.set_mine_target(mines);
                writeln!(out, "{}", render::layout(&self.table.layout_snapshot()))?;
            }
            Command::Toggle(index) => {
                if let Err(GameError::InvalidIndex { .. }) = self.table.toggle_mine(index) {
                    writeln!(out, "no cell {index}")?;
                }
                writeln!(out, "{}", render::layout(&self.table.layout_snapshot()))?;
            }
            Command::Auto => {
                let _ = self.table.randomize_layout();
                writeln!(out, "{}", render::layout(&self.table.layout_snapshot()))?;
            }
            Command::Bet(amount) => {
                if let Some(amount) = amount {
                    self.bet = amount;
                }
                if self.table.start_round(&self.bet).is_ok() {
                    writeln!(out, "{}", render::board(&self.table.snapshot()))?;
                }
            }
            Command::Half => self.adjust_bet(Bet::halved, out)?,
            Command::Double => self.adjust_bet(Bet::doubled, out)?,
            Command::Reveal(index) => {
                match self.table.reveal(index) {
                    Err(GameError::InvalidIndex { .. }) => writeln!(out, "no cell {index}")?,
                    Ok(RevealOutcome::NoChange) => writeln!(out, "nothing to reveal at {index}")?,
                    _ => {}
                }
                writeln!(out, "{}", render::board(&self.table.snapshot()))?;
            }
            Command::Random => {
                if let Ok(RevealOutcome::NoChange) = self.table.reveal_random() {
                    writeln!(out, "no round in progress")?;
                }
                writeln!(out, "{}", render::board(&self.table.snapshot()))?;
            }
            Command::Cashout => {
                if let Err(GameError::NotActive) = self.table.cashout() {
                    writeln!(out, "no round in progress")?;
                }
            }
            Command::Show => {
                writeln!(out, "{}", render::layout(&self.table.layout_snapshot()))?;
                writeln!(out, "{}", render::board(&self.table.snapshot()))?;
            }
            Command::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&self.table.snapshot())?)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }

        for notification in self.table.take_notifications() {
            let marker = if notification.is_error() { "!" } else { "*" };
            writeln!(out, "{marker} {notification}")?;
        }
        Ok(true)
    }

    /// The "½" and "2×" buttons.
    fn adjust_bet(
        &mut self,
        adjust: fn(Bet) -> gemsweeper_core::Result<Bet>,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        match Bet::parse(&self.bet).and_then(adjust) {
            Ok(next) => {
                self.bet = next.amount().to_string();
                writeln!(out, "bet amount {next}")?;
            }
            Err(error) => writeln!(out, "{error}")?,
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.table_config()?;
    log::debug!("config: {:?}", config);

    let mut console = Console {
        table: Table::new(config),
        bet: "1".to_owned(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}")?;
    writeln!(stdout, "{}", render::layout(&console.table.layout_snapshot()))?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        if console.table.tick() {
            writeln!(stdout, "round settled, place your mines and bet again")?;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if !console.run(command, &mut stdout)? {
                    break;
                }
            }
            Err(error) => writeln!(stdout, "{error:#}")?,
        }
        stdout.flush()?;
    }

    log::debug!("bye");
    Ok(())
}
