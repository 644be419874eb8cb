use std::str::FromStr;

use anyhow::{Context, bail};
use gemsweeper_core::{CellCount, CellIndex};

/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Mines(CellCount),
    Toggle(CellIndex),
    Auto,
    Bet(Option<String>),
    Half,
    Double,
    Reveal(CellIndex),
    Random,
    Cashout,
    Show,
    Json,
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  mines N      set the mine count (clears placed mines)
  toggle I     place or remove a mine at cell I
  auto         place the mines randomly
  bet [AMOUNT] start a round, with the last amount if omitted
  half|double  halve or double the bet amount
  reveal I     uncover cell I
  random       uncover a random covered cell
  cashout      take the current profit
  show         draw the board
  json         print the session snapshot as JSON
  quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let arg = words.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "mines" | "m" => Self::Mines(number(arg, "mine count")?),
            "toggle" | "t" => Self::Toggle(number(arg, "cell index")?),
            "auto" => Self::Auto,
            "bet" | "b" => Self::Bet(arg.map(str::to_owned)),
            "half" => Self::Half,
            "double" => Self::Double,
            "reveal" | "r" => Self::Reveal(number(arg, "cell index")?),
            "random" => Self::Random,
            "cashout" | "c" => Self::Cashout,
            "show" | "s" => Self::Show,
            "json" => Self::Json,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, try help"),
        };
        Ok(command)
    }
}

fn number<T: FromStr>(arg: Option<&str>, what: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let arg = arg.with_context(|| format!("missing {what}"))?;
    arg.parse()
        .with_context(|| format!("invalid {what} {arg:?}"))
}
