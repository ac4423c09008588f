use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use sapper_core::{CellCount, Coord, Coord2};

pub const HELP: &str = "\
Commands:
  new [mines] [stake]  start a round (abandons an active one)
  open <row> <col>     open a cell, rows and columns count from 1
  cashout              take the current reward and end the round
  board                show the board again
  report               print the round result record
  verify               check the finished round's board against its seed
  verify <seed> <mines> <row,col>...
                       check a published board against its seed
  help                 show this message
  quit                 leave";

/// A mine layout someone published together with its seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutClaim {
    pub seed: String,
    pub mine_count: CellCount,
    /// Zero-based coordinates
    pub mines: Vec<Coord2>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New {
        mines: Option<CellCount>,
        stake: Option<f64>,
    },
    /// Zero-based coordinates
    Open(Coord2),
    CashOut,
    Board,
    Report,
    /// Checks the finished round when no claim is given
    Verify(Option<LayoutClaim>),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("Empty command, try `help`");
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("new" | "n", [rest @ ..]) if rest.len() <= 2 => Command::New {
                mines: rest
                    .first()
                    .map(|mines| mines.parse().context("mine count must be a whole number"))
                    .transpose()?,
                stake: rest
                    .get(1)
                    .map(|stake| stake.parse().context("stake must be a number"))
                    .transpose()?,
            },
            ("open" | "o", [row, col]) => Command::Open((parse_axis(row)?, parse_axis(col)?)),
            ("cashout" | "c", []) => Command::CashOut,
            ("board" | "b", []) => Command::Board,
            ("report" | "send", []) => Command::Report,
            ("verify", []) => Command::Verify(None),
            ("verify", [seed, mines, cells @ ..]) if !cells.is_empty() => {
                Command::Verify(Some(LayoutClaim {
                    seed: seed.to_string(),
                    mine_count: mines.parse().context("mine count must be a whole number")?,
                    mines: cells
                        .iter()
                        .map(|cell| parse_cell(cell))
                        .collect::<anyhow::Result<_>>()?,
                }))
            }
            ("help" | "h" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            _ => return Err(anyhow!("Unrecognized command `{}`, try `help`", line.trim())),
        };
        Ok(command)
    }
}

/// Parses a one-based `row,col` pair.
fn parse_cell(word: &str) -> anyhow::Result<Coord2> {
    let (row, col) = word
        .split_once(',')
        .ok_or_else(|| anyhow!("`{word}` is not a `row,col` pair"))?;
    Ok((parse_axis(row)?, parse_axis(col)?))
}

/// Converts a one-based position typed by the player to a zero-based coordinate.
fn parse_axis(word: &str) -> anyhow::Result<Coord> {
    let position: u16 = word
        .parse()
        .with_context(|| format!("`{word}` is not a row or column number"))?;
    position
        .checked_sub(1)
        .and_then(|index| Coord::try_from(index).ok())
        .ok_or_else(|| anyhow!("Rows and columns start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn open_converts_to_zero_based() {
        assert_eq!(parse("open 1 5"), Command::Open((0, 4)));
        assert_eq!(parse("  o 3 2 "), Command::Open((2, 1)));
    }

    #[test]
    fn open_rejects_zero_and_garbage() {
        assert!("open 0 1".parse::<Command>().is_err());
        assert!("open a b".parse::<Command>().is_err());
        assert!("open 1".parse::<Command>().is_err());
    }

    #[test]
    fn new_takes_optional_mines_and_stake() {
        assert_eq!(
            parse("new"),
            Command::New {
                mines: None,
                stake: None
            }
        );
        assert_eq!(
            parse("new 7"),
            Command::New {
                mines: Some(7),
                stake: None
            }
        );
        assert_eq!(
            parse("NEW 3 2.5"),
            Command::New {
                mines: Some(3),
                stake: Some(2.5)
            }
        );
        assert!("new 3 2.5 9".parse::<Command>().is_err());
        assert!("new x".parse::<Command>().is_err());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("cashout"), Command::CashOut);
        assert_eq!(parse("send"), Command::Report);
        assert_eq!(parse("verify"), Command::Verify(None));
        assert_eq!(parse("?"), Command::Help);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn verify_takes_published_layout() {
        assert_eq!(
            parse("verify uid:1|t:0|b:5|s:1 5 2,4 5,1"),
            Command::Verify(Some(LayoutClaim {
                seed: "uid:1|t:0|b:5|s:1".to_string(),
                mine_count: 5,
                mines: vec![(1, 3), (4, 0)],
            }))
        );
        assert!("verify seed 5".parse::<Command>().is_err());
        assert!("verify seed 5 2-4".parse::<Command>().is_err());
        assert!("verify seed x 2,4".parse::<Command>().is_err());
    }

    #[test]
    fn empty_and_unknown_lines_fail() {
        assert!("".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
        assert!("cashout now".parse::<Command>().is_err());
    }
}
