//! Parses terminal lines into session commands and adapter requests.

use std::time::Duration;

use abyssal_core::{CellCoord, Command, Direction, MissionId};
use thiserror::Error;

/// Request typed by the player.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Input {
    /// Command forwarded to the session.
    Session(Command),
    /// Lists the mission catalog.
    ListMissions,
    /// Prints the HUD.
    Status,
    /// Prints the command summary.
    Help,
    /// Ends the expedition.
    Quit,
    /// Blank line.
    Nothing,
}

/// Reasons a line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The first word is not a known command.
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    /// The command is missing an argument or has too many.
    #[error("usage: {0}")]
    Usage(&'static str),
    /// An argument is not a valid number.
    #[error("`{0}` is not a valid number")]
    Number(String),
}

/// One-line summary of every command.
pub(crate) const HELP: &str = "commands: w/a/s/d or up/down/left/right, click <row> <col>, \
missions, mission <id>, hint, wait <secs>, status, help, quit";

/// Parses a single line of input.
pub(crate) fn parse(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Nothing);
    };
    let args: Vec<&str> = words.collect();
    let head = head.to_ascii_lowercase();

    if let Some(direction) = direction(&head) {
        no_arguments(&args, "w/a/s/d")?;
        return Ok(Input::Session(Command::MovePlayer {
            delta: direction.delta(),
        }));
    }

    match head.as_str() {
        "click" => match args.as_slice() {
            [row, column] => Ok(Input::Session(Command::SelectCell {
                cell: CellCoord::new(number(row)?, number(column)?),
            })),
            _ => Err(InputError::Usage("click <row> <col>")),
        },
        "missions" => no_arguments(&args, "missions").map(|()| Input::ListMissions),
        "mission" => match args.as_slice() {
            [id] => Ok(Input::Session(Command::StartMission {
                mission: MissionId::new(number(id)?),
            })),
            _ => Err(InputError::Usage("mission <id>")),
        },
        "hint" => no_arguments(&args, "hint").map(|()| Input::Session(Command::RequestHint)),
        "wait" => match args.as_slice() {
            [secs] => Ok(Input::Session(Command::Tick {
                dt: Duration::from_secs(u64::from(number(secs)?)),
            })),
            _ => Err(InputError::Usage("wait <secs>")),
        },
        "status" => no_arguments(&args, "status").map(|()| Input::Status),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        _ => Err(InputError::Unknown(head)),
    }
}

fn direction(word: &str) -> Option<Direction> {
    match word {
        "w" | "up" => Some(Direction::North),
        "s" | "down" => Some(Direction::South),
        "a" | "left" => Some(Direction::West),
        "d" | "right" => Some(Direction::East),
        _ => None,
    }
}

fn no_arguments(args: &[&str], usage: &'static str) -> Result<(), InputError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(InputError::Usage(usage))
    }
}

fn number(word: &str) -> Result<u32, InputError> {
    word.parse()
        .map_err(|_| InputError::Number(word.to_owned()))
}
