//! Line-oriented control commands read from stdin.

use anyhow::{anyhow, bail, Context, Result};
use life_core::Position;
use life_engine::Session;
use std::str::FromStr;
use tracing::warn;

pub const HELP: &str = "\
commands:
  play              start stepping
  pause             stop stepping, keep the grid
  stop              stop stepping and clear the grid
  toggle ROW COL    flip one cell
  resize WIDTH      re-size for a viewport width (clears the grid)
  seed PATTERN      replace the grid with a named pattern
  show              print the grid
  dismiss           clear the last message
  help              print this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Toggle(Position),
    Resize(u32),
    Seed(String),
    Show,
    Dismiss,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "stop" => Command::Stop,
            "toggle" => {
                let row = parse_arg(words.next(), "ROW")?;
                let col = parse_arg(words.next(), "COL")?;
                Command::Toggle(Position::new(row, col))
            }
            "resize" => Command::Resize(parse_arg(words.next(), "WIDTH")?),
            "seed" => Command::Seed(
                words
                    .next()
                    .ok_or_else(|| anyhow!("missing PATTERN"))?
                    .to_string(),
            ),
            "show" => Command::Show,
            "dismiss" => Command::Dismiss,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{}'", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}

fn parse_arg<T>(word: Option<&str>, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let word = word.ok_or_else(|| anyhow!("missing {}", name))?;
    word.parse().with_context(|| format!("invalid {} '{}'", name, word))
}

/// Apply a command to the session. Returns false when the runner should exit.
pub fn apply(session: &mut Session, command: Command) -> bool {
    let outcome = match command {
        Command::Play => session.play(),
        Command::Pause => {
            session.pause();
            Ok(())
        }
        Command::Stop => session.stop(),
        Command::Toggle(pos) => session.toggle(pos),
        Command::Resize(width) => session.resize_for_width(width),
        Command::Seed(name) => session.seed(&life_core::SeedConfig::Pattern {
            name,
            row: None,
            col: None,
        }),
        Command::Show => {
            print!("{}", session.grid());
            Ok(())
        }
        Command::Dismiss => {
            session.dismiss_message();
            Ok(())
        }
        Command::Help => {
            println!("{}", HELP);
            Ok(())
        }
        Command::Quit => return false,
    };

    if let Err(e) = outcome {
        warn!("Command rejected: {}", e);
    }
    true
}
