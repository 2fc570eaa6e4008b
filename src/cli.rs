//! Command-line parsing: subcommands with positional arguments and two
//! flags.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;

use crate::platform::{Key, KeyParseError};

pub const USAGE: &str = "\
usage: hotshot [--config PATH] <command>

commands:
  press KEY...                     press every key in one batch
  release KEY...                   release every key in one batch
  tap KEY...|@CHORD [--hold MS]    press, hold, then release
  fire X Y Z                       fire a projectile and print its velocity
  keys                             list key names
  version                          print the version";

/// A key list as typed: literal names or a reference to a configured chord.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySpec {
    Keys(Vec<Key>),
    Chord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Press(KeySpec),
    Release(KeySpec),
    Tap {
        keys: KeySpec,
        hold: Option<Duration>,
    },
    Fire(Vec3),
    Keys,
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CliError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("{command} needs at least one key")]
    NoKeys { command: &'static str },
    #[error(transparent)]
    Key(#[from] KeyParseError),
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("fire needs exactly three components, got {0}")]
    Direction(usize),
    #[error("unexpected argument: {0}")]
    Unexpected(String),
}

impl Cli {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();

        let config = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = args.get(i + 1).cloned().ok_or(CliError::MissingValue("--config"))?;
                args.drain(i..=i + 1);
                Some(PathBuf::from(path))
            }
            None => None,
        };

        let mut rest = args.into_iter();
        let name = rest.next().ok_or(CliError::MissingCommand)?;
        let rest: Vec<String> = rest.collect();

        let command = match name.as_str() {
            "press" => Command::Press(key_spec("press", rest)?),
            "release" => Command::Release(key_spec("release", rest)?),
            "tap" => parse_tap(rest)?,
            "fire" => Command::Fire(parse_direction(&rest)?),
            "keys" => no_args(Command::Keys, rest)?,
            "version" | "--version" | "-V" => no_args(Command::Version, rest)?,
            "help" | "--help" | "-h" => Command::Help,
            other => return Err(CliError::UnknownCommand(other.to_owned())),
        };

        Ok(Self { config, command })
    }
}

fn no_args(command: Command, rest: Vec<String>) -> Result<Command, CliError> {
    match rest.into_iter().next() {
        Some(extra) => Err(CliError::Unexpected(extra)),
        None => Ok(command),
    }
}

fn key_spec(command: &'static str, args: Vec<String>) -> Result<KeySpec, CliError> {
    match args.as_slice() {
        [] => Err(CliError::NoKeys { command }),
        [single] if single.len() > 1 && single.starts_with('@') => {
            Ok(KeySpec::Chord(single[1..].to_owned()))
        }
        _ => {
            let keys = args
                .iter()
                .map(|a| a.parse::<Key>())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(KeySpec::Keys(keys))
        }
    }
}

fn parse_tap(mut args: Vec<String>) -> Result<Command, CliError> {
    let hold = match args.iter().position(|a| a == "--hold") {
        Some(i) => {
            let ms = args.get(i + 1).cloned().ok_or(CliError::MissingValue("--hold"))?;
            args.drain(i..=i + 1);
            let ms: u64 = ms.parse().map_err(|_| CliError::Number(ms))?;
            Some(Duration::from_millis(ms))
        }
        None => None,
    };
    Ok(Command::Tap {
        keys: key_spec("tap", args)?,
        hold,
    })
}

fn parse_direction(args: &[String]) -> Result<Vec3, CliError> {
    let [x, y, z] = args else {
        return Err(CliError::Direction(args.len()));
    };
    let component = |s: &String| s.parse::<f32>().map_err(|_| CliError::Number(s.clone()));
    Ok(Vec3::new(component(x)?, component(y)?, component(z)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyCode;

    #[test]
    fn press_parses_key_names() {
        let cli = Cli::parse(["press", "Ctrl", "a"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(
            cli.command,
            Command::Press(KeySpec::Keys(vec![
                Key::Code(KeyCode::Ctrl),
                Key::Code(KeyCode::A)
            ]))
        );
    }

    #[test]
    fn config_flag_can_come_first() {
        let cli = Cli::parse(["--config", "/tmp/h.toml", "release", "F11"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.toml")));
        assert_eq!(
            cli.command,
            Command::Release(KeySpec::Keys(vec![Key::Code(KeyCode::F11)]))
        );
    }

    #[test]
    fn tap_accepts_chord_and_hold() {
        let cli = Cli::parse(["tap", "@live_coding", "--hold", "80"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Tap {
                keys: KeySpec::Chord("live_coding".into()),
                hold: Some(Duration::from_millis(80)),
            }
        );
    }

    #[test]
    fn lone_at_sign_is_a_key() {
        let cli = Cli::parse(["press", "@"]).unwrap();
        assert_eq!(cli.command, Command::Press(KeySpec::Keys(vec![Key::Char('@')])));
    }

    #[test]
    fn fire_parses_three_components() {
        let cli = Cli::parse(["fire", "1", "0", "-0.5"]).unwrap();
        assert_eq!(cli.command, Command::Fire(Vec3::new(1.0, 0.0, -0.5)));
        assert_eq!(Cli::parse(["fire", "1", "0"]), Err(CliError::Direction(2)));
        assert_eq!(
            Cli::parse(["fire", "1", "x", "0"]),
            Err(CliError::Number("x".into()))
        );
    }

    #[test]
    fn errors_are_reported() {
        assert_eq!(Cli::parse(Vec::<String>::new()), Err(CliError::MissingCommand));
        assert_eq!(
            Cli::parse(["launch"]),
            Err(CliError::UnknownCommand("launch".into()))
        );
        assert_eq!(
            Cli::parse(["press"]),
            Err(CliError::NoKeys { command: "press" })
        );
        assert_eq!(
            Cli::parse(["press", "Hyper"]),
            Err(CliError::Key(KeyParseError::Unknown("Hyper".into())))
        );
        assert_eq!(
            Cli::parse(["tap", "a", "--hold"]),
            Err(CliError::MissingValue("--hold"))
        );
        assert_eq!(
            Cli::parse(["version", "now"]),
            Err(CliError::Unexpected("now".into()))
        );
    }
}
