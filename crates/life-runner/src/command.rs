//! Line commands read from stdin.

use anyhow::{anyhow, bail, Result};
use life_core::Position;
use std::str::FromStr;

/// A user command forwarded to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `s`: start or pause the simulation
    StartStop,
    /// `c`: kill every cell
    Clear,
    /// `r`: clear, then fill randomly
    Randomize,
    /// `n`: advance a single generation
    Step,
    /// `-`: shorten the delay
    Faster,
    /// `+`: lengthen the delay
    Slower,
    /// `t <row> <col>`: flip one cell
    Toggle(Position),
    /// `m <x> <y>`: flip the cell under a pixel coordinate
    Click { x: i32, y: i32 },
    /// `p <name> [row col]`: load a named pattern
    Pattern {
        name: String,
        origin: Option<Position>,
    },
    /// `l`: list known patterns
    ListPatterns,
    /// `q`: exit
    Quit,
}

impl Command {
    /// Commands that change cells directly; only honored while paused
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::Clear
                | Command::Randomize
                | Command::Toggle(_)
                | Command::Click { .. }
                | Command::Pattern { .. }
        )
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let args: Vec<&str> = words.collect();

        let command = match keyword.to_ascii_lowercase().as_str() {
            "s" | "start" | "stop" => Command::StartStop,
            "c" | "clear" => Command::Clear,
            "r" | "random" => Command::Randomize,
            "n" | "step" => Command::Step,
            "-" | "faster" => Command::Faster,
            "+" | "slower" => Command::Slower,
            "l" | "list" => Command::ListPatterns,
            "q" | "quit" | "esc" | "exit" => Command::Quit,
            "t" | "toggle" => {
                let (row, col) = parse_pair(&args)?;
                return Ok(Command::Toggle(Position::new(row, col)));
            }
            "m" | "click" => {
                let (x, y) = parse_pair(&args)?;
                return Ok(Command::Click { x, y });
            }
            "p" | "pattern" => return parse_pattern(&args),
            other => bail!("unknown command '{}'", other),
        };

        if !args.is_empty() {
            bail!("'{}' takes no arguments", keyword);
        }
        Ok(command)
    }
}

fn parse_pair(args: &[&str]) -> Result<(i32, i32)> {
    match args {
        [first, second] => Ok((first.parse()?, second.parse()?)),
        _ => bail!("expected two integers, got {}", args.len()),
    }
}

/// Pattern names may contain spaces; a trailing integer pair is the origin
fn parse_pattern(args: &[&str]) -> Result<Command> {
    let (name_words, origin) = match args {
        [rest @ .., row, col] if !rest.is_empty() => {
            match (row.parse::<i32>(), col.parse::<i32>()) {
                (Ok(row), Ok(col)) => (rest, Some(Position::new(row, col))),
                _ => (args, None),
            }
        }
        _ => (args, None),
    };

    if name_words.is_empty() {
        bail!("pattern name is required");
    }

    Ok(Command::Pattern {
        name: name_words.join(" "),
        origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_commands() {
        assert_eq!("s".parse::<Command>().unwrap(), Command::StartStop);
        assert_eq!("C".parse::<Command>().unwrap(), Command::Clear);
        assert_eq!("r".parse::<Command>().unwrap(), Command::Randomize);
        assert_eq!(" n ".parse::<Command>().unwrap(), Command::Step);
        assert_eq!("-".parse::<Command>().unwrap(), Command::Faster);
        assert_eq!("+".parse::<Command>().unwrap(), Command::Slower);
        assert_eq!("esc".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("list".parse::<Command>().unwrap(), Command::ListPatterns);
    }

    #[test]
    fn test_toggle_and_click() {
        assert_eq!(
            "t 3 -1".parse::<Command>().unwrap(),
            Command::Toggle(Position::new(3, -1))
        );
        assert_eq!(
            "click 25 40".parse::<Command>().unwrap(),
            Command::Click { x: 25, y: 40 }
        );
        assert!("t 3".parse::<Command>().is_err());
        assert!("t a b".parse::<Command>().is_err());
    }

    #[test]
    fn test_pattern_with_spaces_and_origin() {
        assert_eq!(
            "p gosper glider gun 5 6".parse::<Command>().unwrap(),
            Command::Pattern {
                name: "gosper glider gun".to_string(),
                origin: Some(Position::new(5, 6)),
            }
        );
        assert_eq!(
            "pattern R-pentomino".parse::<Command>().unwrap(),
            Command::Pattern {
                name: "R-pentomino".to_string(),
                origin: None,
            }
        );
        assert!("p".parse::<Command>().is_err());
        assert_eq!(
            "p glider x 2".parse::<Command>().unwrap(),
            Command::Pattern {
                name: "glider x 2".to_string(),
                origin: None,
            }
        );
    }

    #[test]
    fn test_edit_commands() {
        assert!(Command::Clear.is_edit());
        assert!(Command::Toggle(Position::new(0, 0)).is_edit());
        assert!(Command::Click { x: 1, y: 1 }.is_edit());
        assert!(!Command::Step.is_edit());
        assert!(!Command::StartStop.is_edit());
        assert!(!Command::Faster.is_edit());
    }

    #[test]
    fn test_rejects_unknown_and_extra_arguments() {
        assert!("".parse::<Command>().is_err());
        assert!("jump".parse::<Command>().is_err());
        assert!("s now".parse::<Command>().is_err());
    }
}
