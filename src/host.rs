use std::str::FromStr;

use crate::models::error::ErrorWithMessage;
use crate::models::position::{GeoPosition, HeadingSample};

/// One line of stdin. Buttons and lifecycle go to the screen; the rest feeds
/// the simulated platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCommand {
    Mark,
    Calculate,
    Pause,
    Resume,
    Grant,
    Deny,
    Fix(GeoPosition),
    NoFix,
    Heading(HeadingSample),
    Quit,
}

fn number<T: FromStr>(word: Option<&str>, what: &str) -> Result<T, ErrorWithMessage> {
    let word = word.ok_or_else(|| ErrorWithMessage::new(format!("missing {}", what)))?;
    word.parse()
        .map_err(|_| ErrorWithMessage::new(format!("invalid {} '{}'", what, word)))
}

impl FromStr for HostCommand {
    type Err = ErrorWithMessage;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("").to_ascii_lowercase();
        let parsed = match command.as_str() {
            "mark" => HostCommand::Mark,
            "calc" | "calculate" => HostCommand::Calculate,
            "pause" => HostCommand::Pause,
            "resume" => HostCommand::Resume,
            "grant" => HostCommand::Grant,
            "deny" => HostCommand::Deny,
            "nofix" => HostCommand::NoFix,
            "quit" | "exit" => HostCommand::Quit,
            "fix" => {
                let latitude: f64 = number(words.next(), "latitude")?;
                let longitude: f64 = number(words.next(), "longitude")?;
                let altitude = match words.next() {
                    Some(word) => number(Some(word), "altitude")?,
                    None => 0.0,
                };
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(ErrorWithMessage::new(format!("coordinates out of range: {} {}", latitude, longitude)));
                }
                HostCommand::Fix(GeoPosition::new(latitude, longitude, altitude))
            }
            "heading" => {
                let degrees: f32 = number(words.next(), "heading")?;
                if !(0.0..=360.0).contains(&degrees) {
                    return Err(ErrorWithMessage::new(format!("heading out of range: {}", degrees)));
                }
                HostCommand::Heading(HeadingSample::new(degrees))
            }
            "" => return Err(ErrorWithMessage::new("empty command".to_string())),
            other => return Err(ErrorWithMessage::new(format!("unknown command '{}'", other))),
        };

        if let Some(extra) = words.next() {
            return Err(ErrorWithMessage::new(format!("unexpected argument '{}'", extra)));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buttons_and_lifecycle() {
        assert_eq!("mark".parse::<HostCommand>().unwrap(), HostCommand::Mark);
        assert_eq!(" CALC ".parse::<HostCommand>().unwrap(), HostCommand::Calculate);
        assert_eq!("resume".parse::<HostCommand>().unwrap(), HostCommand::Resume);
        assert_eq!("exit".parse::<HostCommand>().unwrap(), HostCommand::Quit);
    }

    #[test]
    fn parses_platform_inputs() {
        assert_eq!(
            "fix -23.55 -46.63 760".parse::<HostCommand>().unwrap(),
            HostCommand::Fix(GeoPosition::new(-23.55, -46.63, 760.0))
        );
        assert_eq!(
            "fix 0 1".parse::<HostCommand>().unwrap(),
            HostCommand::Fix(GeoPosition::new(0.0, 1.0, 0.0))
        );
        assert_eq!(
            "heading 271.5".parse::<HostCommand>().unwrap(),
            HostCommand::Heading(HeadingSample::new(271.5))
        );
    }

    #[test]
    fn rejects_bad_lines() {
        for line in ["", "jump", "fix 1", "fix north 2", "fix 91 0", "heading", "mark now"] {
            assert!(line.parse::<HostCommand>().is_err(), "{:?} parsed", line);
        }
    }

    #[test]
    fn rejects_headings_outside_the_compass() {
        for line in ["heading -1", "heading 360.5", "heading 720", "heading NaN", "heading inf"] {
            assert!(line.parse::<HostCommand>().is_err(), "{:?} parsed", line);
        }
    }
}
