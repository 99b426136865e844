//! Command parsing and the command registry.

use chromapick_core::{AdjustmentKind, ColorFormat, DisplayMode};
use std::path::PathBuf;
use thiserror::Error;

/// Command parse errors.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A host event, as typed on one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Slider move; the raw value is coerced by the engine.
    Adjust(AdjustmentKind, String),
    Select(String),
    Hover(String),
    /// Host pushes a new color property.
    SetColor(String),
    Random(Option<usize>),
    Shades,
    Tints,
    Show(DisplayMode),
    Reset,
    Image(PathBuf),
    ClearImage,
    Key(String),
    Icon,
    Format(ColorFormat),
    Copy,
    State,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `//` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arg = |what: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match name.to_lowercase().as_str() {
        "select" => Command::Select(arg("color")?),
        "hover" => Command::Hover(arg("color")?),
        "color" => Command::SetColor(arg("color")?),
        "random" => {
            if rest.is_empty() {
                Command::Random(None)
            } else {
                let count = rest
                    .parse()
                    .map_err(|_| CommandError::InvalidArgument(rest.to_string()))?;
                Command::Random(Some(count))
            }
        }
        "shades" => Command::Shades,
        "tints" => Command::Tints,
        "show" => Command::Show(
            arg("base|shades|tints")?
                .parse()
                .map_err(CommandError::InvalidArgument)?,
        ),
        "reset" => Command::Reset,
        "image" => Command::Image(PathBuf::from(arg("path")?)),
        "clear-image" => Command::ClearImage,
        "key" => Command::Key(arg("key name")?),
        "icon" => Command::Icon,
        "format" => Command::Format(
            arg("hex|rgb|hsl|hsv")?
                .parse()
                .map_err(|_| CommandError::InvalidArgument(rest.to_string()))?,
        ),
        "copy" => Command::Copy,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => match other.parse::<AdjustmentKind>() {
            Ok(kind) => Command::Adjust(kind, arg("value")?),
            Err(_) => return Err(CommandError::Unknown(other.to_string())),
        },
    };
    Ok(Some(command))
}

/// Usage line and description for one command.
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandHelp {
    pub const fn new(usage: &'static str, description: &'static str) -> Self {
        Self { usage, description }
    }
}

/// Registry of all commands.
pub struct CommandRegistry;

impl CommandRegistry {
    pub fn all() -> Vec<CommandHelp> {
        vec![
            CommandHelp::new("spin <deg>", "Rotate hue from the baseline"),
            CommandHelp::new("saturate <pct>", "Raise saturation from the baseline"),
            CommandHelp::new("desaturate <pct>", "Lower saturation from the baseline"),
            CommandHelp::new("lighten <pct>", "Raise lightness from the baseline"),
            CommandHelp::new("darken <pct>", "Lower lightness from the baseline"),
            CommandHelp::new("brighten <pct>", "Raise RGB channels from the baseline"),
            CommandHelp::new("select <color>", "Pick a swatch"),
            CommandHelp::new("hover <color>", "Hover a swatch"),
            CommandHelp::new("color <color>", "Set the color from the host"),
            CommandHelp::new("random [n]", "Generate distinct random swatches"),
            CommandHelp::new("shades", "Generate shades of the current color"),
            CommandHelp::new("tints", "Generate tints of the current color"),
            CommandHelp::new("show <mode>", "Show base, shades or tints"),
            CommandHelp::new("reset", "Drop shades and tints"),
            CommandHelp::new("image <path>", "Extract swatches from a PNG"),
            CommandHelp::new("clear-image", "Drop the image and its swatches"),
            CommandHelp::new("key <name>", "Send a key press (Backspace clears the image)"),
            CommandHelp::new("icon", "Click the image icon"),
            CommandHelp::new("format <fmt>", "Select hex, rgb, hsl or hsv"),
            CommandHelp::new("copy", "Copy the color in the selected format"),
            CommandHelp::new("state", "Print the engine state as JSON"),
            CommandHelp::new("help", "Show this list"),
            CommandHelp::new("quit", "Exit"),
        ]
    }

    /// Format all commands for display.
    pub fn format_help() -> String {
        let mut out = String::from("=== Commands ===\n");
        for help in Self::all() {
            out.push_str(&format!("  {:20} {}\n", help.usage, help.description));
        }
        out
    }
}
