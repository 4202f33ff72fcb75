//! Parsing of lines typed into the interactive dashboard.

use crate::view::Axis;

/// What a typed line asks the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain text goes to the assistant
    Chat(String),
    /// `/x N`, `/y N`: move one slider without sending
    Slider(Axis, i32),
    /// `/apply`: send the current slider angles
    Apply,
    /// `/move X Y`: set both sliders and send
    Move(i32, i32),
    /// `/preset NAME`
    Preset(String),
    /// `/presets`: list configured presets
    Presets,
    /// `/auto`: resume GPS tracking
    Auto,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a message to ask the assistant, or a command:
  /x <deg>          set the X slider
  /y <deg>          set the Y slider
  /apply            send the slider angles to the motors
  /move <x> <y>     set both sliders and send
  /preset <name>    apply a named preset
  /presets          list presets
  /auto             resume GPS auto-tracking
  /status           show current readings
  /help             show this help
  /quit             exit";

fn parse_angle(raw: Option<&str>) -> Result<i32, String> {
    let raw = raw.ok_or_else(|| "missing angle".to_string())?;
    raw.parse()
        .map_err(|_| format!("invalid angle '{}': expected a whole number of degrees", raw))
}

/// Parse one input line. Anything not starting with `/` is chat text.
pub fn parse_input(line: &str) -> Result<InputCommand, String> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(InputCommand::Chat(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let parsed = match name.as_str() {
        "x" => InputCommand::Slider(Axis::X, parse_angle(parts.next())?),
        "y" => InputCommand::Slider(Axis::Y, parse_angle(parts.next())?),
        "apply" => InputCommand::Apply,
        "move" => {
            let x = parse_angle(parts.next())?;
            let y = parse_angle(parts.next())?;
            InputCommand::Move(x, y)
        }
        "preset" => {
            let preset = parts.by_ref().collect::<Vec<_>>().join(" ");
            if preset.is_empty() {
                return Err("usage: /preset <name>".to_string());
            }
            InputCommand::Preset(preset)
        }
        "presets" => InputCommand::Presets,
        "auto" => InputCommand::Auto,
        "status" => InputCommand::Status,
        "help" | "?" => InputCommand::Help,
        "quit" | "exit" | "q" => InputCommand::Quit,
        other => return Err(format!("unknown command '/{}' (try /help)", other)),
    };

    if parts.next().is_some() {
        return Err(format!("too many arguments for '/{}'", name));
    }
    Ok(parsed)
}
