//! Console commands typed on stdin and their parser.

use shared::domain::SlotIndex;

pub const HELP: &str = "\
commands:
  feed <grams>            dispense a portion now
  time <slot> <HH:MM>     edit a slot's time
  weight <slot> <grams>   edit a slot's portion
  save <slot>             submit a slot's fields to the feeder
  cancel <slot>           drop unsaved edits for a slot
  reset                   reset the feeder
  status                  print the current view
  help                    show this text
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Feed { amount: String },
    SetTime { index: SlotIndex, time: String },
    SetWeight { index: SlotIndex, weight: String },
    Save { index: SlotIndex },
    Cancel { index: SlotIndex },
    Reset,
    Status,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line. Field values are passed through untouched so
/// the client core applies its own coercion rules.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "feed" => ConsoleCommand::Feed {
            amount: rest.first().copied().unwrap_or_default().to_string(),
        },
        "time" => ConsoleCommand::SetTime {
            index: slot_arg(&rest)?,
            time: rest.get(1).copied().unwrap_or_default().to_string(),
        },
        "weight" => ConsoleCommand::SetWeight {
            index: slot_arg(&rest)?,
            weight: rest.get(1).copied().unwrap_or_default().to_string(),
        },
        "save" => ConsoleCommand::Save {
            index: slot_arg(&rest)?,
        },
        "cancel" => ConsoleCommand::Cancel {
            index: slot_arg(&rest)?,
        },
        "reset" => ConsoleCommand::Reset,
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn slot_arg(rest: &[&str]) -> Result<SlotIndex, String> {
    let raw = rest
        .first()
        .ok_or_else(|| "missing slot number".to_string())?;
    match raw.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(SlotIndex(number - 1)),
        _ => Err(format!("slot must be a number starting at 1, got '{raw}'")),
    }
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;
