//! Plain-text input scripts.
//!
//! One input per line: a command token (`moveLeft`, `rotate`, `start`, ...)
//! or `tick <ms>`. Blank lines and `#` comments are skipped, and lines that
//! do not parse are dropped without complaint.

use crate::game_loop::LoopInput;
use crate::types::Command;

/// Parse a single script line
pub fn parse_line(line: &str) -> Option<LoopInput> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    if head.eq_ignore_ascii_case("tick") {
        let ms = parts.next()?.parse().ok()?;
        return Some(LoopInput::Tick(ms));
    }
    Command::from_str(head).map(LoopInput::Command)
}

/// Parse every line of a script, skipping anything unrecognized
pub fn parse_script(text: &str) -> Vec<LoopInput> {
    text.lines().filter_map(parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands_and_ticks() {
        assert_eq!(parse_line("start"), Some(LoopInput::Command(Command::Start)));
        assert_eq!(
            parse_line("  MoveLeft "),
            Some(LoopInput::Command(Command::MoveLeft))
        );
        assert_eq!(parse_line("tick 800"), Some(LoopInput::Tick(800)));
    }

    #[test]
    fn test_unrecognized_lines_are_dropped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("hardDrop"), None);
        assert_eq!(parse_line("tick"), None);
        assert_eq!(parse_line("tick soon"), None);
    }

    #[test]
    fn test_parse_script_keeps_order() {
        let inputs = parse_script("start\nbogus\ntick 16\nrotate\n");
        assert_eq!(
            inputs,
            vec![
                LoopInput::Command(Command::Start),
                LoopInput::Tick(16),
                LoopInput::Command(Command::Rotate),
            ]
        );
    }
}
