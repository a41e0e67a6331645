//! Headless replay of an input script.
//!
//! Runs a script (see [`crate::engine::script`]) through a [`GameLoop`]
//! without a terminal and summarizes the final state as JSON.

use std::io::Write;

use serde::Serialize;

use crate::config::Config;
use crate::core::{GameSnapshot, GameState};
use crate::engine::{parse_script, GameLoop};
use crate::event_log::EventLog;
use crate::types::{Color, Command, BOARD_HEIGHT, BOARD_WIDTH};

/// Final state after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub seed: u32,
    /// Inputs that parsed and were applied
    pub inputs: usize,
    pub phase: &'static str,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: f64,
    pub rows_pending_clear: Vec<usize>,
    /// Display rows, top first: `.` for empty, else a color initial
    pub board: Vec<String>,
}

impl ReplayReport {
    pub fn from_snapshot(seed: u32, inputs: usize, snap: &GameSnapshot) -> Self {
        let board = (0..BOARD_HEIGHT as usize)
            .map(|y| {
                (0..BOARD_WIDTH as usize)
                    .map(|x| snap.cell_at(x, y).map_or('.', color_initial))
                    .collect()
            })
            .collect();
        Self {
            seed,
            inputs,
            phase: snap.phase.as_str(),
            score: snap.score,
            level: snap.level,
            drop_interval_ms: snap.drop_interval_ms,
            rows_pending_clear: snap.rows_pending_clear.to_vec(),
            board,
        }
    }
}

/// Run `script` under `config`, logging events to `log`.
pub fn replay<W: Write>(script: &str, config: &Config, log: &mut EventLog<W>) -> ReplayReport {
    let state = GameState::new(config.seed).with_line_clear_delay_ms(config.line_clear_delay_ms);
    let mut game = GameLoop::with_state(state);

    if config.autostart {
        game.push_command(Command::Start);
    }
    let inputs = parse_script(script);
    let count = inputs.len();
    game.run_inputs(inputs);

    log.record_all(game.take_events());
    log.flush();

    ReplayReport::from_snapshot(config.seed, count, &game.snapshot())
}

fn color_initial(color: Color) -> char {
    match color {
        Color::Cyan => 'c',
        Color::Blue => 'b',
        Color::Orange => 'o',
        Color::Yellow => 'y',
        Color::Green => 'g',
        Color::Purple => 'p',
        Color::Red => 'r',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u32) -> Config {
        Config {
            seed,
            ..Config::default()
        }
    }

    #[test]
    fn test_empty_script_reports_fresh_game() {
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        let report = replay("", &config(3), &mut log);
        assert_eq!(report.inputs, 0);
        assert_eq!(report.phase, "notStarted");
        assert_eq!(report.score, 0);
        assert_eq!(report.level, 1);
        assert_eq!(report.board.len(), 20);
        assert!(report.board.iter().all(|row| row == ".........."));
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let script = "start\ntick 800\nmoveLeft\nsoftDrop\nrotate\ntick 800\n";
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        let a = replay(script, &config(99), &mut log);
        let b = replay(script, &config(99), &mut log);
        assert_eq!(a, b);
        assert_eq!(a.phase, "running");
        assert_eq!(a.inputs, 6);
    }

    #[test]
    fn test_autostart_and_log() {
        let cfg = Config {
            autostart: true,
            ..config(5)
        };
        let mut log = EventLog::with_writer(Vec::new());
        let report = replay("bogus\n", &cfg, &mut log);
        assert_eq!(report.inputs, 0);
        assert_eq!(report.phase, "running");
        // Started + Spawned
        assert_eq!(log.written(), 2);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let mut log: EventLog<Vec<u8>> = EventLog::disabled();
        let report = replay("start\n", &config(1), &mut log);
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["dropIntervalMs"], 800.0);
        assert!(v["rowsPendingClear"].as_array().unwrap().is_empty());
    }
}
