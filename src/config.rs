//! Runtime configuration from environment variables.
//!
//! Every setting falls back to its default when the variable is absent or
//! does not parse.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::LINE_CLEAR_DELAY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for the uniform piece source
    pub seed: u32,
    /// JSON-lines event log, if any
    pub log_path: Option<String>,
    pub line_clear_delay_ms: u32,
    /// Start the first game without waiting for a Start command
    pub autostart: bool,
    /// Replay this input script headlessly instead of opening the terminal UI
    pub script_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            log_path: None,
            line_clear_delay_ms: LINE_CLEAR_DELAY_MS,
            autostart: false,
            script_path: None,
        }
    }
}

impl Config {
    /// Read `BLOCKFALL_*` variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Without `BLOCKFALL_SEED` the seed comes
    /// from the wall clock.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let line_clear_delay_ms = lookup("BLOCKFALL_CLEAR_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LINE_CLEAR_DELAY_MS);

        let autostart = lookup("BLOCKFALL_AUTOSTART")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            seed,
            log_path: non_empty(lookup("BLOCKFALL_LOG_PATH")),
            line_clear_delay_ms,
            autostart,
            script_path: non_empty(lookup("BLOCKFALL_SCRIPT")),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

fn is_truthy(value: &str) -> bool {
    let v = value.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_every_setting() {
        let config = Config::from_lookup(lookup_from(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_LOG_PATH", " /tmp/blockfall.jsonl "),
            ("BLOCKFALL_CLEAR_DELAY_MS", "0"),
            ("BLOCKFALL_AUTOSTART", "TRUE"),
            ("BLOCKFALL_SCRIPT", "moves.txt"),
        ]));
        assert_eq!(config.seed, 42);
        assert_eq!(config.log_path.as_deref(), Some("/tmp/blockfall.jsonl"));
        assert_eq!(config.line_clear_delay_ms, 0);
        assert!(config.autostart);
        assert_eq!(config.script_path.as_deref(), Some("moves.txt"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("BLOCKFALL_SEED", "7"),
            ("BLOCKFALL_CLEAR_DELAY_MS", "soon"),
            ("BLOCKFALL_AUTOSTART", "yes please"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]));
        assert_eq!(config.line_clear_delay_ms, 500);
        assert!(!config.autostart);
        assert_eq!(config.log_path, None);
        assert_eq!(config.script_path, None);
    }

    #[test]
    fn test_default_matches_rules() {
        let config = Config::default();
        assert_eq!(config.line_clear_delay_ms, LINE_CLEAR_DELAY_MS);
        assert!(!config.autostart);
    }
}
