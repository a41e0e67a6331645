//! JSON-lines event log.
//!
//! One object per core event, each with a millisecond `ts` and a `type` tag:
//!
//! ```text
//! {"ts":1718000000000,"type":"spawned","kind":"t"}
//! {"ts":1718000000512,"type":"rowsCleared","count":2,"points":200,"score":700}
//! ```
//!
//! Logging never interrupts a game: the first failed write disables the log.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::CoreEvent;

/// Payload of one log line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventBody {
    Started,
    Paused,
    Resumed,
    Reset,
    Spawned {
        kind: &'static str,
    },
    Locked {
        kind: &'static str,
        x: i8,
        y: i8,
    },
    RowsMarked {
        count: u32,
    },
    RowsCleared {
        count: u32,
        points: u32,
        score: u32,
    },
    #[serde(rename_all = "camelCase")]
    LevelUp {
        level: u32,
        drop_interval_ms: f64,
    },
    GameOver {
        score: u32,
    },
}

impl From<CoreEvent> for EventBody {
    fn from(event: CoreEvent) -> Self {
        match event {
            CoreEvent::Started => EventBody::Started,
            CoreEvent::Paused => EventBody::Paused,
            CoreEvent::Resumed => EventBody::Resumed,
            CoreEvent::Reset => EventBody::Reset,
            CoreEvent::Spawned { kind } => EventBody::Spawned {
                kind: kind.as_str(),
            },
            CoreEvent::Locked { kind, x, y } => EventBody::Locked {
                kind: kind.as_str(),
                x,
                y,
            },
            CoreEvent::RowsMarked { count } => EventBody::RowsMarked { count },
            CoreEvent::RowsCleared {
                count,
                points,
                score,
            } => EventBody::RowsCleared {
                count,
                points,
                score,
            },
            CoreEvent::LevelUp {
                level,
                drop_interval_ms,
            } => EventBody::LevelUp {
                level,
                drop_interval_ms,
            },
            CoreEvent::GameOver { score } => EventBody::GameOver { score },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub ts: u64,
    #[serde(flatten)]
    pub body: EventBody,
}

impl EventRecord {
    pub fn new(ts: u64, event: CoreEvent) -> Self {
        Self {
            ts,
            body: event.into(),
        }
    }
}

/// Append-only JSON-lines sink. A disabled log accepts and drops everything.
#[derive(Debug)]
pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
    written: u64,
}

impl EventLog<BufWriter<File>> {
    /// Open (or create) `path` for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::with_writer(BufWriter::new(file)))
    }

    /// Open the configured log, or a disabled one when no path is set
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::disabled()),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            written: 0,
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            written: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Lines written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn writer(&self) -> Option<&W> {
        self.out.as_ref()
    }

    /// Append one record. Returns false if the log is (or just became) disabled.
    pub fn append(&mut self, record: &EventRecord) -> bool {
        self.append_value(record)
    }

    /// A record that fails to serialize disables the log like a failed write.
    fn append_value<T: Serialize>(&mut self, value: &T) -> bool {
        let Some(out) = self.out.as_mut() else {
            return false;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, value).is_err() {
            self.out = None;
            return false;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
            return false;
        }
        self.written += 1;
        true
    }

    /// Append events stamped with the current wall-clock time
    pub fn record_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = CoreEvent>,
    {
        if !self.is_enabled() {
            return;
        }
        let ts = current_timestamp_ms();
        for event in events {
            if !self.append(&EventRecord::new(ts, event)) {
                break;
            }
        }
    }

    /// Flush buffered lines; a failure disables the log.
    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
