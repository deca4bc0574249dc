//! JSON-lines event journal.
//!
//! One object per line, tagged by `"type"`:
//! `start`, `lock`, `line_clear`, `game_over`, `restart`.
//! A failed write disables the journal for the rest of the session; the game
//! itself never stops because of logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::BoardDims;
use crate::types::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    Start {
        t_ms: u64,
        episode_id: u32,
        seed: u32,
        cols: u32,
        rows: u32,
    },
    Lock {
        t_ms: u64,
        episode_id: u32,
        piece_id: u32,
        piece: String,
        lines_cleared: u32,
    },
    LineClear {
        t_ms: u64,
        episode_id: u32,
        lines: u32,
        points: u32,
        score: u32,
        level: u32,
        drop_interval_ms: u32,
    },
    GameOver {
        t_ms: u64,
        episode_id: u32,
        score: u32,
        level: u32,
    },
    Restart {
        t_ms: u64,
        episode_id: u32,
    },
}

impl JournalRecord {
    /// Records describing one lock: always `lock`, then `line_clear` and
    /// `game_over` when they apply.
    pub fn from_lock(t_ms: u64, episode_id: u32, ev: &LockEvent) -> Vec<JournalRecord> {
        let mut out = vec![JournalRecord::Lock {
            t_ms,
            episode_id,
            piece_id: ev.piece_id,
            piece: ev.kind.as_str().to_string(),
            lines_cleared: ev.lines_cleared,
        }];
        if ev.cleared_lines() {
            out.push(JournalRecord::LineClear {
                t_ms,
                episode_id,
                lines: ev.lines_cleared,
                points: ev.line_clear_score,
                score: ev.score,
                level: ev.level,
                drop_interval_ms: ev.drop_interval_ms,
            });
        }
        if ev.game_over {
            out.push(JournalRecord::GameOver {
                t_ms,
                episode_id,
                score: ev.score,
                level: ev.level,
            });
        }
        out
    }
}

pub struct Journal<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl Journal {
    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// A journal that drops every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn write(&mut self, record: &JournalRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
        }
    }

    pub fn start(&mut self, t_ms: u64, episode_id: u32, seed: u32, dims: BoardDims) {
        self.write(&JournalRecord::Start {
            t_ms,
            episode_id,
            seed,
            cols: dims.cols() as u32,
            rows: dims.rows() as u32,
        });
    }

    pub fn restart(&mut self, t_ms: u64, episode_id: u32) {
        self.write(&JournalRecord::Restart { t_ms, episode_id });
    }

    pub fn lock(&mut self, t_ms: u64, episode_id: u32, ev: &LockEvent) {
        for record in JournalRecord::from_lock(t_ms, episode_id, ev) {
            self.write(&record);
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush().context("flush journal")?;
        }
        Ok(())
    }

    /// Give back the underlying writer (if still healthy).
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn lock_event(lines: u32, game_over: bool) -> LockEvent {
        LockEvent {
            kind: PieceKind::I,
            piece_id: 4,
            lines_cleared: lines,
            line_clear_score: lines * 100,
            score: 300,
            level: 1,
            drop_interval_ms: 1000,
            game_over,
        }
    }

    #[test]
    fn plain_lock_is_one_record() {
        let records = JournalRecord::from_lock(10, 0, &lock_event(0, false));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn clearing_lock_adds_line_clear_and_game_over() {
        let records = JournalRecord::from_lock(10, 2, &lock_event(2, true));
        assert_eq!(records.len(), 3);
        assert!(matches!(
            records[1],
            JournalRecord::LineClear {
                lines: 2,
                points: 200,
                ..
            }
        ));
        assert!(matches!(records[2], JournalRecord::GameOver { episode_id: 2, .. }));
    }

    #[test]
    fn records_are_tagged_json_lines() {
        let mut journal = Journal::new(Vec::new());
        journal.restart(5, 1);
        journal.lock(9, 1, &lock_event(1, false));
        let bytes = journal.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#"{"type":"restart","t_ms":5,"episode_id":1}"#);

        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["type"], "lock");
        assert_eq!(v["piece"], "i");
        let back: JournalRecord = serde_json::from_str(lines[2]).unwrap();
        assert!(matches!(back, JournalRecord::LineClear { score: 300, .. }));
    }

    #[test]
    fn disabled_journal_is_silent() {
        let mut journal = Journal::disabled();
        journal.restart(0, 0);
        assert!(!journal.is_enabled());
        journal.flush().unwrap();
    }
}
