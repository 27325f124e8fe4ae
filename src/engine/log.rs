//! Optional append-only engine log.
//!
//! The one piece of external I/O the engine performs. Each line carries a
//! millisecond timestamp. With no destination configured every call is a
//! no-op and no I/O is attempted; write failures are swallowed so logging
//! can never fail a search.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use parking_lot::Mutex;

use crate::board::{Color, Move};

use super::SearchResult;

pub(crate) struct SearchLog {
    file: Option<Mutex<File>>,
}

impl SearchLog {
    pub(crate) fn disabled() -> SearchLog {
        SearchLog { file: None }
    }

    pub(crate) fn open(path: &Path) -> SearchLog {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => SearchLog {
                file: Some(Mutex::new(file)),
            },
            Err(err) => {
                log::warn!("could not open engine log {}: {err}", path.display());
                SearchLog::disabled()
            }
        }
    }

    pub(crate) fn line(&self, message: &str) {
        let Some(file) = &self.file else {
            return;
        };
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let mut file = file.lock();
        let _ = writeln!(file, "[{timestamp}] {message}");
    }

    pub(crate) fn search_start(&self, color: Color, depth: u32, time_ms: Option<u64>, fen: &str) {
        if self.file.is_none() {
            return;
        }
        let mut message = format!("search started: color={color:?} depth={depth}");
        if let Some(ms) = time_ms {
            message.push_str(&format!(" time_limit={ms}ms"));
        }
        message.push_str(&format!(" fen={fen}"));
        self.line(&message);
    }

    pub(crate) fn move_evaluated(&self, m: Move, score: i32, depth: u32, nodes: u64) {
        if self.file.is_none() {
            return;
        }
        self.line(&format!(
            "  move {} score {score} depth {depth} nodes {nodes}",
            m.long_algebraic()
        ));
    }

    pub(crate) fn search_result(&self, result: &SearchResult) {
        if self.file.is_none() {
            return;
        }
        self.line(&format!(
            "search finished: best={} score={} depth={} nodes={} time={:.2}s",
            result.best_move.long_algebraic(),
            result.score,
            result.depth,
            result.nodes,
            result.elapsed_secs
        ));
    }
}
