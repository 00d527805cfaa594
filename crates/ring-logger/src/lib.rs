//! Ring Logger
//!
//! A `log` backend that keeps the most recent records in a fixed-capacity
//! buffer for in-app display, and echoes every record to the browser
//! console (a `tracing-subscriber` stderr formatter off wasm).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const DEFAULT_CAPACITY: usize = 200;

/// A single captured record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp_ms: i64,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Fixed-capacity buffer; the oldest entry is dropped when full
#[derive(Debug)]
pub struct LogRing {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl LogRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Append an entry, returning its id
    pub fn push(&mut self, level: Level, target: &str, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            level,
            target: target.to_string(),
            message,
        });
        id
    }

    /// The last `limit` entries, oldest first. `0` means all.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let take = if limit == 0 { self.entries.len() } else { limit.min(self.entries.len()) };
        self.entries
            .iter()
            .skip(self.entries.len() - take)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

static RING: OnceLock<Mutex<LogRing>> = OnceLock::new();

struct RingLogger {
    app_name: String,
    level: LevelFilter,
}

impl Log for RingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        echo(&self.app_name, record.level(), record.target(), &message);
        if let Some(ring) = RING.get() {
            if let Ok(mut ring) = ring.lock() {
                ring.push(record.level(), record.target(), message);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn echo(app_name: &str, level: Level, target: &str, message: &str) {
    let line = wasm_bindgen::JsValue::from_str(&format!("[{}] {} {}: {}", app_name, level, target, message));
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(app_name: &str, level: Level, target: &str, message: &str) {
    match level {
        Level::Error => tracing::error!(app = app_name, source = target, "{}", message),
        Level::Warn => tracing::warn!(app = app_name, source = target, "{}", message),
        Level::Info => tracing::info!(app = app_name, source = target, "{}", message),
        Level::Debug => tracing::debug!(app = app_name, source = target, "{}", message),
        Level::Trace => tracing::trace!(app = app_name, source = target, "{}", message),
    }
}

/// stderr subscriber for the native echo. Records are already filtered by
/// the ring logger, so the subscriber passes everything through.
#[cfg(not(target_arch = "wasm32"))]
fn init_echo() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    // A host that already installed a subscriber keeps it
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(target_arch = "wasm32")]
fn init_echo() {}

/// Install the logger process-wide. Fails if a logger is already set.
pub fn init_logger(app_name: &str, level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let _ = RING.set(Mutex::new(LogRing::new(capacity)));
    log::set_boxed_logger(Box::new(RingLogger {
        app_name: app_name.to_string(),
        level,
    }))?;
    log::set_max_level(level);
    init_echo();
    Ok(())
}

/// Most recent captured entries, oldest first. Empty before `init_logger`.
pub fn recent_entries(limit: usize) -> Vec<LogEntry> {
    RING.get()
        .and_then(|ring| ring.lock().ok().map(|ring| ring.recent(limit)))
        .unwrap_or_default()
}

pub fn clear() {
    if let Some(Ok(mut ring)) = RING.get().map(|ring| ring.lock()) {
        ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let mut ring = LogRing::new(3);
        for n in 0..5 {
            ring.push(Level::Info, "test", format!("msg {}", n));
        }
        let messages: Vec<_> = ring.recent(0).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["msg 2", "msg 3", "msg 4"]);
        assert_eq!(ring.recent(0)[0].id, 3);
    }

    #[test]
    fn test_recent_limit() {
        let mut ring = LogRing::new(10);
        ring.push(Level::Warn, "a", "one".into());
        ring.push(Level::Error, "b", "two".into());
        ring.push(Level::Debug, "c", "three".into());

        let last = ring.recent(2);
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].message, "two");
        assert_eq!(last[1].level, Level::Debug);
        assert_eq!(ring.recent(50).len(), 3);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut ring = LogRing::new(0);
        ring.push(Level::Info, "t", "a".into());
        ring.push(Level::Info, "t", "b".into());
        assert_eq!(ring.len(), 1);
        ring.clear();
        assert!(ring.is_empty());
    }

    #[test]
    fn test_global_logger_captures_records() {
        init_logger("test", LevelFilter::Info, 16).unwrap();
        log::info!(target: "planner", "saved countdown");
        log::debug!("filtered out");

        let entries = recent_entries(0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "planner");
        assert_eq!(entries[0].message, "saved countdown");

        clear();
        assert!(recent_entries(0).is_empty());
        log::warn!("after clear");
        assert_eq!(recent_entries(0)[0].message, "after clear");
    }
}
