//! Injected logging capability.
//!
//! Every component takes a `&dyn DiscoveryLog` instead of reaching for a
//! global logger, so callers can route diagnostics wherever they like and
//! tests can capture them with [`MemoryLog`].

use parking_lot::Mutex;
use tracing::Level;

/// Sink for diagnostics emitted during discovery.
pub trait DiscoveryLog: Send + Sync {
    fn debug(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `source_discovery` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl DiscoveryLog for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "source_discovery", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "source_discovery", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "source_discovery", "{}", message);
    }
}

/// A single captured diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

/// Records diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages logged at the given level, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn push(&self, level: Level, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}

impl DiscoveryLog for MemoryLog {
    fn debug(&self, message: &str) {
        self.push(Level::DEBUG, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::ERROR, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_filters_by_level() {
        let log = MemoryLog::new();
        log.warn("first");
        log.debug("noise");
        log.warn("second");

        assert_eq!(log.messages(Level::WARN), vec!["first", "second"]);
        assert_eq!(log.messages(Level::DEBUG), vec!["noise"]);
        assert_eq!(log.records().len(), 3);

        log.clear();
        assert!(log.records().is_empty());
    }
}
