/// In-memory logger for the TUI. Anything written to stdout/stderr while the
/// alternate screen is active would corrupt the display, so log records go into
/// a ring buffer that the diagnostics overlay reads back.
use log::{Level, LevelFilter, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const MAX_LOG_LINES: usize = 50_000;

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {:<5} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity: capacity.max(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<LogEntry>> {
        self.entries.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<LogEntry>> {
        self.entries.write().unwrap_or_else(|p| p.into_inner())
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.write();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The newest `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.read();
        let start = entries.len().saturating_sub(count);
        entries.iter().skip(start).cloned().collect()
    }
}

pub struct BufferedLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl BufferedLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        Self { buffer, level }
    }
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.buffer.push(LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

/// Install the buffered logger and hand back the buffer it writes to.
/// If another logger is already installed the buffer simply stays empty.
pub fn init_memory_logger() -> LogBuffer {
    let buffer = LogBuffer::default();
    let logger = BufferedLogger::new(buffer.clone(), LevelFilter::Debug);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "12:00:00.000".to_string(),
            level: Level::Info,
            target: "wf_tui".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let buffer = LogBuffer::with_capacity(3);
        for i in 0..5 {
            buffer.push(entry(&format!("line {i}")));
        }
        assert_eq!(buffer.len(), 3);
        let recent = buffer.recent(10);
        assert_eq!(recent[0].message, "line 2");
        assert_eq!(recent[2].message, "line 4");
        assert_eq!(buffer.recent(1)[0].message, "line 4");
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::with_capacity(10);
        let logger = BufferedLogger::new(buffer.clone(), LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("wf_tui::effects")
                .args(format_args!("shown"))
                .build(),
        );
        let entries = buffer.recent(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
        assert!(entries[0].format().contains("WARN  wf_tui::effects: shown"));
    }
}
