use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Lines kept before the oldest is dropped
const MAX_LINES: usize = 100;

/// Collects log lines into a buffer the UI drains into its log pane
pub struct TuiLogger {
    level: LevelFilter,
    log_buffer: Arc<Mutex<Vec<String>>>,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                level,
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }
}

fn format_record(record: &Record) -> String {
    match record.level() {
        Level::Error | Level::Warn => format!("{}: {}", record.level(), record.args()),
        _ => format!("{}", record.args()),
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format_record(record);
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                if buffer.len() > MAX_LINES {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}
