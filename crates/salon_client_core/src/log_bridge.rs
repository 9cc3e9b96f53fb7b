//! Buffers log lines so a host UI (web console panel, mobile debug screen) can drain and show
//! them. Installed as the `log` backend; lines are also echoed to stderr.

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOG_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

const MAX_BUFFER_LEN: usize = 500;

struct BufferLogger;

static LOGGER: BufferLogger = BufferLogger;

fn should_keep(record: &Record) -> bool {
    // Errors and warnings from anywhere; chatty dependencies only from this crate.
    record.level() <= Level::Warn || record.target().starts_with("salon_client_core")
}

impl Log for BufferLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || !should_keep(record) {
            return;
        }
        push(format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

/// Route `log` output into the buffer. Safe to call more than once; later calls only adjust the level.
pub fn install(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

pub fn push(line: String) {
    eprintln!("{}", line);
    if let Ok(mut v) = LOG_BUFFER.lock() {
        v.push(line);
        let n = v.len();
        if n > MAX_BUFFER_LEN {
            v.drain(0..n - MAX_BUFFER_LEN);
        }
    }
}

/// Take and clear buffered lines.
pub fn drain_logs() -> Vec<String> {
    LOG_BUFFER
        .lock()
        .map(|mut v| std::mem::take(&mut *v))
        .unwrap_or_default()
}
