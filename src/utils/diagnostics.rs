//! Diagnostic stream.
//!
//! Every record is forwarded to the `log` facade (routed to the browser
//! console by `console_log`) and kept in a bounded per-thread buffer so the
//! UI and tests can inspect what went wrong during startup.

use std::cell::RefCell;
use std::collections::VecDeque;

use log::Level;

use crate::config::MAX_DIAGNOSTICS;

/// A recorded diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

thread_local! {
    static RECORDS: RefCell<VecDeque<Diagnostic>> = const { RefCell::new(VecDeque::new()) };
}

/// Log a message and keep it in the diagnostics buffer.
pub fn record(level: Level, message: impl Into<String>) {
    let message = message.into();
    log::log!(level, "{}", message);
    RECORDS.with(|records| {
        let mut records = records.borrow_mut();
        if records.len() == MAX_DIAGNOSTICS {
            records.pop_front();
        }
        records.push_back(Diagnostic { level, message });
    });
}

pub fn error(message: impl Into<String>) {
    record(Level::Error, message);
}

pub fn warn(message: impl Into<String>) {
    record(Level::Warn, message);
}

/// Snapshot of the buffered records, oldest first.
pub fn snapshot() -> Vec<Diagnostic> {
    RECORDS.with(|records| records.borrow().iter().cloned().collect())
}

/// Number of buffered records at `level`.
pub fn count(level: Level) -> usize {
    RECORDS.with(|records| records.borrow().iter().filter(|d| d.level == level).count())
}

#[cfg(test)]
pub fn clear() {
    RECORDS.with(|records| records.borrow_mut().clear());
}
