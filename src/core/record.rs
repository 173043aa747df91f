//! Log record structure

use super::fault::FaultInfo;
use super::level::Level;
use chrono::{DateTime, Local};

/// One discrete log event. Immutable once constructed; the console sink reads
/// it synchronously on the producing thread and the dispatcher consumes it
/// from the intake queue for file delivery.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: String,
    pub line: u32,
    pub fault: Option<FaultInfo>,
}

impl LogRecord {
    pub fn new(level: Level, message: String, file: impl Into<String>, line: u32) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            file: file.into(),
            line,
            fault: None,
        }
    }

    pub fn with_fault(mut self, fault: FaultInfo) -> Self {
        self.fault = Some(fault);
        self
    }
}
