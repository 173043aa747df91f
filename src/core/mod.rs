//! Core pipeline types

pub mod config;
pub mod error;
pub mod fault;
pub mod formatter;
pub mod level;
pub mod pipeline;
pub mod record;
pub mod timestamp;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use fault::{FaultInfo, FaultKind, Interrupt};
pub use formatter::{LineTemplate, CONSOLE_TEMPLATE, FILE_TEMPLATE};
pub use level::Level;
pub use pipeline::Pipeline;
pub use record::LogRecord;
pub use timestamp::{TimePattern, DEFAULT_TIME_PATTERN};
