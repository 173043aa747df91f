//! # logpipe
//!
//! A process-local logging pipeline with synchronous console output, a
//! queue-decoupled rotating file sink, and automatic panic capture.
//!
//! ## Features
//!
//! - **Decoupled producers**: logging calls pay a stderr write and a
//!   non-blocking queue push; a single background dispatcher absorbs file
//!   I/O latency
//! - **Rotating file output**: size-bounded active file with numbered
//!   backups, oldest evicted
//! - **Independent formatting**: console and file destinations each carry
//!   their own line template and a millisecond-precision timestamp pattern
//! - **Panic capture**: uncaught panics are logged at CRITICAL with a trace
//!   before default handling proceeds
//! - **Drain on exit**: shutdown (explicit or on the last handle drop)
//!   blocks until every queued record is flushed to disk
//!
//! ```no_run
//! use logpipe::{Pipeline, PipelineConfig};
//!
//! let log = Pipeline::init(PipelineConfig::new("app.log")).unwrap();
//! log.info("application started");
//! if let Err(error) = "zero".parse::<i32>() {
//!     log.fault("failed to parse input", &error);
//! }
//! log.shutdown();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FaultInfo, FaultKind, Interrupt, Level, LineTemplate, LogRecord, Pipeline,
        PipelineConfig, PipelineError, Result, TimePattern,
    };
    pub use crate::sinks::{ConsoleSink, RotatingFileSink};
}

pub use crate::core::{
    FaultInfo, FaultKind, Interrupt, Level, LineTemplate, LogRecord, Pipeline, PipelineConfig,
    PipelineError, Result, TimePattern, CONSOLE_TEMPLATE, DEFAULT_TIME_PATTERN, FILE_TEMPLATE,
};
pub use crate::sinks::{ConsoleSink, RotatingFileSink};
