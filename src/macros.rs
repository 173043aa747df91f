//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface over the pipeline handle's
//! level methods with automatic string formatting, similar to `println!`.
//!
//! # Examples
//!
//! ```no_run
//! use logpipe::{info, warning, Pipeline, PipelineConfig};
//!
//! let log = Pipeline::init(PipelineConfig::new("app.log")).unwrap();
//!
//! let port = 8080;
//! info!(log, "listening on port {}", port);
//! warning!(log, "retry {} of {}", 3, 5);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// ```no_run
/// # use logpipe::{log, Level, Pipeline, PipelineConfig};
/// # let pipeline = Pipeline::init(PipelineConfig::new("app.log")).unwrap();
/// log!(pipeline, Level::Info, "simple message");
/// log!(pipeline, Level::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($pipeline:expr, $level:expr, $($arg:tt)+) => {
        $pipeline.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::Level::Critical, $($arg)+)
    };
}
