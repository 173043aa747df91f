//! Pipeline configuration

use super::error::{PipelineError, Result};
use super::formatter::{CONSOLE_TEMPLATE, FILE_TEMPLATE};
use super::level::Level;
use super::timestamp::DEFAULT_TIME_PATTERN;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for [`crate::Pipeline::init`]. Set once at initialization;
/// the pipeline never reconfigures live.
///
/// # Examples
///
/// ```no_run
/// use logpipe::{Level, Pipeline, PipelineConfig};
///
/// let config = PipelineConfig::new("app.log")
///     .minimum_level(Level::Info)
///     .max_file_size_kb(512)
///     .max_backup_count(3);
/// let pipeline = Pipeline::init(config).unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Filesystem path of the active log file.
    pub destination_path: PathBuf,
    /// Whether to attach the console sink (stderr).
    pub emit_to_console: bool,
    /// Records below this severity are discarded before either sink.
    pub minimum_level: Level,
    /// Rotation threshold for the active file, in kibibytes.
    pub max_file_size_kb: u64,
    /// Total files retained: the active file plus `max_backup_count - 1`
    /// numbered backups.
    pub max_backup_count: usize,
    /// Console line template (see [`crate::core::formatter`]).
    pub console_template: String,
    /// File line template.
    pub file_template: String,
    /// Timestamp pattern (see [`crate::core::timestamp`]).
    pub time_pattern: String,
    /// Whether initialization installs the process-wide panic hook.
    pub install_fault_hook: bool,
}

impl PipelineConfig {
    pub fn new(destination_path: impl Into<PathBuf>) -> Self {
        Self {
            destination_path: destination_path.into(),
            emit_to_console: true,
            minimum_level: Level::Debug,
            max_file_size_kb: 1024,
            max_backup_count: 5,
            console_template: CONSOLE_TEMPLATE.to_string(),
            file_template: FILE_TEMPLATE.to_string(),
            time_pattern: DEFAULT_TIME_PATTERN.to_string(),
            install_fault_hook: true,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn emit_to_console(mut self, emit: bool) -> Self {
        self.emit_to_console = emit;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn minimum_level(mut self, level: Level) -> Self {
        self.minimum_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_file_size_kb(mut self, kb: u64) -> Self {
        self.max_file_size_kb = kb;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_backup_count(mut self, count: usize) -> Self {
        self.max_backup_count = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_template(mut self, template: impl Into<String>) -> Self {
        self.console_template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_template(mut self, template: impl Into<String>) -> Self {
        self.file_template = template.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.time_pattern = pattern.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn install_fault_hook(mut self, install: bool) -> Self {
        self.install_fault_hook = install;
        self
    }

    /// Rotation threshold in bytes.
    pub(crate) fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb * 1024
    }

    /// Validate numeric parameters and the destination path.
    ///
    /// Filesystem reachability is checked later by opening the sink, so a
    /// non-writable location still fails initialization fast.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.destination_path.as_os_str().is_empty() {
            return Err(PipelineError::config(
                "destination_path",
                "must not be empty",
            ));
        }
        if self.max_file_size_kb == 0 {
            return Err(PipelineError::config(
                "max_file_size_kb",
                "must be at least 1",
            ));
        }
        if self.max_backup_count == 0 {
            return Err(PipelineError::config(
                "max_backup_count",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
