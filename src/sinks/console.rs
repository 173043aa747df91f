//! Console sink
//!
//! Writes one formatted line to standard error, synchronously on the calling
//! thread. No buffering beyond the OS stream's own, no rotation. Ordering
//! across threads is whatever the stream gives; the pipeline does not
//! serialize console output.

use crate::core::level::Level;

#[cfg(feature = "console")]
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    #[cfg(feature = "console")]
    pub fn write(&self, level: Level, line: &str) {
        eprintln!("{}", line.color(level.color_code()));
    }

    #[cfg(not(feature = "console"))]
    pub fn write(&self, level: Level, line: &str) {
        let _ = level;
        eprintln!("{}", line);
    }
}
