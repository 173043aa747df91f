//! Line templates for record formatting
//!
//! A template is a plain string with named placeholders: `{timestamp}`,
//! `{level}`, `{message}`, `{file}`, and `{line}`. Templates are compiled
//! once at pipeline initialization; an unknown placeholder is a configuration
//! error. The console and file destinations each carry their own template.

use super::error::{PipelineError, Result};
use super::record::LogRecord;
use super::timestamp::TimePattern;
use std::fmt::Write as _;

/// Default file line template.
pub const FILE_TEMPLATE: &str = "[{timestamp}] [{level}] - {message} ({file}:{line})";

/// Default console line template. The console omits the timestamp.
pub const CONSOLE_TEMPLATE: &str = "[{level}] - {message} ({file}:{line})";

/// Minimum rendered width of the `{level}` placeholder, left-justified.
const LEVEL_WIDTH: usize = 8;

#[derive(Debug, Clone)]
enum Piece {
    Literal(String),
    Timestamp,
    Level,
    Message,
    File,
    Line,
}

/// A compiled line template.
#[derive(Debug, Clone)]
pub struct LineTemplate {
    pieces: Vec<Piece>,
}

impl LineTemplate {
    /// Compile a template string.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Template`] on an unknown placeholder or an
    /// unterminated `{`.
    pub fn parse(template: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            rest = &rest[open + 1..];
            let close = rest.find('}').ok_or_else(|| {
                PipelineError::template(template, "unterminated '{' placeholder")
            })?;
            let name = &rest[..close];
            rest = &rest[close + 1..];

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(match name {
                "timestamp" => Piece::Timestamp,
                "level" => Piece::Level,
                "message" => Piece::Message,
                "file" => Piece::File,
                "line" => Piece::Line,
                other => {
                    return Err(PipelineError::template(
                        template,
                        format!("unknown placeholder '{}'", other),
                    ))
                }
            });
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// Render one line for a record. The output carries no newline beyond any
    /// embedded in the message; when the record carries a fault, the line is
    /// followed by a newline and the full trace text, unmodified.
    #[must_use]
    pub fn render(&self, record: &LogRecord, pattern: &TimePattern) -> String {
        let mut line = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => line.push_str(text),
                Piece::Timestamp => line.push_str(&pattern.format(&record.timestamp)),
                Piece::Level => {
                    let _ = write!(line, "{:<width$}", record.level.as_str(), width = LEVEL_WIDTH);
                }
                Piece::Message => line.push_str(&record.message),
                Piece::File => line.push_str(&record.file),
                Piece::Line => {
                    let _ = write!(line, "{}", record.line);
                }
            }
        }
        if let Some(fault) = &record.fault {
            let _ = write!(line, "\n{}", fault.trace);
        }
        line
    }
}
