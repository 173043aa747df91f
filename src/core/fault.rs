//! Fault capture: error traces and panic payload classification
//!
//! A fault is anything worth logging at CRITICAL with a trace attached: an
//! error value reported through [`crate::Pipeline::fault`], or a panic caught
//! by the process-wide hook the pipeline installs. Panic payloads are
//! classified by an explicit tag so that cancellation panics (raised with
//! [`Interrupt`]) pass through to the previous hook unlogged.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write as _;
use std::panic::PanicHookInfo;

/// Marker payload for panics that unwind for cancellation rather than to
/// report a failure. Raise one with `std::panic::panic_any(Interrupt)`; the
/// pipeline's hook delegates such panics to the previous hook without logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupt;

/// Classification tag for a panic payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// A genuine fault: logged at CRITICAL before default handling proceeds.
    Fault,
    /// A cancellation signal: delegated to the previous hook, never logged.
    Interrupt,
}

/// Classify a panic payload by tag.
pub fn classify(payload: &dyn Any) -> FaultKind {
    if payload.is::<Interrupt>() {
        FaultKind::Interrupt
    } else {
        FaultKind::Fault
    }
}

/// Captured fault details attached to a CRITICAL record. The trace is the
/// full multi-line description (cause chain or panic site, plus a backtrace
/// when one can be captured) and is never empty.
#[derive(Debug, Clone)]
pub struct FaultInfo {
    pub description: String,
    pub trace: String,
}

impl FaultInfo {
    /// Capture an error value: its display text, its `source()` chain, and a
    /// backtrace taken at the call site.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let description = error.to_string();
        let mut trace = description.clone();
        let mut source = error.source();
        while let Some(cause) = source {
            let _ = write!(trace, "\ncaused by: {}", cause);
            source = cause.source();
        }
        append_backtrace(&mut trace);
        Self { description, trace }
    }

    /// Capture a panic from inside the process-wide hook.
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let description = payload_text(info.payload());
        let mut trace = match info.location() {
            Some(location) => format!("panicked at {}: {}", location, description),
            None => format!("panicked: {}", description),
        };
        append_backtrace(&mut trace);
        Self { description, trace }
    }
}

fn append_backtrace(trace: &mut String) {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(trace, "\n{}", backtrace);
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn payload_text(payload: &dyn Any) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
