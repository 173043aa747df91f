//! Pipeline handle, intake queue, and dispatcher
//!
//! [`Pipeline::init`] wires the whole system: it validates the configuration,
//! opens the rotating file sink, spawns the single dispatcher thread, attaches
//! the console sink, and installs the process-wide panic hook. The returned
//! handle is cheap to clone and share across threads.
//!
//! Producers pay a synchronous stderr write (when console output is enabled)
//! plus one non-blocking push onto an unbounded channel. The dispatcher is the
//! only thread that touches the file sink, so file output preserves queue
//! order across all producers.

use super::config::PipelineConfig;
use super::error::Result;
use super::fault::{classify, FaultInfo, FaultKind};
use super::formatter::LineTemplate;
use super::level::Level;
use super::record::LogRecord;
use super::timestamp::TimePattern;
use crate::sinks::{ConsoleSink, RotatingFileSink};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::error::Error;
use std::panic::Location;
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

/// Message on the intake queue: a record to persist, or the stop signal.
enum Envelope {
    Record(LogRecord),
    Shutdown,
}

/// The logging pipeline handle.
///
/// Clones share one pipeline. Dropping the last handle drains the queue and
/// closes the file, the same as calling [`Pipeline::shutdown`] explicitly.
///
/// # Examples
///
/// ```no_run
/// use logpipe::{Pipeline, PipelineConfig};
///
/// let log = Pipeline::init(PipelineConfig::new("app.log")).unwrap();
/// log.info("application started");
/// log.shutdown();
/// ```
#[derive(Clone)]
pub struct Pipeline {
    inner: Arc<PipelineInner>,
}

pub(crate) struct PipelineInner {
    min_level: Level,
    pattern: TimePattern,
    console_template: LineTemplate,
    console: Option<ConsoleSink>,
    sender: Sender<Envelope>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Pipeline {
    /// Initialize the pipeline.
    ///
    /// Fails fast on an invalid configuration or an unwritable destination;
    /// no partial pipeline is left running on error. Installing the panic
    /// hook is a process-global side effect (there is one hook per process);
    /// disable it via [`PipelineConfig::install_fault_hook`] when the host
    /// application manages its own.
    ///
    /// # Errors
    ///
    /// Returns a configuration, template, or sink error.
    pub fn init(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let pattern = TimePattern::new(&config.time_pattern);
        pattern.validate()?;
        let console_template = LineTemplate::parse(&config.console_template)?;
        let file_template = LineTemplate::parse(&config.file_template)?;
        let sink = RotatingFileSink::open(
            &config.destination_path,
            config.max_file_size_bytes(),
            config.max_backup_count,
        )?;

        let console = config.emit_to_console.then(ConsoleSink::new);
        let (sender, receiver) = unbounded();

        let dispatcher = Dispatcher {
            receiver,
            sink,
            file_template,
            pattern: pattern.clone(),
            console: console.clone(),
            console_template: console_template.clone(),
        };
        let worker = thread::Builder::new()
            .name("logpipe-dispatcher".to_string())
            .spawn(move || dispatcher.run())?;

        let inner = Arc::new(PipelineInner {
            min_level: config.minimum_level,
            pattern,
            console_template,
            console,
            sender,
            worker: Mutex::new(Some(worker)),
        });

        if config.install_fault_hook {
            install_fault_hook(Arc::downgrade(&inner));
        }

        Ok(Self { inner })
    }

    /// Stop the pipeline: signal the dispatcher, block until the queue is
    /// drained and the file is flushed and closed. Idempotent; every record
    /// pushed before this call reaches the file. Records logged through
    /// surviving clones afterward are discarded.
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }

    pub fn min_level(&self) -> Level {
        self.inner.min_level
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if level < self.inner.min_level {
            return;
        }
        let caller = Location::caller();
        self.inner
            .submit(LogRecord::new(level, message.into(), caller.file(), caller.line()));
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    /// Log an error value at CRITICAL severity with its trace attached:
    /// display text, the full `source()` chain, and a backtrace captured
    /// here. Intended to be called from the scope handling the error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use logpipe::{Pipeline, PipelineConfig};
    /// # let log = Pipeline::init(PipelineConfig::new("app.log")).unwrap();
    /// if let Err(error) = "zero".parse::<i32>() {
    ///     log.fault("failed to parse input", &error);
    /// }
    /// ```
    #[track_caller]
    pub fn fault(&self, message: impl Into<String>, error: &(dyn Error + 'static)) {
        let caller = Location::caller();
        self.inner.submit(
            LogRecord::new(Level::Critical, message.into(), caller.file(), caller.line())
                .with_fault(FaultInfo::from_error(error)),
        );
    }
}

impl PipelineInner {
    /// Route one record: synchronous console write on the calling thread,
    /// then a non-blocking push onto the intake queue for file delivery.
    fn submit(&self, record: LogRecord) {
        if let Some(console) = &self.console {
            let line = self.console_template.render(&record, &self.pattern);
            console.write(record.level, &line);
        }
        // Push never blocks; after shutdown the channel is disconnected and
        // the record is discarded.
        let _ = self.sender.send(Envelope::Record(record));
    }

    fn shutdown(&self) {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            let _ = self.sender.send(Envelope::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for PipelineInner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// The single background worker delivering queued records to the file sink.
struct Dispatcher {
    receiver: Receiver<Envelope>,
    sink: RotatingFileSink,
    file_template: LineTemplate,
    pattern: TimePattern,
    console: Option<ConsoleSink>,
    console_template: LineTemplate,
}

impl Dispatcher {
    fn run(mut self) {
        while let Ok(envelope) = self.receiver.recv() {
            match envelope {
                Envelope::Record(record) => self.deliver(record),
                Envelope::Shutdown => break,
            }
        }
        // Drain records that raced with the stop signal; nothing pushed
        // before shutdown is dropped.
        while let Ok(envelope) = self.receiver.try_recv() {
            if let Envelope::Record(record) = envelope {
                self.deliver(record);
            }
        }
        if let Err(error) = self.sink.flush() {
            self.report_failure(&error);
        }
        // The sink drops here, closing the file handle.
    }

    /// Write one record through the rotating sink. A sink failure is reported
    /// through the console sink when enabled and the record is dropped; the
    /// dispatcher itself never stops on I/O errors.
    fn deliver(&mut self, record: LogRecord) {
        let line = self.file_template.render(&record, &self.pattern);
        if let Err(error) = self.sink.write_line(&line) {
            self.report_failure(&error);
            return;
        }
        if let Err(error) = self.sink.flush() {
            self.report_failure(&error);
        }
    }

    fn report_failure(&self, error: &super::error::PipelineError) {
        if let Some(console) = &self.console {
            let notice = LogRecord::new(
                Level::Error,
                format!("record dropped: {}", error),
                file!(),
                line!(),
            );
            console.write(
                Level::Error,
                &self.console_template.render(&notice, &self.pattern),
            );
        }
    }
}

/// Install the process-wide panic hook, chained in front of whichever hook
/// was active. The hook holds a weak reference: once the pipeline is gone it
/// only delegates.
fn install_fault_hook(pipeline: Weak<PipelineInner>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if classify(info.payload()) == FaultKind::Interrupt {
            // Cancellation signal, not a fault: default handling only.
            previous(info);
            return;
        }
        if let Some(pipeline) = pipeline.upgrade() {
            let fault = FaultInfo::from_panic(info);
            let (file, line) = match info.location() {
                Some(location) => (location.file().to_string(), location.line()),
                None => ("unknown".to_string(), 0),
            };
            let record = LogRecord::new(
                Level::Critical,
                format!("Uncaught panic: {}", fault.description),
                file,
                line,
            )
            .with_fault(fault);
            pipeline.submit(record);
        }
        // Default termination behavior proceeds; the hook only observes.
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_config(path: &std::path::Path) -> PipelineConfig {
        PipelineConfig::new(path)
            .emit_to_console(false)
            .install_fault_hook(false)
    }

    #[test]
    fn test_init_and_shutdown() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("basic.log");
        let pipeline = Pipeline::init(quiet_config(&path)).unwrap();
        pipeline.info("first");
        pipeline.shutdown();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[INFO    ] - first"));
    }

    #[test]
    fn test_init_rejects_bad_config() {
        let dir = tempdir().unwrap();
        let config = quiet_config(&dir.path().join("bad.log")).max_backup_count(0);
        assert!(Pipeline::init(config).is_err());
    }

    #[test]
    fn test_init_rejects_bad_template() {
        let dir = tempdir().unwrap();
        let config = quiet_config(&dir.path().join("bad.log")).file_template("{what}");
        assert!(Pipeline::init(config).is_err());
    }

    #[test]
    fn test_init_rejects_bad_time_pattern() {
        let dir = tempdir().unwrap();
        let config = quiet_config(&dir.path().join("bad.log")).time_pattern("%Q");
        assert!(Pipeline::init(config).is_err());
    }

    #[test]
    fn test_minimum_level_filters_file_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filtered.log");
        let pipeline =
            Pipeline::init(quiet_config(&path).minimum_level(Level::Warning)).unwrap();
        pipeline.debug("too low");
        pipeline.info("still too low");
        pipeline.warning("kept");
        pipeline.shutdown();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("too low"));
        assert!(content.contains("kept"));
    }

    #[test]
    fn test_source_location_is_caller() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("location.log");
        let pipeline = Pipeline::init(quiet_config(&path)).unwrap();
        pipeline.info("here");
        pipeline.shutdown();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("pipeline.rs:"), "got: {}", content);
    }

    #[test]
    fn test_shutdown_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("twice.log");
        let pipeline = Pipeline::init(quiet_config(&path)).unwrap();
        pipeline.info("once");
        pipeline.shutdown();
        pipeline.shutdown();
        pipeline.info("after stop");

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("once"));
        assert!(!content.contains("after stop"));
    }

    #[test]
    fn test_drop_drains_queue() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dropped.log");
        {
            let pipeline = Pipeline::init(quiet_config(&path)).unwrap();
            for i in 0..100 {
                pipeline.info(format!("record {}", i));
            }
        }
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 100);
        assert!(content.contains("record 99"));
    }

    #[test]
    fn test_fault_attaches_trace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fault.log");
        let pipeline = Pipeline::init(quiet_config(&path)).unwrap();
        let error = "zero".parse::<i32>().unwrap_err();
        pipeline.fault("failed to parse input", &error);
        pipeline.shutdown();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[CRITICAL] - failed to parse input"));
        assert!(content.contains("invalid digit"));
    }
}
