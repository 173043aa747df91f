//! Minimal tour of the pipeline: one handle, the five level methods, and an
//! error logged with its trace attached.
//!
//! Run with: `cargo run --example basic`

use logpipe::{Pipeline, PipelineConfig};

fn main() -> logpipe::Result<()> {
    let log = Pipeline::init(PipelineConfig::new("example.log"))?;

    log.debug("This is a debug message");
    log.info("This is an info message");
    log.warning("This is a warning message");
    log.error("This is an error message");
    log.critical("This is a critical message");

    if let Err(error) = "not a number".parse::<i32>() {
        log.fault("This is a captured fault", &error);
    }

    log.shutdown();
    Ok(())
}
