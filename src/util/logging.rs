use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with tracing.
///
/// If `log_dir` is provided, logs will also be written to a file in that
/// directory. The `verbose` flag controls whether debug logs are shown.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("ui_guard=debug,warn")
    } else {
        EnvFilter::new("ui_guard=info,warn")
    };

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "ui_guard.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard must outlive the process for the writer to flush;
        // init_logging is called once, so leaking it is intentional.
        std::mem::forget(guard);

        registry
            .with(fmt::layer().with_target(true))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    Ok(())
}
