use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};

/// Starts console logging, filtered by `RUST_LOG` (default `info`).
///
/// The returned handle must be kept alive for the lifetime of the app.
pub fn setup() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(line_format)
        .start()?;

    log::info!("Adjust the log level by setting RUST_LOG. By default RUST_LOG=info");

    Ok(handle)
}

/// `LEVEL [time] [file:line] message`
fn line_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}
