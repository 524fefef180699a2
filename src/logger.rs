use std::{io, path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `RUST_LOG` nor the caller supplies a valid one.
pub const DEFAULT_FILTER: &str = "bitcastle=info";

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize file logging once for the whole process. Later calls are no-ops.
/// - `path`: e.g., "logs/bitcastle.log"
/// - `filter`: e.g., "bitcastle::search=debug", overridden by `RUST_LOG`
pub fn init_logging<P: AsRef<Path>>(path: P, filter: &str) -> io::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let path = path.as_ref();
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    // Dropping the guard would stop the writer thread.
    let _ = GUARD.set(guard);

    let env_filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking)
        .finish();

    // Someone else may already own the global subscriber (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
    let _ = INIT.set(());
    Ok(())
}
