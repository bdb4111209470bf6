//! Logging setup.

use std::ffi::OsStr;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// Setup logging with the given level.
///
/// Console output goes to stderr so reports on stdout stay machine-readable.
/// Pass `console = false` when something else owns the terminal (the
/// dashboard); only the file sink, if any, receives events then.
/// When `file` is set, logs are also written there; keep the returned guard
/// alive until exit or buffered lines are lost.
pub fn setup_logging(
    level: &str,
    json: bool,
    console: bool,
    file: Option<&Path>,
) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().unwrap_or_else(|| OsStr::new("sizer.log"));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer(json, console, std::io::stderr))
        .init();

    guard
}

fn console_layer<S, W>(
    json: bool,
    enabled: bool,
    writer: W,
) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if !enabled {
        return None;
    }
    let layer = fmt::layer().with_writer(writer);
    if json {
        Some(layer.json().boxed())
    } else {
        Some(layer.pretty().boxed())
    }
}
