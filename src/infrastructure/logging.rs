use anyhow::Result;
use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct PidTime;

impl tracing_subscriber::fmt::time::FormatTime for PidTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{} [{}]",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6fZ"),
            std::process::id()
        )
    }
}

/// Initialize tracing. All log output goes to stderr because stdout is
/// reserved for the JSON result; debug mode lowers the filter and adds a
/// daily-rolling file under `logs/`.
pub fn init_logging(service_name: &str, debug: bool) -> Result<()> {
    let default_filter = if debug { "debug" } else { "info" };
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(PidTime);

    if debug {
        let file_name = format!("{}.log", service_name);
        let file_appender = tracing_appender::rolling::daily("logs", file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Leak the guard so the writer thread survives past this function;
        // we are installing the global subscriber for the whole process.
        std::mem::forget(guard);

        registry
            .with(stderr_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_timer(PidTime),
            )
            .init();
    } else {
        registry.with(stderr_layer).init();
    }

    Ok(())
}
