use crate::config::LogConfig;
use anyhow::Context;
use camino::Utf8Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter,
    layer::SubscriberExt,
};

/// Try to setup a logger.
///
/// The returned guard flushes the log file when dropped, if there is one.
pub fn setup(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let level = config.level_filter()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_formatting_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_formatting_layer, worker_guard) = match config.file.as_deref() {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|parent| !parent.as_str().is_empty())
                .unwrap_or_else(|| Utf8Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file `{path}` has no file name"))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("failed to create log directory `{directory}`"))?;

            let file_appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, worker_guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);

            (Some(layer), Some(worker_guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(file_formatting_layer)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(worker_guard)
}
