use crate::config::{
    Config,
    Severity,
};
use anyhow::{
    ensure,
    Context,
};
use camino::Utf8Path;

/// Load a config, or the defaults if there is no path.
///
/// This prints to the stderr directly.
/// It is intended to be called BEFORE the loggers are set up.
pub(crate) fn load_config(path: Option<&Utf8Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => {
            eprintln!("no config given, using defaults...");
            return Ok(Config::default());
        }
    };

    eprintln!("loading `{path}`...");
    let config = Config::load_from_path(path).with_context(|| format!("failed to load `{path}`"))?;

    eprintln!("validating config...");
    let mut error_count = 0;
    for message in config.validate() {
        match message.severity() {
            Severity::Warn => {
                eprintln!("validation warning: {}", message.error());
            }
            Severity::Error => {
                eprintln!("validation error: {}", message.error());
                error_count += 1;
            }
        }
    }

    ensure!(
        error_count == 0,
        "validation failed with {error_count} errors."
    );

    Ok(config)
}
