#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Tic-Tac-Toe Arena
//!
//! Play tic-tac-toe in the terminal against a friend or the computer.

pub mod cli_options;
pub mod config;
pub mod host;
pub mod logger;
pub mod session;
pub mod setup;
pub mod util;
pub mod view;

use crate::{
    cli_options::CliOptions,
    config::Config,
    host::Host,
    session::Session,
    view::TerminalView,
};
use anyhow::Context as _;
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use std::time::{
    Duration,
    Instant,
};
use tokio::runtime::Builder as RuntimeBuilder;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const TOKIO_RT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Data from the setup function
struct SetupData {
    tokio_rt: tokio::runtime::Runtime,
    config: Config,
    worker_guard: Option<WorkerGuard>,
}

/// Pre-main setup
fn setup(cli_options: CliOptions) -> anyhow::Result<SetupData> {
    eprintln!("starting tokio runtime...");
    let tokio_rt = RuntimeBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let config =
        setup::load_config(cli_options.config.as_deref()).context("failed to load config")?;

    // Everything past here is assumed to need tokio
    let _enter_guard = tokio_rt.handle().enter();

    eprintln!("setting up logger...");
    let worker_guard = logger::setup(&config.log).context("failed to initialize logger")?;

    eprintln!();
    Ok(SetupData {
        tokio_rt,
        config,
        worker_guard,
    })
}

/// The main entry.
///
/// Sets up the program and calls `real_main`.
/// This allows more things to drop correctly.
/// Setup errors go to the stderr, as the loggers are not initialized yet.
fn main() -> anyhow::Result<()> {
    // This line MUST run first.
    // It is needed to exit early if the options are invalid,
    // and this will NOT run destructors if it does so.
    let cli_options = argh::from_env();

    let setup_data = setup(cli_options)?;
    real_main(setup_data)?;
    Ok(())
}

/// The actual entry point
fn real_main(setup_data: SetupData) -> anyhow::Result<()> {
    let ret = setup_data.tokio_rt.block_on(async_main(setup_data.config));

    // Reading stdin parks a blocking thread, so this cannot wait forever.
    let shutdown_start = Instant::now();
    info!(
        "shutting down tokio runtime (shutdown timeout is {:?})...",
        TOKIO_RT_SHUTDOWN_TIMEOUT
    );
    setup_data
        .tokio_rt
        .shutdown_timeout(TOKIO_RT_SHUTDOWN_TIMEOUT);
    info!("shutdown tokio runtime in {:?}", shutdown_start.elapsed());

    info!("successful shutdown");

    // Logging no longer reliable past this point
    drop(setup_data.worker_guard);

    ret
}

/// The async entry
async fn async_main(config: Config) -> anyhow::Result<()> {
    let rng = match config.seed {
        Some(seed) => {
            info!(seed, "using seeded rng");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut session = Session::new(config.mode(), rng);
    session.new_game();

    let view = TerminalView::new(std::io::stdout());
    let mut host = Host::new(session, view, config.computer_delay());

    info!("starting game loop");
    host.run().await.context("game loop failed")?;

    Ok(())
}
