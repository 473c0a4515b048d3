//! Binary entry point: load settings, seed the demo catalog, and drive the
//! Ratatui event loop until the user exits.
use anyhow::Context;
use library_loans::{run_app, seed, App, BookTable, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // The TUI shares the tty with stderr; only warnings show by default.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_loans=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let records = seed::sample_records(config.today).context("failed to build demo catalog")?;
    tracing::info!(books = records.len(), "starting library loans");

    let mut app = App::new(BookTable::new(records), config);
    run_app(&mut app)
}
