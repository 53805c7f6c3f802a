// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the client, hand it to the UI loop.
// - Returns `anyhow::Result` so configuration problems end the run with context.

use anyhow::Context;
use goodreads_cli::{ui::main_menu, GoodreadsClient};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports on stdout stay clean. Filter with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    // The developer key must be available before anything else happens.
    // See `ApiConfig::from_env` for where it is looked up.
    let client = GoodreadsClient::from_env().context("Failed to configure Goodreads client")?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(Arc::new(client))?;
    Ok(())
}
