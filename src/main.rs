//! atlas-ops - hardcoded CRUD operations against the Atlas sample datasets
//!
//! A one-shot CLI: connects to the MongoDB deployment named by
//! `MONGODB_URI`, runs exactly one of six hardcoded CRUD operations
//! selected by the positional argument, prints the result, and exits.
//!
//! # Usage
//!
//! ```bash
//! atlas-ops 1    # fetch one movie by title
//! atlas-ops 5    # insert a city record with a random population
//! ```

use tracing::{Level, warn};

mod cli;
mod config;
mod connection;
mod error;
mod executor;
mod formatter;

use cli::CliInterface;
use connection::ConnectionManager;
use error::Result;
use executor::OperationExecutor;
use formatter::Formatter;

/// Application entry point
#[tokio::main]
async fn main() {
    // Every error category is fatal: log it and exit non-zero.
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Load `.env` if present (absence is only a warning)
/// 4. Validate the operation argument and resolve the URI
/// 5. Connect, dispatch the one operation, print, disconnect
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if dotenv::dotenv().is_err() {
        warn!("No .env file found");
    }

    // Both checks happen before any network traffic: a bad argument or a
    // missing URI must never reach the database.
    let operation = cli.operation()?;
    let uri = cli.resolve_uri()?;

    let mut manager = ConnectionManager::new(uri, cli.config().connection.clone());
    manager.connect().await?;

    let outcome = OperationExecutor::new(manager.client()?.clone())
        .execute(operation)
        .await;

    // The connection is torn down whether or not the operation succeeded.
    manager.disconnect().await?;

    let result = outcome?;
    let formatter = Formatter::from_config(&cli.config().display);
    println!("{}", formatter.format(&result)?);

    Ok(())
}

/// Initialize logging system based on verbosity level
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
