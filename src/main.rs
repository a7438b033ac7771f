use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::cli::Cli;
use bookshelf::storage::source;
use bookshelf::{CatalogService, RecordStore, SearchWorkers};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().config();
    config.validate()?;

    // Loading phase: single writer
    let mut catalog = CatalogService::new();
    catalog.load_file(&config.books_path)?;

    let queries = source::read_lines(&config.queries_path)?;
    tracing::info!(
        books = catalog.store().len(),
        queries = queries.len(),
        "catalog ready"
    );

    // Serving phase: read-only, replicated across workers
    let reports = SearchWorkers::new(&catalog, &config).run(&queries)?;
    for worker in &reports {
        tracing::info!(
            worker = worker.worker,
            destination = %worker.destination.display(),
            found = worker.report.found,
            not_found = worker.report.not_found,
            malformed = worker.report.malformed,
            "results written"
        );
    }

    Ok(())
}
