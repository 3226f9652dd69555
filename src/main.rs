use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod bench;
mod config;
mod db;
mod metrics;
mod models;

use api::AppState;
use config::{Cli, Command, ServerConfig};
use db::{Database, PgExecutor};
use metrics::Metrics;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    // Structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,storefront_queries=debug")),
        )
        .init();

    let cli = Cli::parse();
    let database = Database::init(&cli.database)?;
    let metrics = Arc::new(Metrics::new()?);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&database, metrics, &cli.server).await,
        Command::Seed(seed) => {
            tracing::info!(?seed, "Seeding database");
            db::seed::seed(database.pool(), &seed).await.map(|summary| {
                tracing::info!(?summary, "Database seeded successfully");
            })
        }
        Command::Bench => {
            bench::run(&database.executor(metrics)).await;
            Ok(())
        }
    };

    database.shutdown().await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}

async fn serve(database: &Database, metrics: Arc<Metrics>, server: &ServerConfig) -> anyhow::Result<()> {
    database.probe().await;

    let state = web::Data::new(AppState::new(database.executor(metrics.clone()), metrics.clone()));
    let registry = web::Data::new(metrics);

    tracing::info!(host = %server.host, port = server.port, "Server running");

    let mut http = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(registry.clone())
            .configure(metrics::configure)
            .configure(api::configure::<PgExecutor>)
    });
    if let Some(workers) = server.workers {
        http = http.workers(workers);
    }

    http.bind((server.host.as_str(), server.port))?.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}
