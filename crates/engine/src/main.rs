//! FairRec Service - inclusive recommendation experiments over HTTP
//!
//! Port: 8090 (FAIRREC_PORT)

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use fairrec_core::{init_logging, load_dotenv, ConfigLoader, Corpus, LogConfig, Parameters, ServiceConfig};
use fairrec_engine::server::{self, AppState};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let log_config = LogConfig::from_env()?;
    init_logging(&log_config)?;

    // Load configuration
    let config = ServiceConfig::from_env()?;
    ConfigLoader::validate(&config)?;

    let defaults = Parameters::from_env()?;
    ConfigLoader::validate(&defaults)?;

    let corpus = match &config.corpus_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read corpus from {}", path.display()))?;
            let corpus = Corpus::from_json(&raw)
                .with_context(|| format!("Failed to parse corpus from {}", path.display()))?;
            info!(
                users = corpus.user_count(),
                items = corpus.item_count(),
                "Loaded start-up corpus"
            );
            Some(Arc::new(corpus))
        }
        None => None,
    };

    let state = web::Data::new(AppState::new(corpus, defaults));

    info!(
        host = %config.host,
        port = config.port,
        workers = config.workers,
        "Starting FairRec service"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(server::configure_routes)
            .wrap(Logger::default())
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
