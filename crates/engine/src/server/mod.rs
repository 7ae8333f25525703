pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::{
    recommend, run_experiment, ExperimentRequest, RecommendationRequest, RecommendationResponse,
};

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse, Responder};
use fairrec_core::{ConfigLoader, Corpus, Parameters};
use serde::Serialize;
use std::sync::Arc;

/// Request bodies may carry a whole corpus
const JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across all handlers
pub struct AppState {
    /// Corpus loaded at start-up, used when a request carries none
    pub corpus: Option<Arc<Corpus>>,
    /// Configured experiment parameters
    pub defaults: Parameters,
}

impl AppState {
    pub fn new(corpus: Option<Arc<Corpus>>, defaults: Parameters) -> Self {
        Self { corpus, defaults }
    }

    /// The request's corpus, else the start-up corpus
    pub fn resolve_corpus(&self, supplied: Option<Corpus>) -> Result<Arc<Corpus>, ApiError> {
        match supplied {
            Some(corpus) => Ok(Arc::new(corpus)),
            None => self.corpus.clone().ok_or(ApiError::MissingCorpus),
        }
    }

    /// The request's parameters, else the configured defaults; validated
    /// either way
    pub fn resolve_parameters(&self, supplied: Option<Parameters>) -> Result<Parameters, ApiError> {
        let parameters = supplied.unwrap_or(self.defaults);
        ConfigLoader::validate(&parameters)?;
        Ok(parameters)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
    corpus_loaded: bool,
}

/// Health check endpoint
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "fairrec-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        corpus_loaded: state.corpus.is_some(),
    })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidRequest(err.to_string()).into()
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(json_error_handler),
    )
    .route("/health", web::get().to(health))
    .service(
        web::scope("/api/v1")
            .route("/experiments", web::post().to(handlers::run_experiment))
            .route("/recommendations", web::post().to(handlers::recommend)),
    );
}
