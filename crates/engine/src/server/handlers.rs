//! Experiment and recommendation endpoints
//!
//! Recommendation and metric work is CPU-bound and runs on the blocking
//! thread pool.

use super::{ApiError, AppState};
use crate::baseline::BaselineRecommender;
use crate::experiment::ExperimentRunner;
use crate::inclusive::InclusiveRecommender;
use crate::recommender::Recommender;
use crate::types::{Algorithm, Recommendation};
use actix_web::{web, HttpResponse};
use fairrec_core::{Corpus, Parameters, UserId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Body of `POST /api/v1/experiments`
#[derive(Debug, Default, Deserialize)]
pub struct ExperimentRequest {
    /// Falls back to the start-up corpus
    #[serde(default)]
    pub corpus: Option<Corpus>,

    /// Falls back to the configured parameters
    #[serde(default)]
    pub parameters: Option<Parameters>,
}

/// Body of `POST /api/v1/recommendations`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub corpus: Option<Corpus>,

    #[serde(default)]
    pub parameters: Option<Parameters>,

    pub algorithm: Algorithm,

    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub algorithm: Algorithm,
    pub recommendations: Vec<Recommendation>,
}

/// POST /api/v1/experiments - Run a full baseline vs inclusive experiment
///
/// Returns the export document of the completed run.
#[instrument(skip(state, body))]
pub async fn run_experiment(
    state: web::Data<AppState>,
    body: web::Json<ExperimentRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let corpus = state.resolve_corpus(request.corpus)?;
    let parameters = state.resolve_parameters(request.parameters)?;

    info!(
        users = corpus.user_count(),
        items = corpus.item_count(),
        num_recommendations = parameters.num_recommendations,
        "Running experiment"
    );

    let export = web::block(move || {
        let mut runner = ExperimentRunner::new(corpus, parameters);
        runner.run()?;
        runner.export()
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(export))
}

/// POST /api/v1/recommendations - One user's list from one algorithm
#[instrument(skip(state, body), fields(user_id = body.user_id, algorithm = %body.algorithm))]
pub async fn recommend(
    state: web::Data<AppState>,
    body: web::Json<RecommendationRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let corpus = state.resolve_corpus(request.corpus)?;
    let parameters = state.resolve_parameters(request.parameters)?;
    let (user_id, algorithm) = (request.user_id, request.algorithm);

    if corpus.user(user_id).is_none() {
        return Err(ApiError::UnknownUser(user_id));
    }

    let recommendations = web::block(move || {
        let n = parameters.num_recommendations;
        match algorithm {
            Algorithm::Baseline => BaselineRecommender::new(corpus).recommend(user_id, n),
            Algorithm::Inclusive => {
                InclusiveRecommender::new(corpus, parameters.into()).recommend(user_id, n)
            }
        }
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(RecommendationResponse {
        user_id,
        algorithm,
        recommendations,
    }))
}
