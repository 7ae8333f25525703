use crate::experiment::ExperimentError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use fairrec_core::{FairRecError, UserId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No corpus supplied and none loaded at start-up")]
    MissingCorpus,

    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] FairRecError),

    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCorpus | ApiError::InvalidRequest(_) | ApiError::Core(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnknownUser(_) => StatusCode::NOT_FOUND,
            ApiError::Experiment(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
