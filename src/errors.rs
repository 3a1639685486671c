use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json
};
use thiserror::Error;
use tracing::error;

use crate::models::cost::CostError;
use crate::models::UpgradeError;

/// Message sent to clients for every internal failure
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Stored cost is invalid: {0}")]
    InvalidStoredCost(#[from] CostError),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Invalid ID format")]
    InvalidId,
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("Insufficient signupCoin to upgrade restraint")]
    InsufficientBalance,
    #[error("Restraint is already at the maximum level")]
    MaxLevel,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl From<UpgradeError> for ApiError {
    fn from(err: UpgradeError) -> Self {
        match err {
            UpgradeError::Cost(err) => ApiError::InvalidStoredCost(err),
            UpgradeError::MaxLevel => ApiError::MaxLevel,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(_) | ApiError::InvalidStoredCost(_) => {
                error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::InvalidId => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::MissingFields(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            ApiError::InsufficientBalance | ApiError::MaxLevel | ApiError::InvalidBody(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
