//! Typed errors and HTTP mapping.

use crate::model::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("seed load: {0}")]
    Seed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Entity name as shown to clients, e.g. "Restaurant".
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

/// Body for 404 responses.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body for 400 responses.
#[derive(Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

fn validation_message(e: &ValidationError) -> &'static str {
    match e {
        ValidationError::PriceOutOfRange(_)
        | ValidationError::PriceNotInteger
        | ValidationError::UnreadableBody => "validation errors",
        ValidationError::InvalidReference => "Invalid pizza or restaurant ID",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorsBody {
                    errors: vec![validation_message(e).to_string()],
                }),
            )
                .into_response(),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "internal server error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
