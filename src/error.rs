use std::num::ParseIntError;
use std::path::PathBuf;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failures while loading or running the trained artifacts.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("feature `{0}` is listed more than once")]
    DuplicateFeature(String),
    #[error("model has no `{0}` feature")]
    MissingFeature(String),
    #[error("{what}: expected {expected} values, found {found}")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("scaler parameters are empty")]
    EmptyScaler,
    #[error("failed to load ONNX model {path}: {reason}")]
    Onnx { path: PathBuf, reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("model produced no output")]
    EmptyOutput,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got `{value}`")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors surfaced to HTTP callers. Bodies are plain text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request ID")]
    UnknownRequest(String),
    #[error("Invalid value for {field}: `{value}`")]
    InvalidField { field: &'static str, value: String },
    #[error("Prediction failed")]
    Prediction(#[from] BundleError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnknownRequest(_) => StatusCode::NOT_FOUND,
            AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}
