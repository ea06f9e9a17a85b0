// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error("View already resolved: {0}")]
    ViewResolved(String),

    #[error("Transaction lookup timed out after {0} ms")]
    LookupTimeout(u128),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("HTTP client error: {0}")]
    HttpClientError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            AppError::ViewNotFound(_) => (StatusCode::NOT_FOUND, "Payment result view not found".to_string()),
            AppError::ViewResolved(_) => (StatusCode::CONFLICT, "Payment result already resolved".to_string()),
            AppError::LookupTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "Transaction lookup timed out".to_string()),
            AppError::Backend(_) => (StatusCode::BAD_GATEWAY, "Backend error".to_string()),
            AppError::ExternalApi(_) => (StatusCode::BAD_GATEWAY, "External API error".to_string()),
            AppError::ConfigurationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error".to_string()),
            AppError::HttpClientError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HTTP client error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Manual From implementations
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Backend(format!("JSON parsing error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApi(format!("HTTP request failed: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigurationError(format!("Invalid URL: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

// Helper conversion functions
impl AppError {
    pub fn backend(msg: impl Into<String>) -> Self {
        AppError::Backend(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn http_client(msg: impl Into<String>) -> Self {
        AppError::HttpClientError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
