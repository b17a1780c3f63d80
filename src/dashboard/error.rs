use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::errors::{RepositoryError, ReportError};

/// Failures that escape a handler as an HTTP error
///
/// Form handlers render repository failures inline instead; only the
/// download endpoint and internal faults end up here.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Converts a `DashboardError` into an HTTP response.
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            DashboardError::Repository(db_err) => {
                error!("Database error: {}", db_err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            DashboardError::Report(report_err) => {
                error!("Report error: {}", report_err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The report could not be generated".to_string(),
                )
            }
            DashboardError::Internal(message) => {
                error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            DashboardError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
