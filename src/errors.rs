/*!
 * Error types for the kyra application.
 *
 * This module contains custom error types for the different layers of the
 * dashboard, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors returned by repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No student is registered under the given email
    #[error("Student email not found: {0}")]
    StudentNotFound(String),

    /// SQLite rejected or failed a statement
    #[error("{0}")]
    Storage(#[from] rusqlite::Error),

    /// The store could not be reached (open, lock, worker thread)
    #[error("{0}")]
    Connection(String),
}

impl RepositoryError {
    /// Whether the failure is a lookup miss rather than a storage fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound(_))
    }
}

impl From<anyhow::Error> for RepositoryError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<rusqlite::Error>() {
            Ok(sqlite) => Self::Storage(sqlite),
            Err(other) => Self::Connection(format!("{:#}", other)),
        }
    }
}

/// Errors that can occur while writing the PDF report
#[derive(Error, Debug)]
pub enum ReportError {
    /// The temporary file could not be created, written or read
    #[error("Report file error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF writer failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Errors that can occur while rendering a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// PNG encoding failed
    #[error("Chart encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the repository
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Error from report generation
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Error from chart rendering
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    Input(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
