/*!
 * Database module for persistent storage of students, internships and
 * feedback.
 *
 * This module provides SQLite-based persistence for:
 * - Student registration (email is the natural key)
 * - Internship logging with MSME counts
 * - Feedback ratings
 * - Report rows and dashboard metrics
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
pub use models::{
    FeedbackRecord, InternshipRecord, Metrics, NewInternship, ReportRow, StudentProgress,
    StudentRecord,
};
