/*!
 * # Ky'ra - Internship Journey Dashboard
 *
 * A single-user dashboard for tracking student internships.
 *
 * ## Features
 *
 * - Register students (email is the natural key)
 * - Log internships with company, duration, feedback and MSMEs digitalized
 * - Collect 1-5 feedback ratings
 * - Aggregate metrics and a capped progress score with badges
 * - Bar chart of MSMEs digitalized per internship (PNG)
 * - Flat PDF report of every internship
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite schema, connection handling and the repository
 * - `progress`: Progress score and badges
 * - `chart`: Chart rendering
 * - `report`: PDF report layout and rendering
 * - `input`: Validation of user-entered values
 * - `dashboard`: HTTP dashboard (axum)
 * - `app_controller`: Application controller used by the CLI
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod chart;
pub mod dashboard;
pub mod database;
pub mod errors;
pub mod input;
pub mod progress;
pub mod report;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use database::{Metrics, Repository, ReportRow, StudentProgress};
pub use errors::{AppError, ChartError, ReportError, RepositoryError};
