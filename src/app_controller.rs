use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::chart::render_progress_chart;
use crate::dashboard;
use crate::database::{Metrics, Repository, StudentProgress};
use crate::errors::{AppError, RepositoryError};
use crate::input;
use crate::progress::ProgressSummary;
use crate::report::render_report;

/// Main application controller: one method per user action
pub struct Controller {
    config: Config,
    repo: Repository,
}

impl Controller {
    /// Create a new controller for test purposes with an in-memory store
    pub fn new_for_test() -> Result<Self> {
        let repo = Repository::new_in_memory()?;
        Ok(Self {
            config: Config::default(),
            repo,
        })
    }

    /// Create a controller, opening the database named in the configuration
    ///
    /// The schema is initialized here, once per process.
    pub fn with_config(config: Config) -> Result<Self> {
        let repo = Repository::open(&config.database.path)?;
        Ok(Self { config, repo })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Run the HTTP dashboard
    pub async fn serve(&self) -> Result<()> {
        dashboard::run_server(self.repo.clone(), &self.config.server.bind_address()).await
    }

    pub async fn register(&self, name: &str, email: &str) -> Result<(), AppError> {
        let (name, email) = input::registration(name, email).map_err(input_error)?;
        self.repo.register_student(&name, &email).await?;
        info!("Registered {} <{}>", name, email);
        Ok(())
    }

    /// Returns the new internship id
    pub async fn log_internship(
        &self,
        email: &str,
        company: &str,
        duration: &str,
        feedback: &str,
        msme_digitalized: u32,
    ) -> Result<i64, AppError> {
        let (email, internship) =
            input::internship_record(email, company, duration, feedback, msme_digitalized)
                .map_err(input_error)?;

        let id = self.repo.log_internship(&email, &internship).await?;
        info!("Logged internship {} at {} for {}", id, internship.company_name, email);
        Ok(id)
    }

    /// Feedback is keyed by the student's email; unknown emails are rejected
    pub async fn submit_feedback(
        &self,
        email: &str,
        rating: u8,
        comments: &str,
    ) -> Result<i64, AppError> {
        if !input::RATING_RANGE.contains(&rating) {
            return Err(input_error(input::InputError::InvalidRating(rating.to_string())));
        }

        let student = self
            .repo
            .find_student(email.trim())
            .await?
            .ok_or_else(|| RepositoryError::StudentNotFound(email.trim().to_string()))?;

        Ok(self
            .repo
            .log_feedback(student.student_id, rating, comments.trim())
            .await?)
    }

    /// A student's internships with the derived progress summary
    pub async fn progress(
        &self,
        email: &str,
    ) -> Result<Option<(StudentProgress, ProgressSummary)>, AppError> {
        let Some(student) = self.repo.fetch_student_data(email.trim()).await? else {
            return Ok(None);
        };
        let summary = ProgressSummary::from_internships(&student.internships);
        Ok(Some((student, summary)))
    }

    pub async fn metrics(&self) -> Result<Metrics, AppError> {
        Ok(self.repo.fetch_metrics().await?)
    }

    /// Write the PDF report to `output`; returns the page count, or `None`
    /// when there is nothing to report
    pub async fn export_report(&self, output: &Path) -> Result<Option<usize>, AppError> {
        let rows = self.repo.fetch_reports().await?;
        let Some(document) = render_report(&rows)? else {
            warn!("No internship data available to generate a report.");
            return Ok(None);
        };

        let pages = document.page_count();
        let bytes = document.into_bytes()?;
        std::fs::write(output, bytes)?;
        info!("Report written to {:?} ({} page(s))", output, pages);
        Ok(Some(pages))
    }

    /// Write a student's progress chart as PNG; `false` when the student is
    /// unknown or has no internships
    pub async fn export_chart(&self, email: &str, output: &Path) -> Result<bool, AppError> {
        let Some(student) = self.repo.fetch_student_data(email.trim()).await? else {
            return Ok(false);
        };
        let Some(chart) = render_progress_chart(&student.internships)? else {
            return Ok(false);
        };

        std::fs::write(output, &chart.png)?;
        info!("Chart written to {:?}", output);
        Ok(true)
    }
}

fn input_error(error: input::InputError) -> AppError {
    AppError::Input(error.to_string())
}
