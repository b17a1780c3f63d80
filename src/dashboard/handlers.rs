use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;

use super::error::DashboardError;
use super::navigation::{DashboardContext, Page, Section};
use super::views::{self, Frame, Notice};
use super::AppState;
use crate::chart::render_progress_chart;
use crate::database::Metrics;
use crate::errors::RepositoryError;
use crate::input;
use crate::progress::ProgressSummary;
use crate::report::{render_report, REPORT_CONTENT_TYPE, REPORT_FILENAME};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Personalising email of the page the form was posted from
    #[serde(default)]
    pub viewer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InternshipForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub msme_digitalized: String,
    #[serde(default)]
    pub viewer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub viewer: Option<String>,
}

/// # GET /
/// Welcome page, or the dashboard once `page=main`.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(ctx): Query<DashboardContext>,
) -> Html<String> {
    match ctx.page {
        Page::Welcome => Html(views::welcome_page()),
        Page::Main => render_main(&state, &ctx, Vec::new()).await,
    }
}

/// # POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Html<String> {
    let ctx = DashboardContext::main(Section::Register, form.viewer.as_deref());

    let notice = match input::registration(&form.name, &form.email) {
        Err(e) => Notice::Error(e.to_string()),
        Ok((name, email)) => match state.repo.register_student(&name, &email).await {
            Ok(()) => {
                info!("Registered student {}", email);
                Notice::Success(format!("Welcome aboard, {}! You're registered.", name))
            }
            Err(e) => {
                error!("Error registering student: {}", e);
                Notice::Error(format!("Error registering student: {}", e))
            }
        },
    };

    render_main(&state, &ctx, vec![notice]).await
}

/// # POST /internships
pub async fn log_internship(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InternshipForm>,
) -> Html<String> {
    let ctx = DashboardContext::main(Section::LogInternship, form.viewer.as_deref());

    let validated = input::internship(
        &form.email,
        &form.company,
        &form.duration,
        &form.feedback,
        &form.msme_digitalized,
    );

    let notice = match validated {
        Err(e) => Notice::Error(e.to_string()),
        Ok((email, internship)) => match state.repo.log_internship(&email, &internship).await {
            Ok(id) => {
                info!("Logged internship {} for {}", id, email);
                Notice::Success(
                    "Internship logged successfully! You're making great progress!".to_string(),
                )
            }
            Err(RepositoryError::StudentNotFound(email)) => {
                warn!("Internship submitted for unknown email {}", email);
                Notice::Error("Student email not found.".to_string())
            }
            Err(e) => {
                error!("Error logging internship: {}", e);
                Notice::Error(format!("Error logging internship: {}", e))
            }
        },
    };

    render_main(&state, &ctx, vec![notice]).await
}

/// # POST /feedback
/// Only a personalised (known) student may leave feedback.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FeedbackForm>,
) -> Html<String> {
    let ctx = DashboardContext::main(Section::Feedback, form.viewer.as_deref());

    let notice = match submit_feedback_inner(&state, &ctx, &form).await {
        Ok(notice) => notice,
        Err(e) => {
            error!("Error logging feedback: {}", e);
            Notice::Error(format!("Error logging feedback: {}", e))
        }
    };

    render_main(&state, &ctx, vec![notice]).await
}

async fn submit_feedback_inner(
    state: &AppState,
    ctx: &DashboardContext,
    form: &FeedbackForm,
) -> Result<Notice, RepositoryError> {
    let Some(email) = ctx.email() else {
        return Ok(Notice::Warning(
            "Please enter your email in the sidebar to provide feedback.".to_string(),
        ));
    };
    let Some(student) = state.repo.find_student(email).await? else {
        return Ok(Notice::Warning(
            "Please enter your email in the sidebar to provide feedback.".to_string(),
        ));
    };
    let rating = match input::parse_rating(&form.rating) {
        Ok(rating) => rating,
        Err(e) => return Ok(Notice::Error(e.to_string())),
    };

    state
        .repo
        .log_feedback(student.student_id, rating, form.comments.trim())
        .await?;
    info!("Feedback ({}) recorded for {}", rating, email);

    Ok(Notice::Success(
        "Thank you for your feedback! We're listening.".to_string(),
    ))
}

/// # GET /report.pdf
/// Generates the report on demand; the temporary file is gone before the
/// response is sent.
pub async fn download_report(
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let rows = state.repo.fetch_reports().await?;
    if rows.is_empty() {
        return Err(DashboardError::NotFound(
            "No internship data available to generate a report.".to_string(),
        ));
    }

    let bytes = tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>, DashboardError> {
        match render_report(&rows)? {
            Some(document) => Ok(Some(document.into_bytes()?)),
            None => Ok(None),
        }
    })
    .await
    .map_err(|e| DashboardError::Internal(format!("Report task failed: {}", e)))??;

    let Some(bytes) = bytes else {
        return Err(DashboardError::NotFound(
            "No internship data available to generate a report.".to_string(),
        ));
    };

    info!("Serving report ({} bytes)", bytes.len());
    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Assemble the main page for `ctx`, appending any failures to `notices`
pub(crate) async fn render_main(
    state: &AppState,
    ctx: &DashboardContext,
    mut notices: Vec<Notice>,
) -> Html<String> {
    let student = match ctx.email() {
        Some(email) => match state.repo.fetch_student_data(email).await {
            Ok(student) => student,
            Err(e) => {
                error!("Error fetching student data: {}", e);
                notices.push(Notice::Error(format!("Error fetching student data: {}", e)));
                None
            }
        },
        None => None,
    };

    let metrics = match state.repo.fetch_metrics().await {
        Ok(metrics) => metrics,
        Err(e) => {
            error!("Error fetching metrics: {}", e);
            notices.push(Notice::Error(format!("Error fetching metrics: {}", e)));
            Metrics::default()
        }
    };

    let body = match ctx.section {
        Section::Progress => {
            let summary = student
                .as_ref()
                .map(|s| ProgressSummary::from_internships(&s.internships));
            let chart = match &student {
                Some(s) => match render_progress_chart(&s.internships) {
                    Ok(chart) => chart,
                    Err(e) => {
                        error!("Error rendering chart: {}", e);
                        notices.push(Notice::Error(format!("Error rendering chart: {}", e)));
                        None
                    }
                },
                None => None,
            };
            views::progress_section(student.as_ref(), summary.as_ref(), chart.as_ref())
        }
        Section::Register => views::register_section(ctx),
        Section::LogInternship => views::log_internship_section(ctx),
        Section::Opportunities => views::opportunities_section(),
        Section::Feedback => {
            views::feedback_section(ctx, student.as_ref().map(|s| &s.student))
        }
        Section::Report => match state.repo.fetch_reports().await {
            Ok(rows) => views::report_section(rows.len()),
            Err(e) => {
                error!("Error fetching reports: {}", e);
                notices.push(Notice::Error(format!("Error fetching reports: {}", e)));
                views::report_section(0)
            }
        },
    };

    let frame = Frame {
        ctx,
        metrics,
        greeting: student.as_ref().map(|s| s.student.name.as_str()),
        notices: &notices,
    };
    Html(views::main_page(&frame, &body))
}
