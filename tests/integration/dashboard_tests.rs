/*!
 * Dashboard handlers driven directly with extractors
 */

use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use std::sync::Arc;

use kyra::dashboard::handlers::{self, FeedbackForm, InternshipForm, RegisterForm};
use kyra::dashboard::{AppState, DashboardContext, Page, Section};
use kyra::Repository;
use crate::common;

fn state(repo: &Repository) -> State<Arc<AppState>> {
    State(Arc::new(AppState::new(repo.clone())))
}

fn internship_form(email: &str, company: &str, msmes: &str) -> InternshipForm {
    InternshipForm {
        email: email.to_string(),
        company: company.to_string(),
        duration: "3 months".to_string(),
        feedback: "Great".to_string(),
        msme_digitalized: msmes.to_string(),
        viewer: None,
    }
}

#[tokio::test]
async fn test_index_withDefaultContext_shouldRenderWelcome() {
    let (_dir, repo) = common::file_repository().unwrap();

    let Html(html) = handlers::index(state(&repo), Query(DashboardContext::default())).await;

    assert!(html.contains("Welcome to Ky'ra!"));
    assert!(html.contains("Get Started"));
    assert!(!html.contains("Navigate"));
}

#[tokio::test]
async fn test_index_withMainPage_shouldShowMetrics() {
    let (_dir, repo) = common::file_repository().unwrap();
    common::seed_student(&repo, "Alice", "a@x.com", &[("Acme", 2), ("Beta", 3)]).await.unwrap();

    let ctx = DashboardContext {
        page: Page::Main,
        section: Section::Progress,
        email: Some("a@x.com".to_string()),
    };
    let Html(html) = handlers::index(state(&repo), Query(ctx)).await;

    assert!(html.contains("Internships Completed<strong>2</strong>"));
    assert!(html.contains("MSMEs Supported<strong>5</strong>"));
    assert!(html.contains("Certifications Issued<strong>1</strong>"));
    assert!(html.contains("Hi Alice!"));
    assert!(html.contains("Internship Completion: 40%"));
    assert!(html.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn test_register_withBlankName_shouldNotTouchStore() {
    let (_dir, repo) = common::file_repository().unwrap();

    let form = RegisterForm {
        name: "   ".to_string(),
        email: "a@x.com".to_string(),
        viewer: None,
    };
    let Html(html) = handlers::register(state(&repo), Form(form)).await;

    assert!(html.contains("Please fill in all required fields."));
    assert!(repo.find_student("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_withValidInput_shouldStoreStudent() {
    let (_dir, repo) = common::file_repository().unwrap();

    let form = RegisterForm {
        name: "Alice".to_string(),
        email: "a@x.com".to_string(),
        viewer: None,
    };
    let Html(html) = handlers::register(state(&repo), Form(form)).await;

    assert!(html.contains("Welcome aboard, Alice!"));
    assert!(repo.find_student("a@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_logInternship_withUnknownEmail_shouldReportNotFound() {
    let (_dir, repo) = common::file_repository().unwrap();

    let Html(html) =
        handlers::log_internship(state(&repo), Form(internship_form("ghost@x.com", "Acme", "1"))).await;

    assert!(html.contains("Student email not found."));
    assert!(repo.fetch_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logInternship_withBadCount_shouldRejectBeforeStore() {
    let (_dir, repo) = common::file_repository().unwrap();
    repo.register_student("Alice", "a@x.com").await.unwrap();

    let Html(_) =
        handlers::log_internship(state(&repo), Form(internship_form("a@x.com", "Acme", "lots"))).await;

    assert!(repo.fetch_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logInternship_withValidInput_shouldStoreRecord() {
    let (_dir, repo) = common::file_repository().unwrap();
    repo.register_student("Alice", "a@x.com").await.unwrap();

    let Html(html) =
        handlers::log_internship(state(&repo), Form(internship_form("a@x.com", "Acme", "4"))).await;

    assert!(html.contains("Internship logged successfully!"));
    let metrics = repo.fetch_metrics().await.unwrap();
    assert_eq!(metrics.total_internships, 1);
    assert_eq!(metrics.total_msmes, 4);
}

#[tokio::test]
async fn test_submitFeedback_withoutViewer_shouldWarn() {
    let (_dir, repo) = common::file_repository().unwrap();

    let form = FeedbackForm {
        rating: "4".to_string(),
        comments: String::new(),
        viewer: None,
    };
    let Html(html) = handlers::submit_feedback(state(&repo), Form(form)).await;

    assert!(html.contains("Please enter your email in the sidebar to provide feedback."));
}

#[tokio::test]
async fn test_submitFeedback_withKnownViewer_shouldStoreRating() {
    let (_dir, repo) = common::file_repository().unwrap();
    repo.register_student("Alice", "a@x.com").await.unwrap();

    let form = FeedbackForm {
        rating: "4".to_string(),
        comments: " Nice ".to_string(),
        viewer: Some("a@x.com".to_string()),
    };
    let Html(html) = handlers::submit_feedback(state(&repo), Form(form)).await;

    assert!(html.contains("Thank you for your feedback!"));
    let student = repo.find_student("a@x.com").await.unwrap().unwrap();
    let feedback = repo.fetch_feedback(student.student_id).await.unwrap();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0].rating, 4);
    assert_eq!(feedback[0].comments, "Nice");
}

#[tokio::test]
async fn test_downloadReport_withNoData_shouldBeNotFound() {
    let (_dir, repo) = common::file_repository().unwrap();

    let response = handlers::download_report(state(&repo)).await.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_downloadReport_withData_shouldServePdf() {
    let (_dir, repo) = common::file_repository().unwrap();
    common::seed_student(&repo, "Alice", "a@x.com", &[("Acme", 2)]).await.unwrap();

    let response = handlers::download_report(state(&repo)).await.into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("internship_report.pdf"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.starts_with(b"%PDF"));
}
