/*!
 * End-to-end controller tests on a real database file
 */

use kyra::progress::Badge;
use kyra::{AppError, Config, Controller};
use crate::common;

fn controller(dir: &tempfile::TempDir) -> Controller {
    common::init_logging();
    let mut config = Config::default();
    config.database.path = common::database_path(dir);
    Controller::with_config(config).unwrap()
}

#[tokio::test]
async fn test_fullJourney_shouldTrackProgressAndExport() {
    let dir = common::create_temp_dir().unwrap();
    let app = controller(&dir);

    app.register("Alice", "a@x.com").await.unwrap();
    app.log_internship("a@x.com", "Acme", "3 months", "Great", 3).await.unwrap();
    app.log_internship("a@x.com", "Beta", "2 months", "", 4).await.unwrap();
    app.submit_feedback("a@x.com", 5, "Loved it").await.unwrap();

    let (student, summary) = app.progress("a@x.com").await.unwrap().unwrap();
    assert_eq!(student.internships.len(), 2);
    assert_eq!(summary.percent, 40);
    assert_eq!(summary.badges, vec![Badge::FirstInternship, Badge::TopPerformer]);

    let report_path = dir.path().join("report.pdf");
    assert_eq!(app.export_report(&report_path).await.unwrap(), Some(1));
    assert!(std::fs::read(&report_path).unwrap().starts_with(b"%PDF"));

    let chart_path = dir.path().join("chart.png");
    assert!(app.export_chart("a@x.com", &chart_path).await.unwrap());
    assert!(std::fs::read(&chart_path).unwrap().starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn test_exports_withEmptyDatabase_shouldWriteNothing() {
    let dir = common::create_temp_dir().unwrap();
    let app = controller(&dir);
    app.register("Carol", "c@x.com").await.unwrap();

    let report_path = dir.path().join("report.pdf");
    let chart_path = dir.path().join("chart.png");

    assert_eq!(app.export_report(&report_path).await.unwrap(), None);
    assert!(!app.export_chart("c@x.com", &chart_path).await.unwrap());
    assert!(!report_path.exists());
    assert!(!chart_path.exists());
}

#[tokio::test]
async fn test_submitFeedback_withUnknownEmail_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let app = controller(&dir);

    let result = app.submit_feedback("ghost@x.com", 3, "").await;

    assert!(matches!(result, Err(AppError::Repository(ref e)) if e.is_not_found()));
}

#[tokio::test]
async fn test_register_withBlankEmail_shouldBeInputError() {
    let dir = common::create_temp_dir().unwrap();
    let app = controller(&dir);

    let result = app.register("Alice", " ").await;

    assert!(matches!(result, Err(AppError::Input(_))));
    assert_eq!(app.metrics().await.unwrap().total_internships, 0);
}

#[tokio::test]
async fn test_controller_afterRestart_shouldSeeEarlierData() {
    let dir = common::create_temp_dir().unwrap();
    {
        let app = controller(&dir);
        app.register("Alice", "a@x.com").await.unwrap();
        app.log_internship("a@x.com", "Acme", "1 month", "", 1).await.unwrap();
    }

    let app = controller(&dir);
    let metrics = app.metrics().await.unwrap();
    assert_eq!(metrics.total_internships, 1);
    assert_eq!(metrics.students_with_internships, 1);
}
