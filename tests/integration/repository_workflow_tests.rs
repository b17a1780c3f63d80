/*!
 * Repository behaviour against a file-backed database
 */

use kyra::database::NewInternship;
use kyra::{Metrics, Repository, RepositoryError};
use crate::common;

#[tokio::test]
async fn test_registerStudent_twice_shouldKeepOneRow() {
    let (_dir, repo) = common::file_repository().unwrap();

    repo.register_student("Alice", "a@x.com").await.unwrap();
    repo.register_student("Alicia", "a@x.com").await.unwrap();

    let student = repo.find_student("a@x.com").await.unwrap().unwrap();
    assert_eq!(student.name, "Alice");
}

#[tokio::test]
async fn test_logInternship_withUnknownEmail_shouldLeaveTablesUntouched() {
    let (_dir, repo) = common::file_repository().unwrap();

    let result = repo
        .log_internship("ghost@x.com", &NewInternship::new("Acme", "1 month", "", 3))
        .await;

    assert!(matches!(result, Err(RepositoryError::StudentNotFound(ref e)) if e == "ghost@x.com"));
    assert!(repo.fetch_reports().await.unwrap().is_empty());
    assert_eq!(repo.fetch_metrics().await.unwrap(), Metrics::default());
}

#[tokio::test]
async fn test_metrics_withTwoStudents_shouldAggregate() {
    let (_dir, repo) = common::file_repository().unwrap();
    common::seed_student(&repo, "Alice", "a@x.com", &[("Acme", 2), ("Beta", 3)]).await.unwrap();
    common::seed_student(&repo, "Bob", "b@x.com", &[("Gamma", 0)]).await.unwrap();
    repo.register_student("Carol", "c@x.com").await.unwrap();

    let metrics = repo.fetch_metrics().await.unwrap();

    assert_eq!(metrics.total_internships, 3);
    assert_eq!(metrics.total_msmes, 5);
    assert_eq!(metrics.students_with_internships, 2);
}

#[tokio::test]
async fn test_fetchReports_shouldSkipStudentsWithoutInternships() {
    let (_dir, repo) = common::file_repository().unwrap();
    common::seed_student(&repo, "Alice", "a@x.com", &[("Acme", 2)]).await.unwrap();
    repo.register_student("Carol", "c@x.com").await.unwrap();

    let rows = repo.fetch_reports().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Alice");
    assert_eq!(rows[0].company_name, "Acme");
    assert_eq!(rows[0].msme_digitalized, 2);
}

#[tokio::test]
async fn test_reopen_shouldPreserveDataAndSchema() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::database_path(&dir);

    {
        let repo = Repository::open(&path).unwrap();
        common::seed_student(&repo, "Alice", "a@x.com", &[("Acme", 4)]).await.unwrap();
    }

    let repo = Repository::open(&path).unwrap();
    let progress = repo.fetch_student_data("a@x.com").await.unwrap().unwrap();

    assert_eq!(progress.student.name, "Alice");
    assert_eq!(progress.internships.len(), 1);
    assert_eq!(progress.total_msmes(), 4);
}

#[tokio::test]
async fn test_feedback_shouldBeListedForStudent() {
    let (_dir, repo) = common::file_repository().unwrap();
    repo.register_student("Alice", "a@x.com").await.unwrap();
    let student = repo.find_student("a@x.com").await.unwrap().unwrap();

    repo.log_feedback(student.student_id, 5, "Loved it").await.unwrap();
    repo.log_feedback(student.student_id, 2, "").await.unwrap();

    let feedback = repo.fetch_feedback(student.student_id).await.unwrap();
    assert_eq!(feedback.len(), 2);
    assert_eq!(feedback[0].rating, 5);
    assert_eq!(feedback[0].comments, "Loved it");
    assert_eq!(feedback[1].rating, 2);
}
