/*!
 * Repository layer for database operations.
 *
 * Every operation is a single statement, except `log_internship`, whose
 * lookup-then-insert runs inside one transaction. Failures come back as
 * `RepositoryError`; nothing here panics or retries.
 */

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::{
    FeedbackRecord, InternshipRecord, Metrics, NewInternship, ReportRow, StudentProgress,
    StudentRecord,
};
use crate::errors::RepositoryError;

/// Result alias for repository operations
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a repository backed by the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = DatabaseConnection::new(path)?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection handle
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Students
    // =========================================================================

    /// Register a student
    ///
    /// Registering an email that already exists is a no-op and still counts
    /// as success; the existing name is kept.
    pub async fn register_student(&self, name: &str, email: &str) -> Result<()> {
        let name = name.to_string();
        let email = email.to_string();
        debug!("Registering student {}", email);

        self.db
            .execute_async(move |conn| {
                let inserted = conn.execute(
                    "INSERT INTO students (name, email) VALUES (?1, ?2) ON CONFLICT(email) DO NOTHING",
                    params![name, email],
                )?;
                if inserted == 0 {
                    debug!("Student {} already registered, keeping existing row", email);
                }
                Ok(())
            })
            .await?;

        Ok(())
    }

    /// Look up a student by email
    pub async fn find_student(&self, email: &str) -> Result<Option<StudentRecord>> {
        let email = email.to_string();

        let student = self
            .db
            .execute_async(move |conn| Ok(Self::find_student_sync(conn, &email)?))
            .await?;

        Ok(student)
    }

    /// Look up a student by email (synchronous version for use within transactions)
    fn find_student_sync(conn: &Connection, email: &str) -> rusqlite::Result<Option<StudentRecord>> {
        conn.query_row(
            "SELECT student_id, name, email FROM students WHERE email = ?1",
            [email],
            |row| {
                Ok(StudentRecord {
                    student_id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()
    }

    /// Fetch a student with their internships in the order they were logged
    pub async fn fetch_student_data(&self, email: &str) -> Result<Option<StudentProgress>> {
        let email = email.to_string();
        debug!("Fetching progress for {}", email);

        let progress = self
            .db
            .execute_async(move |conn| {
                let Some(student) = Self::find_student_sync(conn, &email)? else {
                    return Ok(None);
                };

                let mut stmt = conn.prepare(
                    r#"
                    SELECT internship_id, student_id, company_name, duration, feedback, msme_digitalized
                    FROM internships
                    WHERE student_id = ?1
                    ORDER BY internship_id
                    "#,
                )?;

                let internships = stmt
                    .query_map([student.student_id], |row| {
                        Ok(InternshipRecord {
                            internship_id: row.get(0)?,
                            student_id: row.get(1)?,
                            company_name: row.get(2)?,
                            duration: row.get(3)?,
                            feedback: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                            msme_digitalized: row.get::<_, Option<u32>>(5)?.unwrap_or_default(),
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(Some(StudentProgress { student, internships }))
            })
            .await?;

        Ok(progress)
    }

    // =========================================================================
    // Internships
    // =========================================================================

    /// Log an internship for the student registered under `email`
    ///
    /// Returns the new internship id. The lookup and the insert share one
    /// transaction, so a failed insert leaves nothing behind.
    pub async fn log_internship(&self, email: &str, internship: &NewInternship) -> Result<i64> {
        let email = email.to_string();
        let internship = internship.clone();
        debug!("Logging internship at {} for {}", internship.company_name, email);

        let lookup_email = email.clone();
        let inserted = self
            .db
            .transaction_async(move |tx| {
                let Some(student) = Self::find_student_sync(tx, &lookup_email)? else {
                    return Ok(None);
                };

                tx.execute(
                    r#"
                    INSERT INTO internships (student_id, company_name, duration, feedback, msme_digitalized)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        student.student_id,
                        internship.company_name,
                        internship.duration,
                        internship.feedback,
                        internship.msme_digitalized,
                    ],
                )?;

                Ok(Some(tx.last_insert_rowid()))
            })
            .await?;

        inserted.ok_or(RepositoryError::StudentNotFound(email))
    }

    // =========================================================================
    // Feedback
    // =========================================================================

    /// Record a feedback rating for a student
    ///
    /// The rating is stored as given; range checks belong to input handling.
    pub async fn log_feedback(&self, student_id: i64, rating: u8, comments: &str) -> Result<i64> {
        let comments = comments.to_string();
        debug!("Logging feedback ({}) for student {}", rating, student_id);

        let id = self
            .db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT INTO feedback (student_id, rating, comments) VALUES (?1, ?2, ?3)",
                    params![student_id, rating, comments],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        Ok(id)
    }

    /// All feedback left by a student, oldest first
    pub async fn fetch_feedback(&self, student_id: i64) -> Result<Vec<FeedbackRecord>> {
        let feedback = self
            .db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT feedback_id, student_id, rating, comments
                    FROM feedback
                    WHERE student_id = ?1
                    ORDER BY feedback_id
                    "#,
                )?;

                let rows = stmt
                    .query_map([student_id], |row| {
                        Ok(FeedbackRecord {
                            feedback_id: row.get(0)?,
                            student_id: row.get(1)?,
                            rating: row.get(2)?,
                            comments: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(rows)
            })
            .await?;

        Ok(feedback)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Every internship joined with its student's name and email
    ///
    /// No ordering is imposed; callers must not rely on the row order.
    pub async fn fetch_reports(&self) -> Result<Vec<ReportRow>> {
        let rows = self
            .db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT s.name, s.email, i.company_name, i.duration, i.feedback, i.msme_digitalized
                    FROM students s
                    JOIN internships i ON s.student_id = i.student_id
                    "#,
                )?;

                let rows = stmt
                    .query_map([], |row| {
                        Ok(ReportRow {
                            name: row.get(0)?,
                            email: row.get(1)?,
                            company_name: row.get(2)?,
                            duration: row.get(3)?,
                            feedback: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                            msme_digitalized: row.get::<_, Option<u32>>(5)?.unwrap_or_default(),
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(rows)
            })
            .await?;

        debug!("Fetched {} report rows", rows.len());
        Ok(rows)
    }

    /// Dashboard aggregates, one query each
    pub async fn fetch_metrics(&self) -> Result<Metrics> {
        let metrics = self
            .db
            .execute_async(|conn| {
                let total_internships: i64 =
                    conn.query_row("SELECT COUNT(*) FROM internships", [], |row| row.get(0))?;

                // SUM over an empty set is NULL in SQLite
                let msme_sum: Option<i64> = conn.query_row(
                    "SELECT SUM(msme_digitalized) FROM internships",
                    [],
                    |row| row.get(0),
                )?;
                let total_msmes = match msme_sum {
                    Some(sum) => sum,
                    None => 0,
                };

                let students_with_internships: i64 = conn.query_row(
                    "SELECT COUNT(DISTINCT student_id) FROM internships",
                    [],
                    |row| row.get(0),
                )?;

                Ok(Metrics {
                    total_internships,
                    total_msmes,
                    students_with_internships,
                })
            })
            .await?;

        Ok(metrics)
    }
}
