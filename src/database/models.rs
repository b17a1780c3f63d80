/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database rows (or, for `ReportRow`,
 * to one row of the students/internships join).
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registered student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Surrogate key assigned by the store
    pub student_id: i64,
    pub name: String,
    /// Natural key used for every lookup
    pub email: String,
}

/// Internship as entered by the student
///
/// `msme_digitalized` is unsigned: negative counts are rejected before a
/// record ever reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInternship {
    pub company_name: String,
    /// Free text such as "3 months"
    pub duration: String,
    pub feedback: String,
    pub msme_digitalized: u32,
}

impl NewInternship {
    /// Create a new internship entry
    pub fn new(
        company_name: impl Into<String>,
        duration: impl Into<String>,
        feedback: impl Into<String>,
        msme_digitalized: u32,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            duration: duration.into(),
            feedback: feedback.into(),
            msme_digitalized,
        }
    }
}

/// Stored internship row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub internship_id: i64,
    pub student_id: i64,
    pub company_name: String,
    pub duration: String,
    /// Empty when the student left no feedback
    pub feedback: String,
    pub msme_digitalized: u32,
}

/// Stored feedback row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub feedback_id: i64,
    pub student_id: i64,
    /// Expected in 1..=5; the range is checked where input is collected
    pub rating: u8,
    pub comments: String,
}

/// A student together with their internships in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub student: StudentRecord,
    pub internships: Vec<InternshipRecord>,
}

impl StudentProgress {
    /// Sum of MSMEs digitalized across the student's internships
    pub fn total_msmes(&self) -> u64 {
        self.internships
            .iter()
            .map(|i| u64::from(i.msme_digitalized))
            .sum()
    }
}

/// One internship joined with its owner's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub email: String,
    pub company_name: String,
    pub duration: String,
    pub feedback: String,
    pub msme_digitalized: u32,
}

impl ReportRow {
    /// Create a report row
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company_name: impl Into<String>,
        duration: impl Into<String>,
        feedback: impl Into<String>,
        msme_digitalized: u32,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company_name: company_name.into(),
            duration: duration.into(),
            feedback: feedback.into(),
            msme_digitalized,
        }
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Email: {}, Company: {}, Duration: {}, Feedback: {}, MSMEs Digitalized: {}",
            self.name,
            self.email,
            self.company_name,
            self.duration,
            self.feedback,
            self.msme_digitalized
        )
    }
}

/// Dashboard-wide aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of internship rows
    pub total_internships: i64,
    /// Sum of `msme_digitalized`; zero when there are no internships
    pub total_msmes: i64,
    /// Distinct students with at least one internship ("certifications issued")
    pub students_with_internships: i64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Internships Completed: {}, MSMEs Supported: {}, Certifications Issued: {}",
            self.total_internships, self.total_msmes, self.students_with_internships
        )
    }
}
