/*!
 * Progress score and badges for a student's internship journey.
 */

use serde::Serialize;
use std::fmt;

use crate::database::InternshipRecord;

/// Points awarded per logged internship
pub const PERCENT_PER_INTERNSHIP: u32 = 20;

/// MSME total needed for the top performer badge
pub const TOP_PERFORMER_MSMES: u64 = 5;

/// Completion percentage: 20 per internship, capped at 100
pub fn progress_percent(internship_count: usize) -> u32 {
    let count = u32::try_from(internship_count).unwrap_or(u32::MAX);
    count.saturating_mul(PERCENT_PER_INTERNSHIP).min(100)
}

/// Achievements shown on the progress page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstInternship,
    TopPerformer,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::FirstInternship => "First Internship Completed!",
            Badge::TopPerformer => "Top Performer!",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Badge: {}", self.label())
    }
}

/// Everything the progress view shows about one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub internship_count: usize,
    pub msmes_digitalized: u64,
    pub percent: u32,
    pub badges: Vec<Badge>,
}

impl ProgressSummary {
    pub fn from_internships(internships: &[InternshipRecord]) -> Self {
        let internship_count = internships.len();
        let msmes_digitalized = internships
            .iter()
            .map(|i| u64::from(i.msme_digitalized))
            .sum();
        let percent = progress_percent(internship_count);

        let mut badges = Vec::new();
        if percent >= PERCENT_PER_INTERNSHIP {
            badges.push(Badge::FirstInternship);
        }
        if msmes_digitalized >= TOP_PERFORMER_MSMES {
            badges.push(Badge::TopPerformer);
        }

        Self {
            internship_count,
            msmes_digitalized,
            percent,
            badges,
        }
    }

    /// Progress as a fraction in 0.0..=1.0
    pub fn fraction(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}
