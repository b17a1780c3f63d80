/*!
 * Validation of user-entered values.
 *
 * Everything the dashboard and the CLI collect goes through these checks
 * before a repository call is made; the repository itself trusts its input.
 */

use thiserror::Error;

use crate::database::NewInternship;

/// Lowest and highest accepted rating
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please fill in all required fields.")]
    MissingFields(Vec<&'static str>),

    #[error("MSMEs Digitalized must be a whole number of zero or more, got {0:?}")]
    InvalidCount(String),

    #[error("Rating must be between 1 and 5, got {0:?}")]
    InvalidRating(String),
}

/// Trim a value, mapping blank input to `None`
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Require every named field to be non-blank
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), InputError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| non_blank(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingFields(missing))
    }
}

/// Parse the MSME counter; blank input counts as zero
pub fn parse_msme_count(value: &str) -> Result<u32, InputError> {
    match non_blank(value) {
        None => Ok(0),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| InputError::InvalidCount(raw.to_string())),
    }
}

/// Parse a rating in 1..=5
pub fn parse_rating(value: &str) -> Result<u8, InputError> {
    let raw = value.trim();
    match raw.parse::<u8>() {
        Ok(rating) if RATING_RANGE.contains(&rating) => Ok(rating),
        _ => Err(InputError::InvalidRating(raw.to_string())),
    }
}

/// Validated registration input
pub fn registration(name: &str, email: &str) -> Result<(String, String), InputError> {
    require(&[("name", name), ("email", email)])?;
    Ok((name.trim().to_string(), email.trim().to_string()))
}

/// Validated internship input: the owner's email plus the record to insert
pub fn internship(
    email: &str,
    company: &str,
    duration: &str,
    feedback: &str,
    msme_count: &str,
) -> Result<(String, NewInternship), InputError> {
    let msmes = parse_msme_count(msme_count)?;
    internship_record(email, company, duration, feedback, msmes)
}

/// Validated internship input with an already typed MSME count
pub fn internship_record(
    email: &str,
    company: &str,
    duration: &str,
    feedback: &str,
    msme_count: u32,
) -> Result<(String, NewInternship), InputError> {
    require(&[("email", email), ("company", company), ("duration", duration)])?;

    Ok((
        email.trim().to_string(),
        NewInternship::new(company.trim(), duration.trim(), feedback.trim(), msme_count),
    ))
}
