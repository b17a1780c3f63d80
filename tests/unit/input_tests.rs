/*!
 * Tests for user input validation
 */

use kyra::database::NewInternship;
use kyra::input::{self, InputError};

#[test]
fn test_registration_withBothFields_shouldTrim() {
    let (name, email) = input::registration(" Alice ", " a@x.com ").unwrap();
    assert_eq!(name, "Alice");
    assert_eq!(email, "a@x.com");
}

#[test]
fn test_registration_withMissingEmail_shouldNameField() {
    let error = input::registration("Alice", "").unwrap_err();
    assert_eq!(error, InputError::MissingFields(vec!["email"]));
}

#[test]
fn test_internship_withoutFeedback_shouldStillValidate() {
    let (_, internship) = input::internship("a@x.com", "Acme", "6 weeks", "", "").unwrap();
    assert_eq!(internship, NewInternship::new("Acme", "6 weeks", "", 0));
}

#[test]
fn test_internship_withNegativeCount_shouldFail() {
    let error = input::internship("a@x.com", "Acme", "6 weeks", "", "-3").unwrap_err();
    assert!(matches!(error, InputError::InvalidCount(ref raw) if raw == "-3"));
}

#[test]
fn test_parseRating_withWhitespace_shouldParse() {
    assert_eq!(input::parse_rating(" 3 "), Ok(3));
    assert!(matches!(input::parse_rating("3.5"), Err(InputError::InvalidRating(_))));
}
