use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{CreateBookRequest, CreateReaderRequest};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{7,}$").unwrap());

/// Field-level validation rules. Pure functions: no store access, no side
/// effects.
pub struct Validator;

impl Validator {
    /// Validate that a text field is non-empty after trimming.
    pub fn validate_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField(field));
        }
        Ok(())
    }

    /// Validate a publication year: 0 up to the current calendar year.
    /// The upper bound is computed at call time, not cached at startup.
    pub fn validate_year(year: i32) -> Result<(), ValidationError> {
        let current = Utc::now().year();
        if year < 0 || year > current {
            return Err(ValidationError::YearOutOfRange(year, current));
        }
        Ok(())
    }

    /// Validate email syntax: local-part, "@", domain with at least one dot.
    pub fn validate_email(email: &str) -> Result<(), ValidationError> {
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    /// Validate a phone number: optional leading "+", then digits, spaces,
    /// hyphens, or parentheses, seven characters minimum.
    pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
        if !PHONE_RE.is_match(phone) {
            return Err(ValidationError::InvalidPhone(phone.to_string()));
        }
        Ok(())
    }

    /// Validate all fields of a new book. Checks run in a fixed order
    /// (title, author, year) and stop at the first violation.
    pub fn validate_new_book(req: &CreateBookRequest) -> Result<(), ValidationError> {
        Self::validate_non_empty("title", &req.title)?;
        Self::validate_non_empty("author", &req.author)?;
        Self::validate_year(req.year)?;
        Ok(())
    }

    /// Validate all fields of a new reader, in order: name, email, phone.
    pub fn validate_new_reader(req: &CreateReaderRequest) -> Result<(), ValidationError> {
        Self::validate_non_empty("name", &req.name)?;
        Self::validate_email(&req.email)?;
        Self::validate_phone(&req.phone)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_non_empty() {
        assert!(Validator::validate_non_empty("title", "War and Peace").is_ok());
        assert!(Validator::validate_non_empty("title", "  x  ").is_ok());
    }

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(
            Validator::validate_non_empty("title", ""),
            Err(ValidationError::EmptyField("title"))
        );
        // Whitespace-only counts as empty.
        assert_eq!(
            Validator::validate_non_empty("author", "   "),
            Err(ValidationError::EmptyField("author"))
        );
    }

    #[test]
    fn test_valid_year() {
        assert!(Validator::validate_year(0).is_ok());
        assert!(Validator::validate_year(1869).is_ok());
        assert!(Validator::validate_year(Utc::now().year()).is_ok());
    }

    #[test]
    fn test_invalid_year() {
        let current = Utc::now().year();
        assert_eq!(
            Validator::validate_year(current + 1),
            Err(ValidationError::YearOutOfRange(current + 1, current))
        );
        assert!(Validator::validate_year(-44).is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(Validator::validate_email("ivanov@example.com").is_ok());
        assert!(Validator::validate_email("a.b+tag@sub.domain.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(Validator::validate_email("").is_err());
        assert!(Validator::validate_email("ivanov").is_err());
        assert!(Validator::validate_email("ivanov@example").is_err());
        assert!(Validator::validate_email("ivanov@@example.com").is_err());
        assert!(Validator::validate_email("iva nov@example.com").is_err());
        assert!(Validator::validate_email("@example.com").is_err());
    }

    #[test]
    fn test_valid_phone() {
        assert!(Validator::validate_phone("1234567").is_ok());
        assert!(Validator::validate_phone("+7 (495) 123-45-67").is_ok());
        assert!(Validator::validate_phone("123 456 789").is_ok());
    }

    #[test]
    fn test_invalid_phone() {
        assert!(Validator::validate_phone("").is_err());
        assert!(Validator::validate_phone("123456").is_err()); // too short
        assert!(Validator::validate_phone("call me maybe").is_err());
        assert!(Validator::validate_phone("12345+67").is_err()); // "+" only leads
    }

    #[test]
    fn test_new_book_check_order() {
        let req = CreateBookRequest {
            title: "".to_string(),
            author: "X".to_string(),
            year: Utc::now().year() + 5,
            status: None,
        };
        // Title and year are both invalid; title is checked first.
        assert_eq!(
            Validator::validate_new_book(&req),
            Err(ValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn test_new_reader_check_order() {
        let req = CreateReaderRequest {
            name: "Ivan Ivanov".to_string(),
            email: "not-an-email".to_string(),
            phone: "short".to_string(),
        };
        assert_eq!(
            Validator::validate_new_reader(&req),
            Err(ValidationError::InvalidEmail("not-an-email".to_string()))
        );
    }
}
