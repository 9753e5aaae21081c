use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The state a book is in. `issued` is entered and left only through the
/// loan service; `repair` only through a direct book update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
    Repair,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [BookStatus::Available, BookStatus::Issued, BookStatus::Repair];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Issued => "issued",
            BookStatus::Repair => "repair",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BookStatus::Available),
            "issued" => Ok(BookStatus::Issued),
            "repair" => Ok(BookStatus::Repair),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// The state of a loan record. `overdue` exists in the schema but no
/// operation produces it yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    Issued,
    Returned,
    Overdue,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Issued => "issued",
            IssueStatus::Returned => "returned",
            IssueStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issued" => Ok(IssueStatus::Issued),
            "returned" => Ok(IssueStatus::Returned),
            "overdue" => Ok(IssueStatus::Overdue),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

/// A registered reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reader {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// One loan of one book to one reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Issue {
    pub id: i64,
    pub book_id: i64,
    pub reader_id: i64,
    pub issue_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: IssueStatus,
}

/// Request to create a new book. Status defaults to `available`.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub status: Option<BookStatus>,
}

/// Request to update a book; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub status: Option<BookStatus>,
}

/// Request to register a new reader.
#[derive(Debug, Deserialize)]
pub struct CreateReaderRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Request to update a reader; absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReaderRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Request body for issuing a book to a reader.
#[derive(Debug, Deserialize)]
pub struct IssueBookRequest {
    pub reader_id: i64,
}
