//! Data models for shelf
//!
//! Defines the book record and its borrow lifecycle. The catalog in
//! `crate::catalog` owns the collection; records themselves are plain
//! serde structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single book record with its borrow state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier, allocated by the catalog
    pub id: u64,
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Whether the book is on the shelf
    pub available: bool,
    /// Who has the book, present only while it is borrowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    /// When the current loan started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrowed_at: Option<DateTime<Utc>>,
    /// When the book last came back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
    /// When this record was created
    pub created_at: DateTime<Utc>,
    /// When this record was last updated
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Create a new available book with the given id
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            available: true,
            borrower: None,
            borrowed_at: None,
            returned_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hand the book to `borrower`
    pub fn lend_to(&mut self, borrower: impl Into<String>) {
        self.available = false;
        self.borrower = Some(borrower.into());
        self.borrowed_at = Some(Utc::now());
        self.returned_at = None;
        self.updated_at = Utc::now();
    }

    /// Put the book back on the shelf
    pub fn take_back(&mut self) {
        self.available = true;
        self.borrower = None;
        self.returned_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

/// A partial update to a book record
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    /// New title, if changing
    pub title: Option<String>,
    /// New author, if changing
    pub author: Option<String>,
    /// New publication year, if changing
    pub year: Option<i32>,
}

impl BookUpdate {
    /// True when no field is being changed
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}
