//! The in-memory catalog
//!
//! `Catalog` holds the full set of book records plus the id counter, and
//! is the exact shape of the persisted JSON document. All operations
//! here are purely in-memory; `crate::store::Store` is responsible for
//! writing the document back after each mutation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Book, BookUpdate};

/// Errors produced by catalog operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No record with the given id
    #[error("No book with id {0}")]
    NotFound(u64),

    /// Borrow attempted on a book that is already out
    #[error("Book {id} is already borrowed by {borrower}")]
    AlreadyBorrowed { id: u64, borrower: String },

    /// Return attempted on a book that is on the shelf
    #[error("Book {0} is not currently borrowed")]
    NotBorrowed(u64),

    /// A required field was empty or otherwise unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Which records a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Every record in the catalog
    All,
    /// Only records currently on the shelf
    Available,
}

/// Catalog-wide counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
}

/// The full set of book records plus the id counter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// All book records, in insertion order
    #[serde(default)]
    pub books: Vec<Book>,
    /// Next id to allocate; ids are never reused after deletion
    #[serde(default = "default_next_id")]
    pub next_id: u64,
}

fn default_next_id() -> u64 {
    1
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True when the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find_mut(&mut self, id: u64) -> CatalogResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Get a record by id
    pub fn get(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Add a new book, returning the created record
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> CatalogResult<Book> {
        let title = non_empty(title, "title")?;
        let author = non_empty(author, "author")?;

        let id = self.allocate_id();
        let book = Book::new(id, title, author, year);
        self.books.push(book.clone());
        Ok(book)
    }

    /// List records sorted by author, then title (case-insensitive)
    pub fn list(&self, filter: ListFilter) -> Vec<&Book> {
        let mut items: Vec<&Book> = self
            .books
            .iter()
            .filter(|b| match filter {
                ListFilter::All => true,
                ListFilter::Available => b.available,
            })
            .collect();
        items.sort_by_key(|b| (b.author.to_lowercase(), b.title.to_lowercase()));
        items
    }

    /// Case-insensitive substring search over title and author
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply a partial update to a record
    pub fn update(&mut self, id: u64, changes: BookUpdate) -> CatalogResult<Book> {
        // Validate replacement text before touching the record
        let title = changes.title.map(|t| non_empty(&t, "title")).transpose()?;
        let author = changes.author.map(|a| non_empty(&a, "author")).transpose()?;

        let book = self.find_mut(id)?;
        if let Some(title) = title {
            book.title = title;
        }
        if let Some(author) = author {
            book.author = author;
        }
        if let Some(year) = changes.year {
            book.year = year;
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    /// Remove a record from the catalog
    pub fn delete(&mut self, id: u64) -> CatalogResult<()> {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        if self.books.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    /// Lend a book out to `borrower`
    pub fn borrow_book(&mut self, id: u64, borrower: &str) -> CatalogResult<Book> {
        let borrower = non_empty(borrower, "borrower name")?;

        let book = self.find_mut(id)?;
        if !book.available {
            return Err(CatalogError::AlreadyBorrowed {
                id,
                borrower: book.borrower.clone().unwrap_or_default(),
            });
        }
        book.lend_to(borrower);
        Ok(book.clone())
    }

    /// Take a borrowed book back
    pub fn return_book(&mut self, id: u64) -> CatalogResult<Book> {
        let book = self.find_mut(id)?;
        if book.available {
            return Err(CatalogError::NotBorrowed(id));
        }
        book.take_back();
        Ok(book.clone())
    }

    /// Count records by availability
    pub fn stats(&self) -> CatalogStats {
        let total = self.books.len();
        let available = self.books.iter().filter(|b| b.available).count();
        CatalogStats {
            total,
            available,
            borrowed: total - available,
        }
    }
}

fn non_empty(value: &str, field: &str) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidInput(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        catalog.add("Emma", "Jane Austen", 1815).unwrap();
        catalog.add("Persuasion", "Jane Austen", 1817).unwrap();
        catalog
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let catalog = sample_catalog();
        let ids: Vec<u64> = catalog.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.next_id, 4);
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.add("", "Frank Herbert", 1965),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(matches!(
            catalog.add("Dune", "   ", 1965),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_trims_fields() {
        let mut catalog = Catalog::new();
        let book = catalog.add("  Dune  ", " Frank Herbert ", 1965).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
    }

    #[test]
    fn test_list_appears_exactly_once() {
        let mut catalog = Catalog::new();
        catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        let matches = catalog
            .list(ListFilter::All)
            .iter()
            .filter(|b| b.title == "Dune")
            .count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn test_list_sorted_by_author_then_title() {
        let catalog = sample_catalog();
        let titles: Vec<&str> = catalog
            .list(ListFilter::All)
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Dune", "Emma", "Persuasion"]);
    }

    #[test]
    fn test_list_available_excludes_borrowed() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(1, "Alice").unwrap();

        assert_eq!(catalog.list(ListFilter::All).len(), 3);
        let available = catalog.list(ListFilter::Available);
        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|b| b.id != 1));
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search("dune").len(), 1);
        assert_eq!(catalog.search("AUSTEN").len(), 2);
        assert_eq!(catalog.search("ers").len(), 1); // P-ers-uasion
        assert!(catalog.search("tolkien").is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_nothing() {
        let catalog = sample_catalog();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_update_partial() {
        let mut catalog = sample_catalog();
        let updated = catalog
            .update(
                1,
                BookUpdate {
                    title: Some("Dune Messiah".to_string()),
                    year: Some(1969),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, "Frank Herbert");
        assert_eq!(updated.year, 1969);
    }

    #[test]
    fn test_update_not_found() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.update(99, BookUpdate::default()),
            Err(CatalogError::NotFound(99))
        );
    }

    #[test]
    fn test_update_rejects_empty_replacement() {
        let mut catalog = sample_catalog();
        let result = catalog.update(
            1,
            BookUpdate {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
        // Record untouched
        assert_eq!(catalog.get(1).unwrap().title, "Dune");
    }

    #[test]
    fn test_delete_removes_from_listings_and_search() {
        let mut catalog = sample_catalog();
        catalog.delete(1).unwrap();

        assert!(catalog.get(1).is_none());
        assert_eq!(catalog.list(ListFilter::All).len(), 2);
        assert!(catalog.search("Dune").is_empty());
    }

    #[test]
    fn test_delete_not_found() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.delete(5), Err(CatalogError::NotFound(5)));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut catalog = sample_catalog();
        catalog.delete(3).unwrap();
        let book = catalog.add("Hamlet", "William Shakespeare", 1603).unwrap();
        assert_eq!(book.id, 4);
    }

    #[test]
    fn test_borrow_sets_state() {
        let mut catalog = sample_catalog();
        let book = catalog.borrow_book(1, "Alice").unwrap();

        assert!(!book.available);
        assert_eq!(book.borrower.as_deref(), Some("Alice"));
        assert!(book.borrowed_at.is_some());
    }

    #[test]
    fn test_borrow_already_borrowed() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(1, "Alice").unwrap();

        assert_eq!(
            catalog.borrow_book(1, "Bob"),
            Err(CatalogError::AlreadyBorrowed {
                id: 1,
                borrower: "Alice".to_string()
            })
        );
    }

    #[test]
    fn test_borrow_not_found() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.borrow_book(1, "Alice"),
            Err(CatalogError::NotFound(1))
        );
    }

    #[test]
    fn test_borrow_rejects_empty_borrower() {
        let mut catalog = sample_catalog();
        assert!(matches!(
            catalog.borrow_book(1, "  "),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(catalog.get(1).unwrap().available);
    }

    #[test]
    fn test_return_clears_state() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(1, "Alice").unwrap();
        let book = catalog.return_book(1).unwrap();

        assert!(book.available);
        assert!(book.borrower.is_none());
        assert!(book.returned_at.is_some());
    }

    #[test]
    fn test_return_not_borrowed() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.return_book(1), Err(CatalogError::NotBorrowed(1)));
    }

    #[test]
    fn test_return_not_found() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.return_book(9), Err(CatalogError::NotFound(9)));
    }

    #[test]
    fn test_stats() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(1, "Alice").unwrap();

        let stats = catalog.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.borrowed, 1);
    }

    #[test]
    fn test_borrower_present_iff_unavailable() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(2, "Bob").unwrap();
        catalog.borrow_book(3, "Carol").unwrap();
        catalog.return_book(3).unwrap();

        for book in &catalog.books {
            assert_eq!(book.borrower.is_some(), !book.available);
        }
    }

    #[test]
    fn test_document_round_trip() {
        let mut catalog = sample_catalog();
        catalog.borrow_book(2, "Bob").unwrap();

        let json = serde_json::to_string_pretty(&catalog).unwrap();
        let parsed: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(catalog, parsed);
    }

    #[test]
    fn test_document_defaults_for_missing_fields() {
        // A bare document parses to an empty catalog with the counter at 1
        let parsed: Catalog = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.next_id, 1);
    }
}
