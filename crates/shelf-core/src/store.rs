//! Unified storage interface
//!
//! The `Store` owns the in-memory catalog and coordinates it with the
//! persisted document. Every mutating operation applies the change to
//! the catalog and then rewrites the full document on disk before
//! returning.
//!
//! ## Usage
//!
//! ```text
//! let mut store = Store::open()?;  // Loads existing data, or starts empty
//!
//! let book = store.add_book("Dune", "Frank Herbert", 1965)?;
//! store.borrow_book(book.id, "Alice")?;
//!
//! let available = store.list(ListFilter::Available);
//! ```

use anyhow::{Context, Result};

use crate::catalog::{Catalog, CatalogStats, ListFilter};
use crate::config::Config;
use crate::models::{Book, BookUpdate};
use crate::storage::CatalogPersistence;

/// Unified storage interface for the book catalog
///
/// Keeps the in-memory catalog and the persisted document in step.
pub struct Store {
    /// The in-memory catalog
    catalog: Catalog,
    /// Document persistence handler
    persistence: CatalogPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store, loading the persisted catalog if one exists
    ///
    /// A missing or unreadable document starts the catalog empty; see
    /// `CatalogPersistence::load` for the corrupt-file handling.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = CatalogPersistence::new(config.clone());
        let catalog = persistence
            .load_or_default()
            .context("Failed to load catalog")?;

        Ok(Self {
            catalog,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the catalog has no records yet
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    // ==================== Record Operations ====================

    /// Add a new book and persist the catalog
    pub fn add_book(&mut self, title: &str, author: &str, year: i32) -> Result<Book> {
        let book = self.catalog.add(title, author, year)?;
        self.save()?;
        Ok(book)
    }

    /// Apply a partial update to a book and persist the catalog
    pub fn update_book(&mut self, id: u64, changes: BookUpdate) -> Result<Book> {
        let book = self.catalog.update(id, changes)?;
        self.save()?;
        Ok(book)
    }

    /// Delete a book and persist the catalog
    pub fn delete_book(&mut self, id: u64) -> Result<()> {
        self.catalog.delete(id)?;
        self.save()
    }

    /// Lend a book out and persist the catalog
    pub fn borrow_book(&mut self, id: u64, borrower: &str) -> Result<Book> {
        let book = self.catalog.borrow_book(id, borrower)?;
        self.save()?;
        Ok(book)
    }

    /// Take a borrowed book back and persist the catalog
    pub fn return_book(&mut self, id: u64) -> Result<Book> {
        let book = self.catalog.return_book(id)?;
        self.save()?;
        Ok(book)
    }

    // ==================== Queries ====================

    /// Get a book by id
    pub fn get_book(&self, id: u64) -> Option<&Book> {
        self.catalog.get(id)
    }

    /// List books, optionally restricted to available ones
    pub fn list(&self, filter: ListFilter) -> Vec<&Book> {
        self.catalog.list(filter)
    }

    /// Case-insensitive substring search over title and author
    pub fn search(&self, query: &str) -> Vec<&Book> {
        self.catalog.search(query)
    }

    /// Count records by availability
    pub fn stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    /// Rewrite the full catalog document on disk
    fn save(&mut self) -> Result<()> {
        self.persistence
            .save(&self.catalog)
            .context("Failed to persist catalog")
    }
}
