//! Output formatting for the menu interface
//!
//! Keeps the rendering of records and messages in one place so every
//! handler prints the same way.

use shelf_core::{Book, CatalogStats};

/// One-line rendering of a record
pub fn format_book(book: &Book) -> String {
    let status = match book.borrower {
        Some(ref who) => format!("BORROWED by {}", who),
        None => "AVAILABLE".to_string(),
    };
    format!(
        "[{}] {} — {} ({})  :: {}",
        book.id, book.title, book.author, book.year, status
    )
}

/// Print a list of records with a count footer
pub fn print_books(books: &[&Book]) {
    if books.is_empty() {
        println!("(No books found.)");
        return;
    }
    for book in books {
        println!("{}", format_book(book));
    }
    println!("\n{} book(s)", books.len());
}

/// Print the stats block
pub fn print_stats(stats: &CatalogStats) {
    println!("Total books : {}", stats.total);
    println!("Available   : {}", stats.available);
    println!("Borrowed    : {}", stats.borrowed);
}

/// Print a success message
pub fn success(message: &str) {
    println!("✓ {}", message);
}

/// Print a user-facing error
pub fn error(err: &anyhow::Error) {
    eprintln!("✗ {:#}", err);
}
