//! The interactive menu loop
//!
//! Presents the fixed numbered menu, prompts for the fields each
//! operation needs, and dispatches into the store. Domain and storage
//! errors are printed and the loop continues; only a failure on stdin
//! itself ends the session early.

use std::io::{self, Write};

use anyhow::Result;

use shelf_core::{BookUpdate, ListFilter, Store};

use crate::output;

/// One entry of the fixed menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ListAll,
    ListAvailable,
    Search,
    Update,
    Delete,
    Borrow,
    Return,
    Stats,
    Exit,
}

impl MenuChoice {
    /// Map a menu selection to its operation
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::ListAll),
            "3" => Some(Self::ListAvailable),
            "4" => Some(Self::Search),
            "5" => Some(Self::Update),
            "6" => Some(Self::Delete),
            "7" => Some(Self::Borrow),
            "8" => Some(Self::Return),
            "9" => Some(Self::Stats),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the menu loop until the user chooses to exit
pub fn run(store: &mut Store) -> Result<()> {
    println!("Welcome to shelf");
    loop {
        print_menu();
        let input = prompt("Choose: ")?;
        let Some(choice) = MenuChoice::parse(&input) else {
            println!("Invalid option.");
            continue;
        };
        if choice == MenuChoice::Exit {
            println!("Goodbye!");
            return Ok(());
        }
        if let Err(err) = dispatch(choice, store) {
            output::error(&err);
        }
    }
}

fn print_menu() {
    println!();
    println!("=== shelf ===");
    println!("1) Add book");
    println!("2) List all books");
    println!("3) List available books");
    println!("4) Search books");
    println!("5) Update a book");
    println!("6) Delete a book");
    println!("7) Borrow a book");
    println!("8) Return a book");
    println!("9) Stats");
    println!("0) Exit");
}

fn dispatch(choice: MenuChoice, store: &mut Store) -> Result<()> {
    match choice {
        MenuChoice::Add => add_book(store),
        MenuChoice::ListAll => {
            output::print_books(&store.list(ListFilter::All));
            Ok(())
        }
        MenuChoice::ListAvailable => {
            output::print_books(&store.list(ListFilter::Available));
            Ok(())
        }
        MenuChoice::Search => search_books(store),
        MenuChoice::Update => update_book(store),
        MenuChoice::Delete => delete_book(store),
        MenuChoice::Borrow => borrow_book(store),
        MenuChoice::Return => return_book(store),
        MenuChoice::Stats => {
            output::print_stats(&store.stats());
            Ok(())
        }
        MenuChoice::Exit => unreachable!(), // handled in run
    }
}

fn add_book(store: &mut Store) -> Result<()> {
    let title = prompt("Title: ")?;
    let author = prompt("Author: ")?;
    let year_input = prompt("Year (e.g. 1999): ")?;
    let Some(year) = parse_year(&year_input) else {
        println!("Year must be a number.");
        return Ok(());
    };

    let book = store.add_book(&title, &author, year)?;
    output::success(&format!("Added {}", output::format_book(&book)));
    Ok(())
}

fn search_books(store: &Store) -> Result<()> {
    let query = prompt("Keyword (title/author): ")?;
    if query.is_empty() {
        println!("Please enter a keyword.");
        return Ok(());
    }

    let results = store.search(&query);
    if results.is_empty() {
        println!("No matches.");
    } else {
        output::print_books(&results);
    }
    Ok(())
}

fn update_book(store: &mut Store) -> Result<()> {
    let Some(id) = read_id()? else {
        return Ok(());
    };
    let Some(current) = store.get_book(id).cloned() else {
        println!("No book with id {}.", id);
        return Ok(());
    };

    println!("Press Enter to keep the current value.");
    let title = prompt_with_default("Title", &current.title)?;
    let author = prompt_with_default("Author", &current.author)?;
    let year = match prompt_with_default("Year", &current.year.to_string())? {
        Some(input) => match parse_year(&input) {
            Some(year) => Some(year),
            None => {
                println!("Year must be a number.");
                return Ok(());
            }
        },
        None => None,
    };

    let book = store.update_book(id, BookUpdate { title, author, year })?;
    output::success(&format!("Updated {}", output::format_book(&book)));
    Ok(())
}

fn delete_book(store: &mut Store) -> Result<()> {
    let Some(id) = read_id()? else {
        return Ok(());
    };
    store.delete_book(id)?;
    output::success(&format!("Deleted book {}", id));
    Ok(())
}

fn borrow_book(store: &mut Store) -> Result<()> {
    let Some(id) = read_id()? else {
        return Ok(());
    };
    let borrower = prompt("Borrower name: ")?;
    let book = store.borrow_book(id, &borrower)?;
    output::success(&format!("Borrowed {}", output::format_book(&book)));
    Ok(())
}

fn return_book(store: &mut Store) -> Result<()> {
    let Some(id) = read_id()? else {
        return Ok(());
    };
    let book = store.return_book(id)?;
    output::success(&format!("Returned {}", output::format_book(&book)));
    Ok(())
}

/// Parse a year entered at a prompt
fn parse_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

/// Prompt for a record id, printing a message on non-numeric input
fn read_id() -> Result<Option<u64>> {
    let input = prompt("Book id: ")?;
    match input.parse::<u64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("Please enter a number.");
            Ok(None)
        }
    }
}

/// Prompt for a line of input, trimmed
fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(input.trim().to_string())
}

/// Prompt showing the current value, returns `None` if the user keeps it
fn prompt_with_default(label: &str, default: &str) -> Result<Option<String>> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        anyhow::bail!("Input closed");
    }

    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}
