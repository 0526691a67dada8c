use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use finance_tracker::{AppState, TransactionType};

/// The categories a new database starts with.
const DEFAULT_CATEGORIES: [(&str, TransactionType); 10] = [
    ("Salary", TransactionType::Income),
    ("Freelance", TransactionType::Income),
    ("Investments", TransactionType::Income),
    ("Other Income", TransactionType::Income),
    ("Groceries", TransactionType::Expense),
    ("Rent", TransactionType::Expense),
    ("Utilities", TransactionType::Expense),
    ("Transport", TransactionType::Expense),
    ("Entertainment", TransactionType::Expense),
    ("Other Expenses", TransactionType::Expense),
];

/// A utility for creating a database with a default set of categories for the
/// finance tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create a database and populate it with the default categories.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let state = AppState::new(Connection::open(output_path)?)?;

    println!("Creating default categories...");

    for (name, category_type) in DEFAULT_CATEGORIES {
        let category = state
            .category_service
            .create_category(name, category_type.as_str())?;
        println!("  {} ({})", category.name, category.category_type);
    }

    println!("Success!");

    Ok(())
}
