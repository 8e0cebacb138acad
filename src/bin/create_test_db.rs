use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, Month, OffsetDateTime};

use finance_tracker::{
    category::Category,
    initialize_db,
    transaction::{NewTransaction, create_transaction},
};

/// A utility for creating a test database for the finance_tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// The sample transactions as (month, day, amount, description, category).
///
/// Food adds up to more than its default budget so the overspend warning shows.
const SAMPLE_TRANSACTIONS: [(Month, u8, f64, &str, Category); 14] = [
    (Month::January, 3, 4500.0, "January rent", Category::Rent),
    (Month::January, 8, 1250.0, "Weekly groceries", Category::Food),
    (Month::January, 12, 450.0, "Bus pass", Category::Transport),
    (Month::January, 20, 1800.0, "Electricity bill", Category::Utilities),
    (Month::February, 3, 4500.0, "February rent", Category::Rent),
    (Month::February, 9, 1420.5, "Weekly groceries", Category::Food),
    (Month::February, 14, 900.0, "Concert tickets", Category::Entertainment),
    (Month::February, 25, 320.0, "Taxi home", Category::Transport),
    (Month::March, 3, 4500.0, "March rent", Category::Rent),
    (Month::March, 7, 1610.25, "Weekly groceries", Category::Food),
    (Month::March, 15, 980.0, "Dinner with friends", Category::Food),
    (Month::March, 18, 650.0, "Movie night", Category::Entertainment),
    (Month::March, 22, 640.0, "Internet bill", Category::Utilities),
    (Month::March, 28, 150.0, "Metro card top up", Category::Transport),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample transactions...");

    let year = OffsetDateTime::now_utc().year();
    let mut created_at = OffsetDateTime::now_utc() - Duration::days(SAMPLE_TRANSACTIONS.len() as i64);

    for (month, day, amount, description, category) in SAMPLE_TRANSACTIONS {
        let transaction = NewTransaction {
            amount,
            description: description.to_owned(),
            date: Date::from_calendar_date(year, month, day)?,
            category,
        };

        create_transaction(transaction, created_at, &conn)?;
        created_at += Duration::days(1);
    }

    println!("Success!");

    Ok(())
}
