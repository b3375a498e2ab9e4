use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use tallybook::{NewRecord, RecordKind, create_record, initialize_db};

/// A utility for creating a test database for tallybook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

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

    let now = OffsetDateTime::now_utc();
    let now = PrimitiveDateTime::new(now.date(), now.time());

    println!("Creating test collections...");
    let collections = [
        ("Ravi", 100.0, "cash", Duration::ZERO),
        ("Meera", 50.0, "online", Duration::hours(1)),
        ("Arjun", 30.0, "Cash", Duration::days(1)),
        ("Priya", 250.0, "online", Duration::days(3)),
        ("Sanjay", 75.5, "cheque", Duration::days(7)),
    ];

    for (name, amount, mode, age) in collections {
        create_record(
            RecordKind::Collection,
            &NewRecord {
                name: name.to_owned(),
                amount,
                mode: mode.to_owned(),
                date: now - age,
            },
            &conn,
        )?;
    }

    println!("Creating test expenses...");
    let expenses = [
        ("Tea and snacks", 20.0, "cash", Duration::ZERO),
        ("Electricity", 120.0, "online", Duration::days(2)),
        ("Stationery", 15.25, "cash", Duration::days(5)),
    ];

    for (name, amount, mode, age) in expenses {
        create_record(
            RecordKind::Expense,
            &NewRecord {
                name: name.to_owned(),
                amount,
                mode: mode.to_owned(),
                date: now - age,
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
