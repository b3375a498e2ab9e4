//! The record types shared by collections and expenses.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row};
use time::PrimitiveDateTime;

use crate::Error;

/// The database ID of a collection or expense.
pub type RecordId = i64;

/// The two kinds of record the app keeps.
///
/// Each kind is stored in its own table with the same columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// An incoming payment.
    Collection,
    /// An outgoing payment.
    Expense,
}

impl RecordKind {
    /// The name used in URLs and as the table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Collection => "collection",
            RecordKind::Expense => "expense",
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            RecordKind::Collection => "Collection",
            RecordKind::Expense => "Expense",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(RecordKind::Collection),
            "expense" => Ok(RecordKind::Expense),
            other => Err(Error::UnknownRecordKind(other.to_owned())),
        }
    }
}

/// Parse the `{kind}/{id}` segments of a record URL.
///
/// # Errors
/// Returns [Error::UnknownRecordKind] for an unknown kind and
/// [Error::NotFound] for an ID that is not an integer, since no record can have it.
pub fn parse_record_path(kind: &str, id: &str) -> Result<(RecordKind, RecordId), Error> {
    let kind = kind.parse()?;
    let id = id.parse().map_err(|_| Error::NotFound)?;

    Ok((kind, id))
}

/// The payment channels that collections are bucketed by on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    /// Paid in cash.
    Cash,
    /// Paid by bank transfer, card, UPI and the like.
    Online,
}

impl PaymentMode {
    /// Interpret the free text stored in a record's mode column.
    ///
    /// Surrounding whitespace and case are ignored. Returns `None` for text
    /// that is neither "cash" nor "online".
    pub fn normalize(raw_mode: &str) -> Option<Self> {
        match raw_mode.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMode::Cash),
            "online" => Some(PaymentMode::Online),
            _ => None,
        }
    }

    /// The canonical text stored for this mode when it is picked in a form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Online => "online",
        }
    }
}

/// A collection or an expense as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The ID of the record, unique among records of the same kind.
    pub id: RecordId,
    /// Who paid or was paid, or what the payment was for.
    pub name: String,
    /// The amount of money, never negative.
    pub amount: f64,
    /// The payment mode exactly as it was entered.
    pub mode: String,
    /// When the payment happened in local time.
    pub date: PrimitiveDateTime,
}

/// The data needed to create a record, or to overwrite an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// Who paid or was paid, or what the payment was for.
    pub name: String,
    /// The amount of money, never negative.
    pub amount: f64,
    /// The payment mode, e.g. "cash" or "online".
    pub mode: String,
    /// When the payment happened in local time.
    pub date: PrimitiveDateTime,
}

/// Create the collection and expense tables if they do not exist.
pub fn create_record_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    for kind in [RecordKind::Collection, RecordKind::Expense] {
        connection.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                mode TEXT NOT NULL,
                date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_{table}_date ON {table}(date);",
            table = kind.as_str()
        ))?;
    }

    Ok(())
}

pub fn map_row_to_record(row: &Row) -> Result<Record, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let amount = row.get(2)?;
    let mode = row.get(3)?;
    let date = row.get(4)?;

    Ok(Record {
        id,
        name,
        amount,
        mode,
        date,
    })
}



#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_record_tables;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_record_tables(&connection));
    }
}
