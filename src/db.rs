//! Opening the application database and creating its tables.

use rusqlite::Connection;

use crate::{Error, record::create_record_tables};

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_record_tables(connection)?;

    Ok(())
}

/// Open a SQLite database from a connection string.
///
/// Accepts a plain file path, a path prefixed with `sqlite://` or `sqlite:`,
/// or `:memory:` for an in-memory database.
///
/// # Errors
/// Returns an [Error::UnsupportedDatabaseUrl] if the string names another
/// database engine (e.g. `postgres://...`), or an SQL error if the database
/// cannot be opened.
pub fn open_connection(database_url: &str) -> Result<Connection, Error> {
    let path = parse_database_url(database_url)?;

    if path == ":memory:" {
        tracing::warn!("Using an in-memory database, records will be lost on shutdown");
        return Ok(Connection::open_in_memory()?);
    }

    Ok(Connection::open(path)?)
}

fn parse_database_url(database_url: &str) -> Result<&str, Error> {
    let database_url = database_url.trim();

    let path = if let Some(path) = database_url.strip_prefix("sqlite://") {
        path
    } else if let Some(path) = database_url.strip_prefix("sqlite:") {
        path
    } else if database_url.contains("://") {
        return Err(Error::UnsupportedDatabaseUrl(database_url.to_owned()));
    } else {
        database_url
    };

    if path.is_empty() {
        return Err(Error::UnsupportedDatabaseUrl(database_url.to_owned()));
    }

    Ok(path)
}
