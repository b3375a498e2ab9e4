//! Tallybook is a small bookkeeping web app for tracking cash and online
//! collections alongside expenses.
//!
//! Anyone can view the dashboard of daily and running totals. Adding,
//! editing and deleting records requires logging in as the admin.
//!
//! This library provides the router, which directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod dashboard;
mod db;
mod endpoints;
mod error_pages;
mod html;
mod log_in;
mod log_out;
mod logging;
mod navigation;
mod record;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{AdminCredentials, PasswordHash, ValidatedPassword};
pub use db::{initialize as initialize_db, open_connection};
pub use logging::logging_middleware;
pub use record::{NewRecord, Record, RecordKind, create_record};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::error_pages::{bad_request_page, internal_server_error_page, not_found_page};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The amount entered in a form is not a non-negative number.
    #[error("\"{0}\" is not a valid amount, enter a number that is zero or more")]
    InvalidAmount(String),

    /// The date entered in a form is not a date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, use the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The record type in a URL is neither "collection" nor "expense".
    #[error("\"{0}\" is not a record type")]
    UnknownRecordKind(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a record that does not exist.
    #[error("tried to update a {0} that is not in the database")]
    UpdateMissingRecord(RecordKind),

    /// Tried to delete a record that does not exist.
    #[error("tried to delete a {0} that is not in the database")]
    DeleteMissingRecord(RecordKind),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The database URL does not point to a SQLite database.
    #[error("unsupported database URL \"{0}\", only SQLite databases are supported")]
    UnsupportedDatabaseUrl(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The session cookie is missing from the cookie jar in the request.
    #[error("no session cookie in the cookie jar")]
    CookieMissing,

    /// The session cookie could not be decoded into a session token.
    #[error("the session cookie does not hold a valid token")]
    InvalidToken,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound
            | Error::UnknownRecordKind(_)
            | Error::UpdateMissingRecord(_)
            | Error::DeleteMissingRecord(_) => not_found_page(),
            Error::InvalidAmount(_) | Error::InvalidDate(_) => {
                bad_request_page(&capitalise_first_char(&self.to_string()))
            }
            Error::InvalidTimezoneError(timezone) => internal_server_error_page(Some((
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ))),
            Error::DatabaseLockError => internal_server_error_page(None),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                internal_server_error_page(None)
            }
        }
    }
}

/// Uppercase the first character of `string`, used for messages shown to the user.
pub fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
