//! Collections and expenses: their storage, form validation and the routes
//! that change them.

mod core;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod edit;
mod form;

pub use core::{
    NewRecord, PaymentMode, Record, RecordId, RecordKind, create_record_tables,
    parse_record_path,
};
pub use create_endpoint::{create_collection_endpoint, create_expense_endpoint};
pub use db::{create_record, delete_record, get_all_records, get_record, update_record};
pub use delete_endpoint::delete_record_endpoint;
pub use edit::{get_edit_record_page, update_record_endpoint};
pub use form::{EditRecordForm, RecordForm};

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed to edit and delete records.
#[derive(Debug, Clone)]
pub struct RecordState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
