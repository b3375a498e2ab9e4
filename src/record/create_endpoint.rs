//! Routes for adding collections and expenses from the dashboard forms.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    Error, capitalise_first_char,
    dashboard::{AddRecordError, DashboardState, render_dashboard},
    endpoints,
    record::{RecordForm, RecordKind, create_record},
    timezone::get_local_now,
};

/// Add a collection dated now and go back to the dashboard.
pub async fn create_collection_endpoint(
    State(state): State<DashboardState>,
    Form(form): Form<RecordForm>,
) -> Response {
    create_record_endpoint(RecordKind::Collection, state, form)
}

/// Add an expense dated now and go back to the dashboard.
pub async fn create_expense_endpoint(
    State(state): State<DashboardState>,
    Form(form): Form<RecordForm>,
) -> Response {
    create_record_endpoint(RecordKind::Expense, state, form)
}

/// A malformed form re-renders the dashboard with the message next to the
/// form that was submitted and nothing is written.
fn create_record_endpoint(kind: RecordKind, state: DashboardState, form: RecordForm) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let Some(now) = get_local_now(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let new_record = match form.clone().into_new_record(now) {
        Ok(new_record) => new_record,
        Err(error) => {
            tracing::debug!("Rejected {kind} form: {error}");
            let add_error = AddRecordError {
                kind,
                message: capitalise_first_char(&error.to_string()),
                form,
            };

            return match render_dashboard(&connection, &state.local_timezone, true, Some(&add_error))
            {
                Ok(page) => (StatusCode::BAD_REQUEST, page).into_response(),
                Err(error) => error.into_response(),
            };
        }
    };

    match create_record(kind, &new_record, &connection) {
        Ok(record) => {
            tracing::info!("Created {kind} #{}", record.id);
            Redirect::to(endpoints::ROOT).into_response()
        }
        Err(error) => {
            tracing::error!("Could not create {kind}: {error}");
            error.into_response()
        }
    }
}
