//! The page for editing a collection or expense, and the route that saves it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};

use crate::{
    Error, capitalise_first_char,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, LINK_STYLE, amount_input, base, form_card,
        mode_select, text_input,
    },
    navigation::NavBar,
    record::{
        EditRecordForm, RecordId, RecordKind, RecordState, form::FORM_DATE_FORMAT, get_record,
        parse_record_path, update_record,
    },
};

fn edit_record_view(
    kind: RecordKind,
    id: RecordId,
    form: &EditRecordForm,
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_RECORD, true).into_html();
    let action = format_endpoint(endpoints::EDIT_RECORD, &[&kind, &id]);
    let amount = form.amount.as_deref().unwrap_or_default();

    let edit_form = html! {
        form method="post" action=(action) class="space-y-4 md:space-y-6"
        {
            (text_input("name", "name", "Name", "text", &form.name))
            (amount_input("amount", amount))
            (mode_select("mode", &form.mode))
            (text_input("date", "date", "Date", "date", &form.date))

            @if let Some(error_message) = error_message {
                p class={ "form-error " (FORM_ERROR_STYLE) } { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }

            p class="text-sm text-center"
            {
                a href=(endpoints::ROOT) class=(LINK_STYLE) { "Cancel" }
            }
        }
    };

    let content = html! {
        (nav_bar)
        (form_card(&format!("Edit {}", kind.title()), &edit_form))
    };

    base(&format!("Edit {}", kind.title()), &content)
}

/// Display the edit form pre-filled with the stored record.
pub async fn get_edit_record_page(
    State(state): State<RecordState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Markup, Error> {
    let (kind, id) = parse_record_path(&kind, &id)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let record = get_record(kind, id, &connection)?;
    let date = record.date.date().format(FORM_DATE_FORMAT).map_err(|error| {
        tracing::error!("Could not format date of {kind} #{id}: {error}");
        Error::InvalidDate(record.date.to_string())
    })?;

    let form = EditRecordForm {
        name: record.name,
        amount: Some(record.amount.to_string()),
        mode: record.mode,
        date,
    };

    Ok(edit_record_view(kind, id, &form, None))
}

/// Overwrite a record with the submitted form and go back to the dashboard.
///
/// A malformed amount or date re-renders the form with a message and nothing
/// is written. Responds with the 404 page when no such record exists.
pub async fn update_record_endpoint(
    State(state): State<RecordState>,
    Path((kind, id)): Path<(String, String)>,
    Form(form): Form<EditRecordForm>,
) -> Response {
    let (kind, id) = match parse_record_path(&kind, &id) {
        Ok(path) => path,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    // A missing record is a 404 regardless of what the form holds.
    if let Err(error) = get_record(kind, id, &connection) {
        tracing::warn!("Could not edit {kind} #{id}: {error}");
        return error.into_response();
    }

    let new_record = match form.clone().into_new_record() {
        Ok(new_record) => new_record,
        Err(error) => {
            tracing::debug!("Rejected edit of {kind} #{id}: {error}");
            let message = capitalise_first_char(&error.to_string());
            return (
                StatusCode::BAD_REQUEST,
                edit_record_view(kind, id, &form, Some(&message)),
            )
                .into_response();
        }
    };

    match update_record(kind, id, &new_record, &connection) {
        Ok(()) => {
            tracing::info!("Updated {kind} #{id}");
            Redirect::to(endpoints::ROOT).into_response()
        }
        Err(error) => {
            tracing::warn!("Could not update {kind} #{id}: {error}");
            error.into_response()
        }
    }
}


#[cfg(test)]
mod update_record_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        endpoints,
        record::{
            EditRecordForm, NewRecord, Record, RecordKind, RecordState, create_record, get_record,
        },
        test_utils::{assert_form_error_message, assert_redirect, must_get_form, parse_html_document},
    };

    use super::update_record_endpoint;

    fn get_test_state() -> (RecordState, Record) {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");
        let record = create_record(
            RecordKind::Expense,
            &NewRecord {
                name: "Rent".to_owned(),
                amount: 500.0,
                mode: "online".to_owned(),
                date: datetime!(2025-03-14 09:30),
            },
            &connection,
        )
        .unwrap();

        let state = RecordState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, record)
    }

    fn edit_form(amount: &str, date: &str) -> EditRecordForm {
        EditRecordForm {
            name: "Electricity".to_owned(),
            amount: Some(amount.to_owned()),
            mode: "cash".to_owned(),
            date: date.to_owned(),
        }
    }

    #[tokio::test]
    async fn update_overwrites_record_at_midnight() {
        let (state, record) = get_test_state();

        let response = update_record_endpoint(
            State(state.clone()),
            Path(("expense".to_owned(), record.id.to_string())),
            Form(edit_form("75.25", "2025-02-01")),
        )
        .await;

        assert_redirect(&response, endpoints::ROOT);
        let got = get_record(RecordKind::Expense, record.id, &state.db_connection.lock().unwrap())
            .unwrap();
        assert_eq!(
            got,
            Record {
                id: record.id,
                name: "Electricity".to_owned(),
                amount: 75.25,
                mode: "cash".to_owned(),
                date: datetime!(2025-02-01 00:00),
            }
        );
    }

    #[tokio::test]
    async fn invalid_date_renders_error_without_writing() {
        let (state, record) = get_test_state();

        let response = update_record_endpoint(
            State(state.clone()),
            Path(("expense".to_owned(), record.id.to_string())),
            Form(edit_form("75", "01/02/2025")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let got = get_record(RecordKind::Expense, record.id, &state.db_connection.lock().unwrap())
            .unwrap();
        assert_eq!(got, record);

        let document = parse_html_document(response).await;
        let form = must_get_form(&document);
        assert_form_error_message(
            &form,
            "\"01/02/2025\" is not a valid date, use the format YYYY-MM-DD",
        );
    }

    #[tokio::test]
    async fn invalid_amount_renders_error_without_writing() {
        let (state, record) = get_test_state();

        let response = update_record_endpoint(
            State(state.clone()),
            Path(("expense".to_owned(), record.id.to_string())),
            Form(edit_form("NaN", "2025-02-01")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let got = get_record(RecordKind::Expense, record.id, &state.db_connection.lock().unwrap())
            .unwrap();
        assert_eq!(got, record);
    }

    #[tokio::test]
    async fn invalid_form_for_missing_record_is_not_found() {
        let (state, _) = get_test_state();

        let response = update_record_endpoint(
            State(state),
            Path(("expense".to_owned(), "999".to_owned())),
            Form(edit_form("", "not a date")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (state, _) = get_test_state();

        let response = update_record_endpoint(
            State(state),
            Path(("collection".to_owned(), "1".to_owned())),
            Form(edit_form("75", "2025-02-01")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
