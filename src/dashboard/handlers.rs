//! Dashboard HTTP handler.
//!
//! The same rendering is reused by the add record routes so that a rejected
//! form can be shown again with its message in place.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use maud::Markup;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::AuthContext,
    dashboard::{totals::DashboardTotals, view::dashboard_view},
    record::{RecordForm, RecordKind, get_all_records},
    timezone::get_local_now,
};

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A rejected add record form, shown again next to the form it came from.
#[derive(Debug, Clone)]
pub(crate) struct AddRecordError {
    /// Which of the two add forms was submitted.
    pub kind: RecordKind,
    /// The message shown below the form.
    pub message: String,
    /// The values the user entered.
    pub form: RecordForm,
}

/// Display the totals and every record.
///
/// The admin additionally gets the add forms and edit/delete links.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    context: AuthContext,
) -> Result<Markup, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    render_dashboard(&connection, &state.local_timezone, context.is_admin, None)
}

/// Load the records, compute the totals for today in `local_timezone` and render the page.
///
/// # Errors
/// Returns an error if the records cannot be read or the timezone is invalid.
pub(crate) fn render_dashboard(
    connection: &Connection,
    local_timezone: &str,
    is_admin: bool,
    add_error: Option<&AddRecordError>,
) -> Result<Markup, Error> {
    let today = get_local_now(local_timezone)
        .ok_or_else(|| {
            tracing::error!("Invalid timezone {local_timezone}");
            Error::InvalidTimezoneError(local_timezone.to_owned())
        })?
        .date();

    let collections = get_all_records(RecordKind::Collection, connection)
        .inspect_err(|error| tracing::error!("could not get collections: {error}"))?;
    let expenses = get_all_records(RecordKind::Expense, connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;

    let totals = DashboardTotals::from_records(&collections, &expenses, today);

    Ok(dashboard_view(
        &totals,
        &collections,
        &expenses,
        is_admin,
        add_error,
    ))
}

#[cfg(test)]
mod dashboard_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::Duration;

    use crate::{
        auth::AuthContext,
        db::initialize,
        endpoints::{self, format_endpoint},
        record::{NewRecord, RecordKind, create_record},
        test_utils::{assert_valid_html, must_get_text, parse_html_document},
        timezone::get_local_now,
    };

    use super::{DashboardState, get_dashboard_page};

    fn get_test_state() -> DashboardState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn add(state: &DashboardState, kind: RecordKind, amount: f64, mode: &str, days_ago: i64) {
        let date = get_local_now("Etc/UTC").unwrap() - Duration::days(days_ago);
        create_record(
            kind,
            &NewRecord {
                name: format!("{kind} {amount}"),
                amount,
                mode: mode.to_owned(),
                date,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
    }

    async fn get_page(state: DashboardState, is_admin: bool) -> Html {
        let response = get_dashboard_page(State(state), AuthContext { is_admin })
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        document
    }

    fn count(document: &Html, selector: &str) -> usize {
        document.select(&Selector::parse(selector).unwrap()).count()
    }

    #[tokio::test]
    async fn shows_totals() {
        let state = get_test_state();
        add(&state, RecordKind::Collection, 100.0, "cash", 0);
        add(&state, RecordKind::Collection, 50.0, "online", 0);
        add(&state, RecordKind::Collection, 30.0, "Cash", 1);
        add(&state, RecordKind::Expense, 20.0, "cash", 0);

        let document = get_page(state, false).await;

        assert_eq!(must_get_text(&document, "#total-cash"), "130.00");
        assert_eq!(must_get_text(&document, "#total-online"), "50.00");
        assert_eq!(must_get_text(&document, "#total-expense"), "20.00");
        assert_eq!(must_get_text(&document, "#net"), "160.00");
        assert_eq!(must_get_text(&document, "#today-cash"), "100.00");
        assert_eq!(must_get_text(&document, "#today-online"), "50.00");
        assert_eq!(must_get_text(&document, "#today-total"), "150.00");
        assert_eq!(must_get_text(&document, "#today-expense"), "20.00");
    }

    #[tokio::test]
    async fn lists_records_newest_first() {
        let state = get_test_state();
        add(&state, RecordKind::Collection, 1.0, "cash", 3);
        add(&state, RecordKind::Collection, 2.0, "cash", 0);
        add(&state, RecordKind::Expense, 3.0, "online", 1);

        let document = get_page(state, false).await;

        let names: Vec<String> = document
            .select(&Selector::parse("#collections tbody tr td:first-child").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(names, ["collection 2", "collection 1"]);
        assert_eq!(count(&document, "#expenses tbody tr"), 1);
    }

    #[tokio::test]
    async fn visitor_sees_no_admin_controls() {
        let state = get_test_state();
        add(&state, RecordKind::Collection, 1.0, "cash", 0);

        let document = get_page(state, false).await;

        assert_eq!(count(&document, "form"), 0);
        assert_eq!(count(&document, "a[href^='/edit/']"), 0);
        assert_eq!(count(&document, "a[href^='/delete/']"), 0);
        // One in the navigation bar, one in the hint above the tables.
        assert_eq!(count(&document, &format!("a[href='{}']", endpoints::LOG_IN)), 2);
    }

    #[tokio::test]
    async fn admin_sees_forms_and_record_links() {
        let state = get_test_state();
        add(&state, RecordKind::Expense, 1.0, "cash", 0);

        let document = get_page(state, true).await;

        assert_eq!(
            count(
                &document,
                &format!("form[action='{}']", endpoints::ADD_COLLECTION)
            ),
            1
        );
        assert_eq!(
            count(&document, &format!("form[action='{}']", endpoints::ADD_EXPENSE)),
            1
        );
        let edit_url = format_endpoint(endpoints::EDIT_RECORD, &[&"expense", &1]);
        let delete_url = format_endpoint(endpoints::DELETE_RECORD, &[&"expense", &1]);
        assert_eq!(count(&document, &format!("a[href='{edit_url}']")), 1);
        assert_eq!(count(&document, &format!("a[href='{delete_url}']")), 1);
        assert_eq!(count(&document, &format!("a[href='{}']", endpoints::LOG_OUT)), 1);
    }

    #[tokio::test]
    async fn empty_dashboard_shows_zero_totals() {
        let document = get_page(get_test_state(), false).await;

        assert_eq!(must_get_text(&document, "#net"), "0.00");
        assert_eq!(must_get_text(&document, "#today-total"), "0.00");
        assert_eq!(count(&document, "#collections tbody tr"), 0);
    }
}
