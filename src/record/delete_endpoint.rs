use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::{
    Error, endpoints,
    record::{RecordState, delete_record, parse_record_path},
};

/// Delete a collection or expense and go back to the dashboard.
///
/// Responds with the 404 page when the kind is unknown or no such record exists.
pub async fn delete_record_endpoint(
    State(state): State<RecordState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Redirect, Error> {
    let (kind, id) = parse_record_path(&kind, &id)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_record(kind, id, &connection)
        .inspect_err(|error| tracing::warn!("Could not delete {kind} #{id}: {error}"))?;
    tracing::info!("Deleted {kind} #{id}");

    Ok(Redirect::to(endpoints::ROOT))
}
