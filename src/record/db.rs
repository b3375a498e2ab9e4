//! Database operations for collections and expenses.
//!
//! Both kinds share the same columns, so every function takes the
//! [RecordKind] that selects the table.

use rusqlite::{Connection, params};

use crate::{
    Error,
    record::core::{NewRecord, Record, RecordId, RecordKind, map_row_to_record},
};

/// Insert a record and return it with its generated ID.
pub fn create_record(
    kind: RecordKind,
    record: &NewRecord,
    connection: &Connection,
) -> Result<Record, Error> {
    connection.execute(
        &format!(
            "INSERT INTO {} (name, amount, mode, date) VALUES (?1, ?2, ?3, ?4)",
            kind.as_str()
        ),
        params![record.name, record.amount, record.mode, record.date],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Record {
        id,
        name: record.name.clone(),
        amount: record.amount,
        mode: record.mode.clone(),
        date: record.date,
    })
}

/// Retrieve a record by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a record of this kind,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_record(kind: RecordKind, id: RecordId, connection: &Connection) -> Result<Record, Error> {
    let record = connection
        .prepare(&format!(
            "SELECT id, name, amount, mode, date FROM {} WHERE id = :id",
            kind.as_str()
        ))?
        .query_one(&[(":id", &id)], map_row_to_record)?;

    Ok(record)
}

/// Retrieve every record of a kind, newest first.
pub fn get_all_records(kind: RecordKind, connection: &Connection) -> Result<Vec<Record>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, name, amount, mode, date FROM {} ORDER BY date DESC, id DESC",
            kind.as_str()
        ))?
        .query_map([], map_row_to_record)?
        .map(|maybe_record| maybe_record.map_err(Error::from))
        .collect()
}

/// Overwrite every field of the record with `id`.
///
/// # Errors
/// Returns [Error::UpdateMissingRecord] if no record has the ID `id`.
pub fn update_record(
    kind: RecordKind,
    id: RecordId,
    record: &NewRecord,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        &format!(
            "UPDATE {} \
            SET \
                name = ?1, \
                amount = ?2, \
                mode = ?3, \
                date = ?4 \
            WHERE id = ?5",
            kind.as_str()
        ),
        params![record.name, record.amount, record.mode, record.date, id],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingRecord(kind));
    }

    Ok(())
}

/// Delete the record with `id`.
///
/// # Errors
/// Returns [Error::DeleteMissingRecord] if no record has the ID `id`.
pub fn delete_record(kind: RecordKind, id: RecordId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        &format!("DELETE FROM {} WHERE id = ?1", kind.as_str()),
        [id],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRecord(kind));
    }

    Ok(())
}
