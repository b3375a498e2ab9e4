//! Form data for creating and editing records, and the validation that turns
//! raw form fields into a [NewRecord].

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, record::core::NewRecord};

/// The date format used by edit forms, e.g. "2025-03-14".
pub(crate) const FORM_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

/// The raw fields of the add collection and add expense forms.
///
/// The amount is kept as text so that a malformed number is reported back
/// to the user instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordForm {
    /// Who paid or was paid.
    pub name: String,
    /// The amount as typed. Only a form without an amount field counts as
    /// zero, a blank field is rejected.
    #[serde(default, deserialize_with = "deserialize_sent_field")]
    pub amount: Option<String>,
    /// The payment mode.
    pub mode: String,
}

impl RecordForm {
    /// Validate the form, dating the record at `date`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is not a finite,
    /// non-negative number.
    pub fn into_new_record(self, date: PrimitiveDateTime) -> Result<NewRecord, Error> {
        let amount = parse_amount(self.amount.as_deref())?;

        Ok(NewRecord {
            name: self.name,
            amount,
            mode: self.mode,
            date,
        })
    }
}

/// The raw fields of the edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditRecordForm {
    /// Who paid or was paid.
    pub name: String,
    /// The amount as typed. Only a form without an amount field counts as
    /// zero, a blank field is rejected.
    #[serde(default, deserialize_with = "deserialize_sent_field")]
    pub amount: Option<String>,
    /// The payment mode.
    pub mode: String,
    /// The new date in the format YYYY-MM-DD.
    pub date: String,
}

impl EditRecordForm {
    /// Validate the form. The record is dated at midnight of the given date.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] for a malformed amount and
    /// [Error::InvalidDate] for a malformed date.
    pub fn into_new_record(self) -> Result<NewRecord, Error> {
        let amount = parse_amount(self.amount.as_deref())?;
        let date = parse_form_date(&self.date)?;

        Ok(NewRecord {
            name: self.name,
            amount,
            mode: self.mode,
            date: date.midnight(),
        })
    }
}

/// Keep a field that was sent, even when blank, as `Some`.
///
/// Form decoding maps an empty value to `None` for optional fields, which
/// would make `amount=` indistinguishable from a form without the field.
fn deserialize_sent_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Parse an amount entered in a form.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `raw_amount` is not a number, is not
/// finite, or is negative.
pub fn parse_amount(raw_amount: Option<&str>) -> Result<f64, Error> {
    let Some(raw_amount) = raw_amount else {
        return Ok(0.0);
    };

    match raw_amount.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(raw_amount.to_owned())),
    }
}

/// Parse a date entered in a form, e.g. "2025-03-14".
///
/// # Errors
/// Returns [Error::InvalidDate] if `raw_date` is not a valid date.
pub fn parse_form_date(raw_date: &str) -> Result<Date, Error> {
    Date::parse(raw_date.trim(), FORM_DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(raw_date.to_owned()))
}
