use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{
    Calendar, Food,
    domain::date::{self, ParseError},
};

/// A calendar serialized as a JSON document.
///
/// The document is an object with a single `foods` array; array order is
/// significant and equals the calendar's insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonCalendar {
    foods: Vec<JsonFood>,
}

/// One element of the `foods` array.
///
/// Dates are carried as text in the same fixed `YYYY/MM/DD` format used
/// for parsing. Dates are data, not live state, so write followed by read
/// is lossless regardless of when the round trip occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct JsonFood {
    name: String,
    expiry_date: String,
    date_purchased: String,
}

impl JsonCalendar {
    /// Reads one complete JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if the input is not valid JSON, the
    /// top-level `foods` key is missing or not an array, or any element
    /// lacks a required field.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Self, FormatError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the document as one pretty-printed JSON object.
    ///
    /// Field order and presence are stable, so write followed by
    /// [`Self::read`] reproduces the document exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(io::Error::from)
    }
}

/// Errors that can occur when reading a calendar from a JSON document.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The document is structurally malformed: invalid JSON, a missing
    /// `foods` key, a non-array `foods`, or an element missing a required
    /// field.
    #[error("malformed calendar document: {0}")]
    Json(#[from] serde_json::Error),

    /// A date string does not match the fixed format.
    #[error(transparent)]
    Date(#[from] ParseError),
}

impl From<&Calendar> for JsonCalendar {
    fn from(calendar: &Calendar) -> Self {
        Self {
            foods: calendar
                .foods()
                .iter()
                .map(|food| JsonFood {
                    name: food.name().to_string(),
                    expiry_date: date::display(food.expiry_date()).to_string(),
                    date_purchased: date::display(food.date_purchased()).to_string(),
                })
                .collect(),
        }
    }
}

impl TryFrom<JsonCalendar> for Calendar {
    type Error = FormatError;

    fn try_from(document: JsonCalendar) -> Result<Self, Self::Error> {
        document
            .foods
            .into_iter()
            .map(|food| {
                let expiry_date = date::parse(&food.expiry_date)?;
                let date_purchased = date::parse(&food.date_purchased)?;
                Ok(Food::from_dates(food.name, expiry_date, date_purchased))
            })
            .collect()
    }
}
