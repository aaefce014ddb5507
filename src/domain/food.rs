use chrono::NaiveDate;

use crate::domain::date::{self, ParseError};

/// A perishable item with a purchase date, an expiry date, and a derived
/// expiry status.
///
/// Foods are value-like. The name and purchase date are fixed at
/// construction; the only mutation is replacing the expiry date. Expiry
/// status is never stored: it is recomputed from the expiry date and a
/// caller-supplied reference date on every query, so advancing the
/// reference date changes the answer without any write to the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    name: String,
    expiry_date: NaiveDate,
    date_purchased: NaiveDate,
}

impl Food {
    /// Creates a food from textual dates in the fixed `YYYY/MM/DD` format.
    ///
    /// The purchase date is expected to precede the expiry date. The
    /// constructor does not enforce this; callers that care must check
    /// before constructing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if either date is malformed.
    pub fn new(
        name: impl Into<String>,
        expiry_date: &str,
        date_purchased: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            name: name.into(),
            expiry_date: date::parse(expiry_date)?,
            date_purchased: date::parse(date_purchased)?,
        })
    }

    /// Creates a food from already-parsed dates.
    #[must_use]
    pub fn from_dates(
        name: impl Into<String>,
        expiry_date: NaiveDate,
        date_purchased: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            expiry_date,
            date_purchased,
        }
    }

    /// The name of the food. Names are not unique within a calendar.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The date the food expires.
    #[must_use]
    pub const fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// The date the food was purchased.
    #[must_use]
    pub const fn date_purchased(&self) -> NaiveDate {
        self.date_purchased
    }

    /// Replaces the expiry date, parsing `text` in the fixed format.
    ///
    /// The purchase date is not revalidated against the new expiry date.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is malformed; the record is
    /// unchanged on error.
    pub fn set_expiry_date(&mut self, text: &str) -> Result<(), ParseError> {
        self.expiry_date = date::parse(text)?;
        Ok(())
    }

    /// Whether the food is expired on the given reference date.
    ///
    /// A food expires ON its expiry date: `expiry_date == today` counts as
    /// expired.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date <= today
    }

    /// Signed whole days until expiry.
    ///
    /// Negative means the food expired that many days ago; zero means it
    /// expires today (and is already expired).
    #[must_use]
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        self.expiry_date.signed_duration_since(today).num_days()
    }

    /// A one-line description of the food with its status, day count, and
    /// dates.
    #[must_use]
    pub fn describe(&self, today: NaiveDate) -> String {
        let days = self.days_until_expiry(today).abs();
        let expiry = date::display(self.expiry_date);
        let purchased = date::display(self.date_purchased);
        if self.is_expired(today) {
            format!(
                "{}: EXPIRED {days} days ago ({expiry}) purchased {purchased}",
                self.name
            )
        } else {
            format!(
                "{}: SAFE TO EAT for {days} days ({expiry}) purchased {purchased}",
                self.name
            )
        }
    }
}
