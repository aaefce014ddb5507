use chrono::{Local, NaiveDate};

/// A source for the reference date against which expiry is computed.
///
/// Domain queries take the reference date as an explicit argument; a
/// `Clock` is how collaborators hold a single substitutable source of that
/// date, so tests can pin arbitrary dates without touching process state.
pub trait Clock {
    /// The current reference date.
    fn today(&self) -> NaiveDate;
}

/// The local civil date, for interactive use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A pinned reference date, for tests and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(
    /// The pinned date.
    pub NaiveDate,
);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 10).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
