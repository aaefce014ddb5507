use std::fmt;

use chrono::NaiveDate;

/// The fixed textual date format: four-digit year, zero-padded month and
/// day, `/` separators.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Parses a date in the fixed `YYYY/MM/DD` format.
///
/// Parsing is strict: the text must be exactly ten characters, zero-padded,
/// and must name a real calendar date. There is no fallback — an unparsable
/// date is never replaced with a default.
///
/// # Errors
///
/// Returns [`ParseError`] if the text does not match the format or names an
/// impossible date.
pub fn parse(text: &str) -> Result<NaiveDate, ParseError> {
    if !well_formed(text) {
        return Err(ParseError(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ParseError(text.to_string()))
}

/// Checks the `YYYY/MM/DD` shape without validating calendar correctness.
fn well_formed(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                4 | 7 => *b == b'/',
                _ => b.is_ascii_digit(),
            })
}

/// Returns a displayable representation in the fixed `YYYY/MM/DD` format.
///
/// This is the inverse of [`parse`]: `parse(&display(d).to_string())`
/// yields `d` for every representable date.
#[must_use]
pub fn display(date: NaiveDate) -> impl fmt::Display {
    date.format(DATE_FORMAT)
}

/// Error returned when text does not parse as a fixed-format date.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid date '{0}': expected YYYY/MM/DD")]
pub struct ParseError(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("2023/07/01", 2023, 7, 1; "ordinary date")]
    #[test_case("2000/01/01", 2000, 1, 1; "century boundary")]
    #[test_case("2024/02/29", 2024, 2, 29; "leap day")]
    #[test_case("2050/12/31", 2050, 12, 31; "year end")]
    fn parse_valid(text: &str, year: i32, month: u32, day: u32) {
        let expected = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        assert_eq!(parse(text).unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("2023/7/1"; "unpadded components")]
    #[test_case("2023-07-01"; "wrong separator")]
    #[test_case("23/07/01"; "two digit year")]
    #[test_case("2023/07/011"; "trailing digit")]
    #[test_case(" 2023/07/01"; "leading whitespace")]
    #[test_case("2023/13/01"; "month out of range")]
    #[test_case("2023/02/30"; "impossible day")]
    #[test_case("2023/02/29"; "leap day in common year")]
    #[test_case("yyyy/mm/dd"; "not numeric")]
    fn parse_invalid(text: &str) {
        assert_eq!(parse(text), Err(ParseError(text.to_string())));
    }

    #[test]
    fn display_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(display(date).to_string(), "2023/07/01");
    }

    #[test]
    fn round_trip() {
        let date = NaiveDate::from_ymd_opt(2030, 2, 3).unwrap();
        assert_eq!(parse(&display(date).to_string()).unwrap(), date);
    }

    #[test]
    fn error_display() {
        let error = parse("garbage").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "invalid date 'garbage': expected YYYY/MM/DD"
        );
    }
}
