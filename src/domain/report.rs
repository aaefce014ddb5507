use chrono::NaiveDate;

use crate::domain::Food;

/// Renders the two-section expired / non-expired report.
///
/// Each section is a header line followed by one tab-indented line per
/// food, or the literal `No food products listed` when the section is
/// empty. The output is a total function of the two input sequences;
/// nothing is read from or written to the environment.
#[must_use]
pub fn render(expired: &[&Food], fresh: &[&Food], today: NaiveDate) -> String {
    format!(
        "Expired foods:\n{}\nNon-expired foods:\n{}",
        section(expired, today),
        section(fresh, today)
    )
}

fn section(foods: &[&Food], today: NaiveDate) -> String {
    if foods.is_empty() {
        "No food products listed".to_string()
    } else {
        foods
            .iter()
            .map(|food| format!("\t{}", food.describe(today)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
