use chrono::NaiveDate;

use crate::domain::{Food, report};

/// An insertion-ordered collection of foods.
///
/// Duplicates are permitted, by name or by full equality. The calendar
/// exclusively owns its records; queries never reorder or mutate the
/// stored sequence, they return new derived sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    foods: Vec<Food>,
}

impl Calendar {
    /// Creates an empty calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self { foods: Vec::new() }
    }

    /// The stored foods, in insertion order.
    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// The number of stored foods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether the calendar holds no foods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Appends a food to the end of the calendar.
    ///
    /// No uniqueness check is performed; the same name, or the same food,
    /// can be added any number of times.
    pub fn add(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Removes the first food whose name matches `name` exactly.
    ///
    /// Matching is case-sensitive. Returns whether a removal occurred; the
    /// calendar is unchanged when no name matches.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        if let Some(index) = self.foods.iter().position(|food| food.name() == name) {
            self.foods.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes every food unconditionally.
    pub fn clear(&mut self) {
        self.foods.clear();
    }

    /// The first food whose name matches `name` exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Food> {
        self.foods.iter().find(|food| food.name() == name)
    }

    /// Every food that expires within `days` days of `today`, in original
    /// relative order.
    ///
    /// Already-expired foods are excluded no matter how large `days` is;
    /// a negative `days` therefore matches nothing. Returns an empty
    /// sequence when nothing matches.
    #[must_use]
    pub fn expiring_within(&self, days: i64, today: NaiveDate) -> Vec<&Food> {
        self.foods
            .iter()
            .filter(|food| !food.is_expired(today) && food.days_until_expiry(today) <= days)
            .collect()
    }

    /// The expiry status of the first food whose name matches `name`.
    ///
    /// Returns `false` both when the matched food is fresh and when no
    /// food matches at all; the two outcomes are indistinguishable here.
    /// Callers that need to tell them apart should use
    /// [`Self::find_by_name`].
    #[must_use]
    pub fn status_by_name(&self, name: &str, today: NaiveDate) -> bool {
        self.find_by_name(name)
            .is_some_and(|food| food.is_expired(today))
    }

    /// Renders the grouped expired / non-expired report.
    ///
    /// Foods are partitioned at render time, each partition preserving the
    /// calendar's relative insertion order.
    #[must_use]
    pub fn grouped_report(&self, today: NaiveDate) -> String {
        let (expired, fresh): (Vec<&Food>, Vec<&Food>) =
            self.foods.iter().partition(|food| food.is_expired(today));
        report::render(&expired, &fresh, today)
    }
}

impl FromIterator<Food> for Calendar {
    fn from_iter<I: IntoIterator<Item = Food>>(iter: I) -> Self {
        Self {
            foods: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = &'a Food;
    type IntoIter = std::slice::Iter<'a, Food>;

    fn into_iter(self) -> Self::IntoIter {
        self.foods.iter()
    }
}
