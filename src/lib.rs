//! Food Expiry Tracking
//!
//! Perishable items are records in a [`Calendar`], persisted as a single
//! JSON document.

pub mod domain;
pub use domain::{Calendar, Clock, Config, FixedClock, Food, ParseError, SystemClock};

/// File persistence for calendars.
pub mod storage;
pub use storage::{FormatError, JsonWriter, LoadError, ResourceError, SaveError};
