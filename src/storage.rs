/// JSON document model for calendars.
pub mod json;
mod writer;

pub use json::{FormatError, JsonCalendar};
pub use writer::{JsonWriter, LoadError, Open, ResourceError, SaveError, Unopened, load, save};
