mod entry;
mod missing_fields;
mod parsed_record;
mod shift;

pub use entry::Entry;
pub use missing_fields::{MissingField, MissingFields};
pub use parsed_record::{EntryKey, InvalidEntryKey, ParsedRecord};
pub(crate) use parsed_record::is_positive_amount;
pub use shift::Shift;
