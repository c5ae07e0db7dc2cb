// Typed records for the event data file.
// Downstream logic never touches dynamic row/column access; all mapping
// from SQLite happens once, at the storage boundary (confab-store).

mod records;
mod timefmt;

pub use records::{
    EventRecord, FavoriteSet, IntegrityIssue, LocationRecord, MissingRef, ScheduleDay,
    SessionRecord, SpeakerRecord, TrackRecord,
};
pub use timefmt::short_time_label;
