// Engine module - pure schedule and directory logic.
// This layer sits between typed records (confab-types / confab-store) and
// presentation. Nothing here touches SQLite, the clock, or threads: callers
// pass in the rows and `now`, and re-evaluate on every render pass.

mod schedule;
mod speakers;

pub use schedule::{
    classify_sections, filter_favorites, scroll_target, Schedule, ScheduleSection, SectionStatus,
};
pub use speakers::{
    filter_speakers, group_speakers_by_initial, section_index_titles, SpeakerSection,
};
