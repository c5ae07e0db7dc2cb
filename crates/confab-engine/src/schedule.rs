use chrono::FixedOffset;
use confab_types::{short_time_label, FavoriteSet, SessionRecord};
use serde::Serialize;

/// One display section: a run of sessions sharing an identical start time,
/// keyed by its fixed-format time label. Labels can repeat across a day
/// (two days, same wall-clock time) but not within one grouping result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSection {
    pub label: String,
    pub start_time: i64,
    pub sessions: Vec<SessionRecord>,
}

/// Schedule grouping with a fixed display offset from UTC.
pub struct Schedule {
    tz: FixedOffset,
}

impl Schedule {
    /// `utc_offset_secs` outside the valid ±24h range falls back to UTC.
    pub fn new(utc_offset_secs: i32) -> Self {
        let tz = FixedOffset::east_opt(utc_offset_secs)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
        Self { tz }
    }

    /// Partition sessions into consecutive runs of identical start time.
    ///
    /// The input must already be sorted ascending by `begin_time` (the store
    /// guarantees this); the grouper does not re-sort, and unsorted input
    /// produces sections in whatever order the runs appear. Relative session
    /// order is always preserved, and every input session lands in exactly
    /// one section. Empty input yields no sections.
    pub fn group_sessions_by_start_time(
        &self,
        sessions: Vec<SessionRecord>,
    ) -> Vec<ScheduleSection> {
        let mut sections: Vec<ScheduleSection> = Vec::new();

        for session in sessions {
            match sections.last_mut() {
                Some(section) if section.start_time == session.begin_time => {
                    section.sessions.push(session);
                }
                _ => {
                    sections.push(ScheduleSection {
                        label: short_time_label(session.begin_time, &self.tz),
                        start_time: session.begin_time,
                        sessions: vec![session],
                    });
                }
            }
        }

        sections
    }
}

/// Favorites-only pre-filter, applied before grouping, never after.
/// Pure subset operation: keeps a session iff the session itself or its
/// speaker is favorited, preserving order.
pub fn filter_favorites(
    sessions: Vec<SessionRecord>,
    favorites: &FavoriteSet,
) -> Vec<SessionRecord> {
    sessions
        .into_iter()
        .filter(|session| favorites.contains_session(session))
        .collect()
}

/// Live/upcoming classification of a section relative to wall-clock `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionStatus {
    Past,
    /// `start <= now < next section's start` (or no next section).
    Live,
    /// Immediately follows the live section.
    UpNext,
    Upcoming,
}

/// Classify every section against `now`.
///
/// Section i is Live iff `T_i <= now < T_{i+1}`, with the last section open
/// ended; at most one section is ever Live. This is a pure function of
/// `(sections, now)` and is meant to be recomputed on every render pass --
/// live status moves with the clock, so caching an index would go stale.
pub fn classify_sections(sections: &[ScheduleSection], now: i64) -> Vec<SectionStatus> {
    let live = sections
        .iter()
        .rposition(|section| section.start_time <= now);

    sections
        .iter()
        .enumerate()
        .map(|(i, _)| match live {
            Some(l) if i == l => SectionStatus::Live,
            Some(l) if i == l + 1 => SectionStatus::UpNext,
            Some(l) if i < l => SectionStatus::Past,
            _ => SectionStatus::Upcoming,
        })
        .collect()
}

/// Index of the first section still ahead of `now`, for scroll-to-current.
///
/// `requested_day` is compared against the active day's display title by
/// string equality, as the original notification payload worked; a mismatch
/// is a no-op. Returns `None` when every section has already started.
pub fn scroll_target(
    sections: &[ScheduleSection],
    day_title: &str,
    requested_day: &str,
    now: i64,
) -> Option<usize> {
    if requested_day != day_title {
        return None;
    }
    sections.iter().position(|section| section.start_time > now)
}
