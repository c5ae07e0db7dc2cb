use confab_types::{FavoriteSet, SpeakerRecord};
use serde::Serialize;

/// One directory section: speakers sharing the same uppercase initial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerSection {
    pub label: String,
    pub speakers: Vec<SpeakerRecord>,
}

/// Group a name-ordered speaker list into sections by first letter.
///
/// Like the schedule grouper this works on consecutive runs and preserves
/// the input order; the store delivers speakers already sorted by name.
/// Speakers with an empty name fall into a "#" bucket.
pub fn group_speakers_by_initial(speakers: Vec<SpeakerRecord>) -> Vec<SpeakerSection> {
    let mut sections: Vec<SpeakerSection> = Vec::new();

    for speaker in speakers {
        let label = initial_of(&speaker.name);
        match sections.last_mut() {
            Some(section) if section.label == label => section.speakers.push(speaker),
            _ => sections.push(SpeakerSection {
                label,
                speakers: vec![speaker],
            }),
        }
    }

    sections
}

/// Case-insensitive name search plus optional favorites-only restriction.
/// Pure subset, order preserved. `term = None` means no text filtering.
pub fn filter_speakers(
    speakers: Vec<SpeakerRecord>,
    term: Option<&str>,
    favorites_only: bool,
    favorites: &FavoriteSet,
) -> Vec<SpeakerRecord> {
    let needle = term.map(str::to_lowercase);

    speakers
        .into_iter()
        .filter(|speaker| {
            if favorites_only && !favorites.contains_speaker(speaker.id) {
                return false;
            }
            match &needle {
                Some(needle) => speaker.name.to_lowercase().contains(needle.as_str()),
                None => true,
            }
        })
        .collect()
}

/// Fast-scroll index titles; only worth showing for four or more sections.
pub fn section_index_titles(sections: &[SpeakerSection]) -> Vec<String> {
    if sections.len() < 4 {
        Vec::new()
    } else {
        sections.iter().map(|s| s.label.clone()).collect()
    }
}

fn initial_of(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "#".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speaker(id: i64, name: &str) -> SpeakerRecord {
        SpeakerRecord {
            id,
            name: name.to_string(),
            twitter: None,
            url: None,
            bio: None,
        }
    }

    #[test]
    fn groups_consecutive_initials() {
        let sections = group_speakers_by_initial(vec![
            speaker(1, "Ada Lovelace"),
            speaker(2, "alan turing"),
            speaker(3, "Barbara Liskov"),
            speaker(4, "Grace Hopper"),
        ]);

        let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "G"]);
        assert_eq!(sections[0].speakers.len(), 2);
    }

    #[test]
    fn empty_name_goes_to_hash_bucket() {
        let sections = group_speakers_by_initial(vec![speaker(1, "")]);
        assert_eq!(sections[0].label, "#");
    }

    #[test]
    fn search_is_case_insensitive() {
        let kept = filter_speakers(
            vec![speaker(1, "Ada Lovelace"), speaker(2, "Grace Hopper")],
            Some("lovelace"),
            false,
            &FavoriteSet::default(),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn favorites_only_restricts_the_result() {
        let mut favorites = FavoriteSet::default();
        favorites.speakers.insert(2);

        let kept = filter_speakers(
            vec![speaker(1, "Ada Lovelace"), speaker(2, "Grace Hopper")],
            None,
            true,
            &favorites,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn search_and_favorites_combine() {
        let mut favorites = FavoriteSet::default();
        favorites.speakers.insert(1);

        let kept = filter_speakers(
            vec![speaker(1, "Ada Lovelace"), speaker(2, "Grace Hopper")],
            Some("grace"),
            true,
            &favorites,
        );
        assert!(kept.is_empty());
    }

    #[test]
    fn index_titles_require_four_sections() {
        let three = group_speakers_by_initial(vec![
            speaker(1, "Ada"),
            speaker(2, "Bob"),
            speaker(3, "Carol"),
        ]);
        assert!(section_index_titles(&three).is_empty());

        let four = group_speakers_by_initial(vec![
            speaker(1, "Ada"),
            speaker(2, "Bob"),
            speaker(3, "Carol"),
            speaker(4, "Dan"),
        ]);
        assert_eq!(section_index_titles(&four), vec!["A", "B", "C", "D"]);
    }
}
