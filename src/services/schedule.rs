use chrono::{Datelike, Weekday};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::services::schedule_source::{BroadcastEvent, ScheduleFetchError, ScheduleSource};
use crate::utils::datetime::{
    format_local_time, parse_episode_timestamp, to_schedule_local, weekday_name,
};
use crate::utils::validation::normalize_title;

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_EPISODE: &str = "N/A";
pub const DEFAULT_STATUS: &str = "Unknown";
pub const DEFAULT_AIR_TYPE: &str = "sub";

/// One airing of a title: its kind (Sub/Dub/Raw) and local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastEntry {
    pub kind: String,
    pub local_time: String,
}

/// All airings of one title on one day, merged for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedAnime {
    pub display_title: String,
    pub episode: String,
    pub status: String,
    pub broadcast_entries: Vec<BroadcastEntry>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Primary sort key: accents stripped, lowercased. `Ōkami` folds to `okami`.
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-style title ordering.
///
/// Letters compare without accents or case first; an unaccented letter then
/// sorts before its accented form, and lowercase before uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Buckets raw events into the schedule for `target`.
///
/// Events without a parsable timestamp are skipped. Same-title events merge
/// into one record whose entries keep arrival order; the first event of a
/// title supplies its episode and status.
pub fn aggregate_by_day(events: &[BroadcastEvent], target: Weekday) -> Vec<AggregatedAnime> {
    let mut records: Vec<AggregatedAnime> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for event in events {
        let Some(instant) = event
            .episode_timestamp
            .as_deref()
            .and_then(parse_episode_timestamp)
        else {
            skipped += 1;
            tracing::debug!(
                "Skipping event {:?} with unusable timestamp {:?}",
                event.title,
                event.episode_timestamp
            );
            continue;
        };

        let local = to_schedule_local(instant);
        if local.weekday() != target {
            continue;
        }

        let display_title = non_empty(&event.english_title)
            .or_else(|| non_empty(&event.title))
            .unwrap_or(DEFAULT_TITLE);

        let entry = BroadcastEntry {
            kind: capitalize(
                &non_empty(&event.air_type)
                    .unwrap_or(DEFAULT_AIR_TYPE)
                    .to_lowercase(),
            ),
            local_time: format_local_time(&local),
        };

        let key = normalize_title(display_title);
        match index_by_key.get(&key) {
            Some(&index) => records[index].broadcast_entries.push(entry),
            None => {
                index_by_key.insert(key, records.len());
                records.push(AggregatedAnime {
                    display_title: display_title.to_string(),
                    episode: non_empty(&event.episode_number)
                        .unwrap_or(DEFAULT_EPISODE)
                        .to_string(),
                    status: non_empty(&event.status)
                        .unwrap_or(DEFAULT_STATUS)
                        .to_string(),
                    broadcast_entries: vec![entry],
                });
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} of {} events without a usable timestamp", skipped, events.len());
    }

    records.sort_by(|a, b| compare_titles(&a.display_title, &b.display_title));
    records
}

/// Fetches the upstream schedule and aggregates it per day.
///
/// Every call re-fetches; nothing is cached between queries.
#[derive(Clone)]
pub struct ScheduleAggregator {
    source: Arc<dyn ScheduleSource>,
}

impl ScheduleAggregator {
    pub fn new(source: Arc<dyn ScheduleSource>) -> Self {
        Self { source }
    }

    pub async fn anime_by_day(&self, day: Weekday) -> Result<Vec<AggregatedAnime>, ScheduleFetchError> {
        let events = self.source.fetch_events().await?;
        let records = aggregate_by_day(&events, day);
        tracing::debug!(
            "Aggregated {} events into {} titles for {}",
            events.len(),
            records.len(),
            weekday_name(day)
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, air_type: Option<&str>, timestamp: Option<&str>) -> BroadcastEvent {
        BroadcastEvent {
            title: Some(title.to_string()),
            air_type: air_type.map(str::to_string),
            episode_timestamp: timestamp.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("dub"), "Dub");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("r"), "R");
    }

    #[test]
    fn test_compare_titles_ignores_case() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(compare_titles("naruto", "Naruto"), Ordering::Less);
    }

    #[test]
    fn test_accented_titles_sort_with_their_base_letter() {
        let mut titles = vec!["Zom 100", "Übel Blatt", "Ōkami", "Pokémon", "Pokemon Horizons"];
        titles.sort_by(|a, b| compare_titles(a, b));
        assert_eq!(
            titles,
            vec!["Ōkami", "Pokémon", "Pokemon Horizons", "Übel Blatt", "Zom 100"]
        );
    }

    #[test]
    fn test_unaccented_form_sorts_first_on_tie() {
        assert_eq!(compare_titles("Pokemon", "Pokémon"), Ordering::Less);
        assert_eq!(compare_titles("Élan", "elan"), Ordering::Greater);
    }

    #[test]
    fn test_english_title_preferred_and_empty_falls_back() {
        let mut with_english = event("Shingeki no Kyojin", None, Some("2024-01-01T10:00:00Z"));
        with_english.english_title = Some("Attack on Titan".to_string());
        let mut empty_english = event("Sousou no Frieren", None, Some("2024-01-01T11:00:00Z"));
        empty_english.english_title = Some(String::new());

        let result = aggregate_by_day(&[with_english, empty_english], Weekday::Mon);
        let titles: Vec<&str> = result.iter().map(|a| a.display_title.as_str()).collect();
        assert_eq!(titles, vec!["Attack on Titan", "Sousou no Frieren"]);
    }

    #[test]
    fn test_missing_titles_use_placeholder() {
        let untitled = BroadcastEvent {
            episode_timestamp: Some("2024-01-01T10:00:00Z".to_string()),
            ..Default::default()
        };
        let result = aggregate_by_day(&[untitled], Weekday::Mon);
        assert_eq!(result[0].display_title, DEFAULT_TITLE);
        assert_eq!(result[0].episode, DEFAULT_EPISODE);
        assert_eq!(result[0].status, DEFAULT_STATUS);
        assert_eq!(result[0].broadcast_entries[0].kind, "Sub");
    }

    #[test]
    fn test_air_type_is_recased() {
        let result = aggregate_by_day(
            &[event("Naruto", Some("DUB"), Some("2024-01-01T10:00:00Z"))],
            Weekday::Mon,
        );
        assert_eq!(result[0].broadcast_entries[0].kind, "Dub");
    }
}
