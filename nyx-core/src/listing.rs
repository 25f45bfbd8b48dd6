//! Filters for the events listing and the home page highlights.
//!
//! The listing state (view mode, active categories, selected day) is a plain
//! value; every recomputation passes it in together with the occurrences and
//! the current time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::category::Category;
use crate::day::{calendar_day, upcoming};
use crate::event::{EventId, EventOccurrence, RawEvent};

/// Which side of today the listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    All,
    Upcoming,
    Past,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::All => "all",
            ViewMode::Upcoming => "upcoming",
            ViewMode::Past => "past",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ViewMode::All),
            "upcoming" => Ok(ViewMode::Upcoming),
            "past" => Ok(ViewMode::Past),
            _ => Err(format!(
                "Invalid view '{}'. Expected all, upcoming or past",
                s
            )),
        }
    }
}

/// Listing state. An empty category list means every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub view: ViewMode,
    pub categories: Vec<Category>,
    pub day: Option<NaiveDate>,
}

impl EventFilter {
    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, category: Category) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Events without a known category only pass when no category filter is active.
    pub fn matches_category(&self, occurrence: &EventOccurrence) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        occurrence
            .category()
            .is_some_and(|category| self.categories.contains(&category))
    }

    /// Occurrences passing the category, view and day filters, ascending.
    pub fn apply<'a>(
        &self,
        occurrences: &'a [EventOccurrence],
        now: &DateTime<Utc>,
        tz: &Tz,
    ) -> Vec<&'a EventOccurrence> {
        let today = calendar_day(now, tz);

        let mut selected: Vec<&EventOccurrence> = occurrences
            .iter()
            .filter(|o| self.matches_category(o))
            .filter(|o| {
                let day = o.calendar_day(tz);
                match self.view {
                    ViewMode::All => true,
                    ViewMode::Upcoming => day >= today,
                    ViewMode::Past => day < today,
                }
            })
            .filter(|o| self.day.is_none_or(|selected| o.calendar_day(tz) == selected))
            .collect();

        selected.sort_by_key(|o| o.occurrence_date);
        selected
    }
}

/// The next `count` upcoming occurrences, for the home page.
pub fn featured<'a>(
    occurrences: &'a [EventOccurrence],
    now: &DateTime<Utc>,
    tz: &Tz,
    count: usize,
) -> Vec<&'a EventOccurrence> {
    upcoming(occurrences, now, tz).into_iter().take(count).collect()
}

pub fn find_event(events: &[RawEvent], id: EventId) -> Option<&RawEvent> {
    events.iter().find(|event| event.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::start_of_day;
    use crate::recurrence::{ExpandOptions, expand};

    const MADRID: Tz = chrono_tz::Europe::Madrid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: i64, category: Option<&str>, day: NaiveDate) -> RawEvent {
        let mut event = RawEvent::new(id, format!("event {id}"), Some(start_of_day(day, &MADRID)));
        event.category = category.map(str::to_string);
        event
    }

    fn fixture() -> Vec<EventOccurrence> {
        let events = vec![
            event(1, Some("shibari"), date(2025, 5, 1)),
            event(2, Some("lecture"), date(2025, 5, 5)),
            event(3, Some("cineforum"), date(2025, 5, 10)),
            event(4, None, date(2025, 5, 12)),
            event(5, Some("shibari"), date(2025, 5, 12)),
        ];
        expand(&events, &ExpandOptions::default())
    }

    fn ids(selected: &[&EventOccurrence]) -> Vec<i64> {
        selected.iter().map(|o| o.event.id).collect()
    }

    #[test]
    fn view_mode_parses() {
        assert_eq!("upcoming".parse::<ViewMode>(), Ok(ViewMode::Upcoming));
        assert_eq!("PAST".parse::<ViewMode>(), Ok(ViewMode::Past));
        assert!("later".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default().to_string(), "all");
    }

    #[test]
    fn default_filter_shows_everything() {
        let occurrences = fixture();
        let now = start_of_day(date(2025, 5, 5), &MADRID);

        let selected = EventFilter::default().apply(&occurrences, &now, &MADRID);
        assert_eq!(ids(&selected), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn view_modes_split_on_today() {
        let occurrences = fixture();
        let now = start_of_day(date(2025, 5, 5), &MADRID);

        let upcoming = EventFilter {
            view: ViewMode::Upcoming,
            ..EventFilter::default()
        };
        let past = EventFilter {
            view: ViewMode::Past,
            ..EventFilter::default()
        };

        assert_eq!(ids(&upcoming.apply(&occurrences, &now, &MADRID)), vec![2, 3, 4, 5]);
        assert_eq!(ids(&past.apply(&occurrences, &now, &MADRID)), vec![1]);
    }

    #[test]
    fn category_filter_excludes_uncategorized() {
        let occurrences = fixture();
        let now = start_of_day(date(2025, 5, 5), &MADRID);

        let mut filter = EventFilter::default();
        filter.toggle_category(Category::Shibari);
        filter.toggle_category(Category::Cineforum);
        assert_eq!(ids(&filter.apply(&occurrences, &now, &MADRID)), vec![1, 3, 5]);

        filter.toggle_category(Category::Shibari);
        assert_eq!(filter.categories, vec![Category::Cineforum]);
        assert_eq!(ids(&filter.apply(&occurrences, &now, &MADRID)), vec![3]);

        filter.clear_categories();
        assert_eq!(filter.apply(&occurrences, &now, &MADRID).len(), 5);
    }

    #[test]
    fn selected_day_combines_with_other_filters() {
        let occurrences = fixture();
        let now = start_of_day(date(2025, 5, 5), &MADRID);

        let filter = EventFilter {
            day: Some(date(2025, 5, 12)),
            ..EventFilter::default()
        };
        assert_eq!(ids(&filter.apply(&occurrences, &now, &MADRID)), vec![4, 5]);

        let past_only = EventFilter {
            view: ViewMode::Past,
            day: Some(date(2025, 5, 12)),
            ..EventFilter::default()
        };
        assert!(past_only.apply(&occurrences, &now, &MADRID).is_empty());
    }

    #[test]
    fn featured_takes_next_upcoming() {
        let occurrences = fixture();
        let now = start_of_day(date(2025, 5, 6), &MADRID);

        assert_eq!(ids(&featured(&occurrences, &now, &MADRID, 2)), vec![3, 4]);
        assert_eq!(ids(&featured(&occurrences, &now, &MADRID, 10)), vec![3, 4, 5]);
    }

    #[test]
    fn find_event_by_id() {
        let events = vec![event(7, None, date(2025, 1, 1)), event(8, None, date(2025, 1, 2))];
        assert_eq!(find_event(&events, 8).map(|e| e.id), Some(8));
        assert!(find_event(&events, 9).is_none());
    }
}
