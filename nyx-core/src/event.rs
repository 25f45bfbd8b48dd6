//! Event types shared by the parser, the expander and the listings.
//!
//! `RawEvent` is one record as the CMS publishes it, already normalized.
//! `EventOccurrence` is a concrete instance of a `RawEvent` on one date;
//! a weekly event produces many of them.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::day::calendar_day;

pub type EventId = i64;

/// How an event repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    /// A value the CMS sent that has no expansion rule (e.g. "monthly").
    /// Behaves like `None`.
    Unrecognized(String),
}

impl Recurrence {
    /// Read the CMS `recurrenceType` field. Absent, null and "none" all mean no recurrence.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Recurrence::None,
            Some(v) if v.eq_ignore_ascii_case("none") => Recurrence::None,
            Some(v) if v.eq_ignore_ascii_case("weekly") => Recurrence::Weekly,
            Some(v) => Recurrence::Unrecognized(v.to_string()),
        }
    }
}

/// One block of a rich-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(String),
    List(Vec<String>),
}

/// Event description, either plain text or rich-text blocks from the CMS editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Description {
    #[default]
    Empty,
    Text(String),
    Blocks(Vec<Block>),
}

impl Description {
    /// Flatten to plain text: paragraphs separated by blank lines, list items as `- item`.
    /// Blank paragraphs are dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Description::Empty => String::new(),
            Description::Text(text) => text.trim().to_string(),
            Description::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    Block::Paragraph(text) if text.trim().is_empty() => None,
                    Block::Paragraph(text) => Some(text.trim().to_string()),
                    Block::List(items) if items.is_empty() => None,
                    Block::List(items) => Some(
                        items
                            .iter()
                            .map(|item| format!("- {}", item.trim()))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ),
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty()
    }
}

/// An event record from the CMS (normalized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: EventId,
    pub title: String,
    pub description: Description,
    /// Anchor instant; the first occurrence of a recurring event.
    /// `None` when the CMS record had no usable date.
    pub date: Option<DateTime<Utc>>,
    /// Free-form time of day as entered in the CMS (e.g. "19:00 - 21:00")
    pub time: Option<String>,
    pub location: Option<String>,
    /// Category identifier as sent by the CMS, see `Category::from_id`
    pub category: Option<String>,
    pub main_image: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub link: Option<String>,

    // Recurrence fields
    pub recurrence: Recurrence,
    /// Last calendar day (inclusive) a weekly event repeats on
    pub recurrence_end: Option<NaiveDate>,
}

impl RawEvent {
    /// A bare event with only the identifying fields set.
    pub fn new(id: EventId, title: impl Into<String>, date: Option<DateTime<Utc>>) -> Self {
        RawEvent {
            id,
            title: title.into(),
            description: Description::Empty,
            date,
            time: None,
            location: None,
            category: None,
            main_image: None,
            images: Vec::new(),
            tags: Vec::new(),
            link: None,
            recurrence: Recurrence::None,
            recurrence_end: None,
        }
    }

    pub fn weekly_until(mut self, end: NaiveDate) -> Self {
        self.recurrence = Recurrence::Weekly;
        self.recurrence_end = Some(end);
        self
    }

    pub fn is_weekly(&self) -> bool {
        self.recurrence == Recurrence::Weekly
    }

    pub fn category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_id)
    }
}

/// A concrete instance of a `RawEvent` on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOccurrence {
    /// The source record with `date` set to `occurrence_date`
    pub event: RawEvent,
    pub occurrence_date: DateTime<Utc>,
    /// Id of the record this occurrence was generated from
    pub original_event_id: EventId,
    /// True only for the occurrence on the record's own date
    pub is_original: bool,
}

impl EventOccurrence {
    pub(crate) fn new(event: &RawEvent, at: DateTime<Utc>, is_original: bool) -> Self {
        let mut copy = event.clone();
        copy.date = Some(at);

        EventOccurrence {
            event: copy,
            occurrence_date: at,
            original_event_id: event.id,
            is_original,
        }
    }

    /// Calendar day of this occurrence in the given timezone.
    pub fn calendar_day(&self, tz: &Tz) -> NaiveDate {
        calendar_day(&self.occurrence_date, tz)
    }

    pub fn category(&self) -> Option<Category> {
        self.event.category()
    }

    /// This occurrence as a standalone, non-recurring record.
    pub fn to_concrete(&self) -> RawEvent {
        RawEvent {
            date: Some(self.occurrence_date),
            recurrence: Recurrence::None,
            recurrence_end: None,
            ..self.event.clone()
        }
    }
}

impl std::fmt::Display for EventOccurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurrence_from_wire_values() {
        assert_eq!(Recurrence::from_wire(None), Recurrence::None);
        assert_eq!(Recurrence::from_wire(Some("")), Recurrence::None);
        assert_eq!(Recurrence::from_wire(Some("none")), Recurrence::None);
        assert_eq!(Recurrence::from_wire(Some("weekly")), Recurrence::Weekly);
        assert_eq!(Recurrence::from_wire(Some("Weekly")), Recurrence::Weekly);
        assert_eq!(
            Recurrence::from_wire(Some("monthly")),
            Recurrence::Unrecognized("monthly".to_string())
        );
    }

    #[test]
    fn plain_text_joins_paragraphs_and_lists() {
        let description = Description::Blocks(vec![
            Block::Paragraph("Taller para principiantes.".to_string()),
            Block::Paragraph("   ".to_string()),
            Block::List(vec!["Cuerdas".to_string(), "Agua".to_string()]),
        ]);

        assert_eq!(
            description.plain_text(),
            "Taller para principiantes.\n\n- Cuerdas\n- Agua"
        );
    }

    #[test]
    fn blank_description_is_empty() {
        assert!(Description::Empty.is_empty());
        assert!(Description::Text("  ".to_string()).is_empty());
        assert!(Description::Blocks(vec![Block::Paragraph(String::new())]).is_empty());
    }

    #[test]
    fn concrete_copy_drops_recurrence() {
        let date = DateTime::parse_from_rfc3339("2025-01-06T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2025-01-13T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let event = RawEvent::new(1, "Shibari", Some(date))
            .weekly_until(NaiveDate::from_ymd_opt(2025, 1, 27).unwrap());

        let occurrence = EventOccurrence::new(&event, later, false);
        let concrete = occurrence.to_concrete();

        assert_eq!(concrete.id, 1);
        assert_eq!(concrete.date, Some(later));
        assert_eq!(concrete.recurrence, Recurrence::None);
        assert_eq!(concrete.recurrence_end, None);
    }
}
