//! Month navigation and the month grid of the events calendar.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use chrono_tz::Tz;

use crate::event::EventOccurrence;

const MONTH_NAMES_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Column headers of the grid, Monday first.
pub const WEEKDAY_HEADERS_ES: [&str; 7] = ["Lu", "Ma", "Mi", "Ju", "Vi", "Sá", "Do"];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    first: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Month { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Month {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }

    /// The month before. Saturates at the earliest representable month.
    pub fn previous(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Month { first })
            .unwrap_or(*self)
    }

    /// The month after. Saturates at the latest representable month.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Month { first })
            .unwrap_or(*self)
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first.iter_days().take_while(move |d| d.month() == month)
    }

    /// Spanish label, e.g. "enero 2025".
    pub fn label_es(&self) -> String {
        format!("{} {}", MONTH_NAMES_ES[self.first.month0() as usize], self.year())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

impl FromStr for Month {
    type Err = String;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(Month::containing)
            .map_err(|_| format!("Invalid month '{}'. Expected YYYY-MM", s))
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Occurrences on this calendar day
    pub event_count: usize,
    /// False for the padding days of neighbouring months
    pub in_month: bool,
}

impl CalendarDay {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Monday-first grid of whole weeks covering `month`.
///
/// Days from the neighbouring months pad the first and last week and are
/// flagged `in_month = false`. Event counts are by calendar day in `tz`.
pub fn month_grid(month: Month, occurrences: &[EventOccurrence], tz: &Tz) -> Vec<CalendarDay> {
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for occurrence in occurrences {
        *counts.entry(occurrence.calendar_day(tz)).or_default() += 1;
    }

    let first = month.first_day();
    let last = month.last_day();
    let leading = i64::from(first.weekday().num_days_from_monday());
    let trailing = 6 - i64::from(last.weekday().num_days_from_monday());

    let start = first - Duration::days(leading);
    let end = last + Duration::days(trailing);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| CalendarDay {
            date,
            event_count: counts.get(&date).copied().unwrap_or(0),
            in_month: date.month() == month.month() && date.year() == month.year(),
        })
        .collect()
}
