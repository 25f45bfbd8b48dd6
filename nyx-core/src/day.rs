//! Calendar-day comparisons in the reference timezone.
//!
//! Occurrences are instants, but the site reasons about days: "today",
//! "upcoming", "the 15th". All of those are decided on the calendar date the
//! instant falls on in one fixed timezone, never on raw UTC timestamps or the
//! machine's local clock.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::event::EventOccurrence;

/// Calendar date of `instant` in `tz`.
pub fn calendar_day(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// True when both instants fall on the same calendar date in `tz`.
pub fn is_same_day(a: &DateTime<Utc>, b: &DateTime<Utc>, tz: &Tz) -> bool {
    calendar_day(a, tz) == calendar_day(b, tz)
}

/// Map a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times
/// skipped by a forward transition resolve to the same wall time one hour later.
pub fn resolve_local(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => match tz.from_local_datetime(&(naive + Duration::hours(1))) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            LocalResult::None => naive.and_utc(),
        },
    }
}

/// First instant of `date` in `tz`.
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(NaiveTime::MIN), tz)
}

/// Last whole second of `date` in `tz`.
pub fn end_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    resolve_local(date.and_time(last), tz)
}

/// Occurrences on `now`'s calendar day or later, ascending.
pub fn upcoming<'a>(
    occurrences: &'a [EventOccurrence],
    now: &DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a EventOccurrence> {
    let today = calendar_day(now, tz);
    select(occurrences, |o| o.calendar_day(tz) >= today)
}

/// Occurrences strictly before `now`'s calendar day, ascending.
pub fn past<'a>(
    occurrences: &'a [EventOccurrence],
    now: &DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a EventOccurrence> {
    let today = calendar_day(now, tz);
    select(occurrences, |o| o.calendar_day(tz) < today)
}

/// Occurrences on the same calendar day as `day`, ascending.
pub fn on_date<'a>(
    occurrences: &'a [EventOccurrence],
    day: &DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a EventOccurrence> {
    on_calendar_day(occurrences, calendar_day(day, tz), tz)
}

/// Occurrences whose calendar day in `tz` is `date`, ascending.
pub fn on_calendar_day<'a>(
    occurrences: &'a [EventOccurrence],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a EventOccurrence> {
    select(occurrences, |o| o.calendar_day(tz) == date)
}

fn select<'a, F>(occurrences: &'a [EventOccurrence], keep: F) -> Vec<&'a EventOccurrence>
where
    F: Fn(&EventOccurrence) -> bool,
{
    let mut selected: Vec<&EventOccurrence> = occurrences.iter().filter(|o| keep(o)).collect();
    selected.sort_by_key(|o| o.occurrence_date);
    selected
}
