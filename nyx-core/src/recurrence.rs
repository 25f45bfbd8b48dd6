//! Weekly recurrence expansion.
//!
//! Turns CMS records into the flat, date-ordered list of occurrences the
//! calendar and listings work with. A weekly record repeats every 7 days from
//! its anchor date up to and including its end date; the weekly step keeps
//! the event's wall-clock time in the reference timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;
use tracing::{debug, warn};

use crate::constants::MAX_OCCURRENCES;
use crate::day::{calendar_day, end_of_day, resolve_local};
use crate::event::{EventOccurrence, RawEvent, Recurrence};

/// Knobs for `expand`.
#[derive(Debug, Clone)]
pub struct ExpandOptions {
    /// Upper bound on occurrences per event, the original included
    pub max_occurrences: u16,
    /// Timezone whose calendar days bound the recurrence
    pub tz: Tz,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        ExpandOptions {
            max_occurrences: MAX_OCCURRENCES,
            tz: chrono_tz::Europe::Madrid,
        }
    }
}

/// Expand every event into its occurrences, sorted ascending by date.
///
/// - Events without a date contribute nothing.
/// - Every dated event contributes its original occurrence.
/// - Weekly events with an end date on or after the anchor also contribute
///   one occurrence per following week through the end date.
///
/// Ties keep the input order. Malformed recurrence data never fails the
/// batch; the affected event degrades to its original occurrence.
pub fn expand(events: &[RawEvent], options: &ExpandOptions) -> Vec<EventOccurrence> {
    let mut expanded = Vec::new();

    for event in events {
        let Some(anchor) = event.date else {
            debug!(event_id = event.id, "skipping event without a date");
            continue;
        };

        expanded.push(EventOccurrence::new(event, anchor, true));

        for at in weekly_repeats(event, anchor, options) {
            expanded.push(EventOccurrence::new(event, at, false));
        }
    }

    expanded.sort_by_key(|o| o.occurrence_date);
    expanded
}

/// Occurrences after the anchor for a weekly event. Empty for anything else.
fn weekly_repeats(event: &RawEvent, anchor: DateTime<Utc>, options: &ExpandOptions) -> Vec<DateTime<Utc>> {
    match &event.recurrence {
        Recurrence::Weekly => {}
        Recurrence::None => return Vec::new(),
        Recurrence::Unrecognized(kind) => {
            debug!(
                event_id = event.id,
                recurrence = %kind,
                "unsupported recurrence type, keeping the original only"
            );
            return Vec::new();
        }
    }

    // No end date: single occurrence for now
    let Some(end) = event.recurrence_end else {
        return Vec::new();
    };

    if end < calendar_day(&anchor, &options.tz) {
        debug!(
            event_id = event.id,
            %end,
            "recurrence ends before it starts, keeping the original only"
        );
        return Vec::new();
    }

    if options.max_occurrences <= 1 {
        return Vec::new();
    }

    // A DTSTART inside the repeated hour of a fall-back transition is
    // rejected by the rule parser, so those anchors are stepped by hand
    let local = anchor.with_timezone(&options.tz).naive_local();
    if !matches!(options.tz.from_local_datetime(&local), LocalResult::Single(_)) {
        debug!(event_id = event.id, %local, "ambiguous local anchor, stepping weeks directly");
        return stepped_repeats(anchor, end, options);
    }

    let rrule_str = build_rrule_string(anchor, end, &options.tz);

    let rrule_set: RRuleSet = match rrule_str.parse() {
        Ok(set) => set,
        Err(e) => {
            warn!(
                event_id = event.id,
                error = %e,
                "recurrence rule rejected, keeping the original only"
            );
            return Vec::new();
        }
    };

    let result = rrule_set.all(options.max_occurrences);
    if result.limited {
        debug!(
            event_id = event.id,
            max = options.max_occurrences,
            "recurrence capped"
        );
    }

    // The first date of the set is DTSTART itself, already emitted as the original
    result
        .dates
        .iter()
        .skip(1)
        .map(|dt| dt.with_timezone(&Utc))
        .collect()
}

/// Weekly repeats computed on local wall-clock time, for anchors the rule
/// parser can't take. Later ambiguous times resolve to the earlier instant.
fn stepped_repeats(anchor: DateTime<Utc>, end: NaiveDate, options: &ExpandOptions) -> Vec<DateTime<Utc>> {
    let local = anchor.with_timezone(&options.tz).naive_local();
    let until = end_of_day(end, &options.tz);

    (1..i64::from(options.max_occurrences))
        .map(|week| resolve_local(local + Duration::weeks(week), &options.tz))
        .take_while(|at| *at <= until)
        .collect()
}

/// Build an iCalendar-format rule string for the rrule crate parser.
///
/// DTSTART carries the reference TZID so weekly steps follow local wall-clock
/// time. UNTIL is the last second of the end day in that zone, expressed in UTC.
fn build_rrule_string(anchor: DateTime<Utc>, end: NaiveDate, tz: &Tz) -> String {
    let local = anchor.with_timezone(tz).naive_local();
    let until = end_of_day(end, tz);

    [
        format!("DTSTART;TZID={}:{}", tz.name(), local.format("%Y%m%dT%H%M%S")),
        format!("RRULE:FREQ=WEEKLY;UNTIL={}", until.format("%Y%m%dT%H%M%SZ")),
    ]
    .join("\n")
}
