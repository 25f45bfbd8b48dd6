//! Terminal rendering for nyx types.
//!
//! Plain-text helpers (labels, time columns) are kept separate from the
//! colored output so they can be tested without ANSI codes.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use nyx_core::category::{Category, CategoryStyle, style_for};
use nyx_core::config::SocialLinks;
use nyx_core::contact::ContactInfo;
use nyx_core::month::{CalendarDay, Month, WEEKDAY_HEADERS_ES};
use nyx_core::{EventOccurrence, RawEvent};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn accent(style: &CategoryStyle, text: &str) -> String {
    let (r, g, b) = style.rgb;
    text.truecolor(r, g, b).to_string()
}

impl Render for Category {
    fn render(&self) -> String {
        let style = self.style();
        format!(
            "{} {} {}",
            accent(style, "●"),
            accent(style, style.name).bold(),
            format!("({})", self.id()).dimmed()
        )
    }
}

impl Render for ContactInfo {
    fn render(&self) -> String {
        [
            format!("{} {}", "Email".dimmed(), self.email),
            format!("{} {}", "Teléfono".dimmed(), self.phone),
            format!("{} {}", "Dirección".dimmed(), self.address.one_line()),
        ]
        .join("\n")
    }
}

impl Render for SocialLinks {
    fn render(&self) -> String {
        [
            format!("{} {}", "Instagram".dimmed(), self.instagram),
            format!("{} {}", "FetLife".dimmed(), self.fetlife),
        ]
        .join("\n")
    }
}

/// Human-readable day label relative to `today` (e.g. "Today", "Tomorrow", "Wed May 7").
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// The time column of an event line.
///
/// The CMS time string wins when present. Date-only events sit at local
/// midnight and show as "all-day".
pub fn time_label(occurrence: &EventOccurrence, tz: &Tz) -> String {
    if let Some(time) = occurrence.event.time.as_deref() {
        return time.to_string();
    }

    let local = occurrence.occurrence_date.with_timezone(tz).time();
    if local == NaiveTime::MIN {
        "all-day".to_string()
    } else {
        format!("{:02}:{:02}", local.hour(), local.minute())
    }
}

/// "weekly until 27 Jan 2025" for weekly events with an end date.
pub fn recurrence_note(event: &RawEvent) -> Option<String> {
    if !event.is_weekly() {
        return None;
    }
    Some(match event.recurrence_end {
        Some(end) => format!("weekly until {}", end.format("%-d %b %Y")),
        None => "weekly".to_string(),
    })
}

/// One listing line: time, title, category tag, location, recurrence.
pub fn occurrence_line(occurrence: &EventOccurrence, tz: &Tz) -> String {
    let event = &occurrence.event;
    let style = style_for(event.category.as_deref());

    let mut line = format!(
        "  {:>13}  {} {}",
        time_label(occurrence, tz),
        event.title.bold(),
        accent(style, &format!("[{}]", style.name))
    );

    if let Some(location) = event.location.as_deref() {
        line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
    }
    if let Some(note) = recurrence_note(event) {
        line.push_str(&format!(" {}", format!("({})", note).italic()));
    }

    line
}

/// Listing grouped under a bold header per calendar day.
pub fn occurrence_list(occurrences: &[&EventOccurrence], tz: &Tz, today: NaiveDate) -> String {
    let mut lines = Vec::new();
    let mut current: Option<NaiveDate> = None;

    for occurrence in occurrences {
        let day = occurrence.calendar_day(tz);
        if current != Some(day) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(date_label(day, today).bold().to_string());
            current = Some(day);
        }
        lines.push(occurrence_line(occurrence, tz));
    }

    lines.join("\n")
}

/// Detail view of one event: the fields the listing leaves out.
pub fn event_details(event: &RawEvent, tz: &Tz) -> String {
    let style = style_for(event.category.as_deref());
    let mut lines = vec![
        format!("{} {}", event.title.bold(), accent(style, &format!("[{}]", style.name))),
    ];

    let when = match event.date {
        Some(date) => {
            let local = date.with_timezone(tz);
            let time = event
                .time
                .clone()
                .unwrap_or_else(|| local.format("%H:%M").to_string());
            format!("{} {}", local.format("%a %b %-d %Y"), time)
        }
        None => "date to be announced".to_string(),
    };
    lines.push(format!("{} {}", "When".dimmed(), when));

    if let Some(note) = recurrence_note(event) {
        lines.push(format!("{} {}", "Repeats".dimmed(), note));
    }
    if let Some(location) = event.location.as_deref() {
        lines.push(format!("{} {}", "Where".dimmed(), location));
    }
    if !event.tags.is_empty() {
        lines.push(format!("{} {}", "Tags".dimmed(), event.tags.join(", ")));
    }
    if let Some(link) = event.link.as_deref() {
        lines.push(format!("{} {}", "Link".dimmed(), link));
    }

    if !event.description.is_empty() {
        lines.push(String::new());
        lines.push(event.description.plain_text());
    }

    if event.main_image.is_some() || !event.images.is_empty() {
        lines.push(String::new());
        lines.push("Images".dimmed().to_string());
        lines.extend(
            event
                .main_image
                .iter()
                .chain(event.images.iter())
                .map(|url| format!("  {}", url)),
        );
    }

    lines.join("\n")
}

/// Month grid, one line per week. Days with events are highlighted,
/// today is underlined and padding days are dimmed.
pub fn month_grid(month: Month, grid: &[CalendarDay], today: NaiveDate) -> String {
    let width = WEEKDAY_HEADERS_ES.len() * 4 - 1;
    let mut lines = vec![
        format!("{:^width$}", month.label_es(), width = width).bold().to_string(),
        WEEKDAY_HEADERS_ES
            .iter()
            .map(|h| format!("{:>3}", h))
            .collect::<Vec<_>>()
            .join(" ")
            .dimmed()
            .to_string(),
    ];

    for week in grid.chunks(7) {
        let cells: Vec<String> = week.iter().map(|day| grid_cell(day, today)).collect();
        lines.push(cells.join(" "));
    }

    lines.join("\n")
}

fn grid_cell(day: &CalendarDay, today: NaiveDate) -> String {
    let number = format!("{:>3}", day.date.format("%-d"));

    if !day.in_month {
        return number.dimmed().to_string();
    }

    let number = if day.has_events() {
        number.on_truecolor(178, 1, 24).bold().to_string()
    } else {
        number
    };

    if day.date == today {
        number.underline().to_string()
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_core::day::{resolve_local, start_of_day};
    use nyx_core::recurrence::{ExpandOptions, expand};
    use nyx_core::{Block, Description};

    const MADRID: Tz = chrono_tz::Europe::Madrid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn single(event: RawEvent) -> EventOccurrence {
        expand(&[event], &ExpandOptions::default()).remove(0)
    }

    #[test]
    fn relative_date_labels() {
        let today = date(2025, 5, 7);
        assert_eq!(date_label(today, today), "Today");
        assert_eq!(date_label(date(2025, 5, 8), today), "Tomorrow");
        assert_eq!(date_label(date(2025, 5, 6), today), "Yesterday");
        assert_eq!(date_label(date(2025, 5, 14), today), "Wed May 14");
        assert_eq!(date_label(date(2026, 1, 2), today), "Fri Jan 2 2026");
    }

    #[test]
    fn time_prefers_cms_string() {
        let mut event = RawEvent::new(1, "Taller", Some(start_of_day(date(2025, 5, 7), &MADRID)));
        event.time = Some("19:00 - 21:00".to_string());
        assert_eq!(time_label(&single(event), &MADRID), "19:00 - 21:00");
    }

    #[test]
    fn time_falls_back_to_local_clock() {
        let at = resolve_local(date(2025, 5, 7).and_hms_opt(19, 30, 0).unwrap(), &MADRID);
        let timed = RawEvent::new(1, "Taller", Some(at));
        assert_eq!(time_label(&single(timed), &MADRID), "19:30");

        let all_day = RawEvent::new(2, "Jornada", Some(start_of_day(date(2025, 5, 7), &MADRID)));
        assert_eq!(time_label(&single(all_day), &MADRID), "all-day");
    }

    #[test]
    fn recurrence_notes() {
        let start = Some(start_of_day(date(2025, 1, 6), &MADRID));

        assert_eq!(recurrence_note(&RawEvent::new(1, "Suelto", start)), None);
        assert_eq!(
            recurrence_note(&RawEvent::new(2, "Semanal", start).weekly_until(date(2025, 1, 27))),
            Some("weekly until 27 Jan 2025".to_string())
        );
    }

    #[test]
    fn listing_groups_by_day() {
        let events = vec![
            RawEvent::new(1, "Uno", Some(start_of_day(date(2025, 5, 7), &MADRID))),
            RawEvent::new(2, "Dos", Some(start_of_day(date(2025, 5, 7), &MADRID))),
            RawEvent::new(3, "Tres", Some(start_of_day(date(2025, 5, 8), &MADRID))),
        ];
        let occurrences = expand(&events, &ExpandOptions::default());
        let refs: Vec<&EventOccurrence> = occurrences.iter().collect();

        let output = occurrence_list(&refs, &MADRID, date(2025, 5, 7));
        let lines: Vec<&str> = output.lines().collect();

        // header, two events, blank separator, header, one event
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Today"));
        assert!(lines[1].contains("Uno"));
        assert!(lines[2].contains("Dos"));
        assert!(lines[3].is_empty());
        assert!(lines[4].contains("Tomorrow"));
        assert!(lines[5].contains("Tres"));
    }

    #[test]
    fn event_details_show_full_record() {
        let at = resolve_local(date(2025, 1, 6).and_hms_opt(19, 0, 0).unwrap(), &MADRID);
        let mut event = RawEvent::new(12, "Taller de Shibari", Some(at)).weekly_until(date(2025, 1, 27));
        event.category = Some("shibari".to_string());
        event.location = Some("Sala de Talleres".to_string());
        event.tags = vec!["Taller".to_string(), "Práctico".to_string()];
        event.link = Some("https://example.com/inscripcion".to_string());
        event.description = Description::Blocks(vec![
            Block::Paragraph("Nivel inicial".to_string()),
            Block::List(vec!["Cuerda".to_string(), "Ropa cómoda".to_string()]),
        ]);
        event.main_image = Some("https://cdn/shibari.jpg".to_string());
        event.images = vec!["https://cdn/1.jpg".to_string()];

        let output = event_details(&event, &MADRID);

        assert!(output.contains("Taller de Shibari"));
        assert!(output.contains("Shibari: Ata2"));
        assert!(output.contains("Mon Jan 6 2025 19:00"));
        assert!(output.contains("weekly until 27 Jan 2025"));
        assert!(output.contains("Sala de Talleres"));
        assert!(output.contains("Taller, Práctico"));
        assert!(output.contains("https://example.com/inscripcion"));
        assert!(output.contains("Nivel inicial\n\n- Cuerda\n- Ropa cómoda"));
        assert!(output.contains("  https://cdn/shibari.jpg\n  https://cdn/1.jpg"));
    }

    #[test]
    fn event_details_without_date_or_extras() {
        let output = event_details(&RawEvent::new(3, "Pendiente", None), &MADRID);

        assert!(output.contains("date to be announced"));
        assert!(!output.contains("Images"));
        assert!(!output.contains("Tags"));
    }

    #[test]
    fn grid_has_one_line_per_week() {
        let month = Month::new(2025, 5).unwrap();
        let grid = nyx_core::month::month_grid(month, &[], &MADRID);

        let output = month_grid(month, &grid, date(2025, 5, 7));
        // title, headers, five weeks
        assert_eq!(output.lines().count(), 7);
        assert!(output.contains("mayo 2025"));
    }
}
