//! Normalization of the content API's event documents.
//!
//! The CMS has published events in several shapes over time. Every accepted
//! shape is converted here into `RawEvent` before anything else looks at it:
//!
//! - Strapi v4: `{"data": [{"id": 1, "attributes": {...}}]}`
//! - Strapi v5: `{"data": [{"id": 1, "documentId": "...", ...}]}`
//! - a bare array of flat records (fixtures and older exports)
//!
//! A record that can't be read is reported as a `RecordError` and skipped;
//! the rest of the document is still returned.

mod media;
mod rich_text;

pub use media::{resolve_image, resolve_images};
pub use rich_text::parse_description;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::day::{calendar_day, resolve_local, start_of_day};
use crate::error::{CmsError, CmsResult, RecordError};
use crate::event::{RawEvent, Recurrence};

/// Wire shape a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    StrapiV4,
    StrapiV5,
    Flat,
}

/// Events read from one document, plus the records that were skipped.
#[derive(Debug, Default)]
pub struct ParsedEvents {
    pub events: Vec<RawEvent>,
    pub errors: Vec<RecordError>,
}

/// Event fields as the CMS names them. Polymorphic fields stay as JSON values
/// and are resolved afterwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    title: Option<String>,
    #[serde(default)]
    description: Value,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    #[serde(default)]
    category: Value,
    #[serde(default)]
    main_image: Value,
    #[serde(default)]
    images: Value,
    #[serde(default)]
    tags: Value,
    link: Option<String>,
    recurrence_type: Option<String>,
    recurrence_end_date: Option<String>,
}

/// Parse an events document. Date-only values are read as calendar days in `tz`.
pub fn parse_events(json: &str, tz: &Tz) -> CmsResult<ParsedEvents> {
    let document: Value = serde_json::from_str(json)?;
    let (records, enveloped) = records_of(document)?;

    let mut parsed = ParsedEvents::default();

    for (index, record) in records.into_iter().enumerate() {
        match parse_record(record, enveloped, tz) {
            Ok(event) => parsed.events.push(event),
            Err((id, message)) => {
                debug!(index, ?id, %message, "skipping CMS record");
                parsed.errors.push(RecordError { index, id, message });
            }
        }
    }

    Ok(parsed)
}

/// The list of records in a document, and whether it came inside a `data` envelope.
pub(crate) fn records_of(document: Value) -> CmsResult<(Vec<Value>, bool)> {
    match document {
        Value::Array(items) => Ok((items, false)),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok((items, true)),
            Some(Value::Null) => Ok((Vec::new(), true)),
            Some(other) => Err(CmsError::UnknownShape(format!(
                "expected `data` to be a list, found {}",
                json_kind(&other)
            ))),
            None => Err(CmsError::UnknownShape(
                "object without a `data` field".to_string(),
            )),
        },
        other => Err(CmsError::UnknownShape(format!(
            "expected a list or an object, found {}",
            json_kind(&other)
        ))),
    }
}

impl WireShape {
    pub fn detect(record: &Map<String, Value>, enveloped: bool) -> WireShape {
        if record.get("attributes").is_some_and(Value::is_object) {
            WireShape::StrapiV4
        } else if enveloped {
            WireShape::StrapiV5
        } else {
            WireShape::Flat
        }
    }
}

/// The field map of a record: `attributes` for v4, the record itself otherwise.
pub(crate) fn fields_of(mut record: Map<String, Value>, shape: WireShape) -> Map<String, Value> {
    match shape {
        WireShape::StrapiV4 => match record.remove("attributes") {
            Some(Value::Object(attributes)) => attributes,
            _ => Map::new(),
        },
        WireShape::StrapiV5 | WireShape::Flat => record,
    }
}

fn parse_record(record: Value, enveloped: bool, tz: &Tz) -> Result<RawEvent, (Option<i64>, String)> {
    let record = match record {
        Value::Object(map) => map,
        other => return Err((None, format!("expected an object, found {}", json_kind(&other)))),
    };

    let id = record
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| (None::<i64>, "missing integer `id`".to_string()))?;

    let shape = WireShape::detect(&record, enveloped);
    let fields = fields_of(record, shape);

    let wire: WireEvent =
        serde_json::from_value(Value::Object(fields)).map_err(|e| (Some(id), e.to_string()))?;

    Ok(RawEvent {
        id,
        title: wire.title.unwrap_or_default(),
        description: parse_description(&wire.description),
        date: wire.date.as_deref().and_then(|s| parse_instant(s, tz)),
        time: non_empty(wire.time),
        location: non_empty(wire.location),
        category: wire.category.as_str().map(str::to_string),
        main_image: resolve_image(&wire.main_image),
        images: resolve_images(&wire.images),
        tags: parse_tags(&wire.tags),
        link: non_empty(wire.link),
        recurrence: Recurrence::from_wire(wire.recurrence_type.as_deref()),
        recurrence_end: wire
            .recurrence_end_date
            .as_deref()
            .and_then(|s| parse_calendar_day(s, tz)),
    })
}

/// Parse an instant from the CMS.
///
/// Accepts RFC 3339, a floating `YYYY-MM-DDTHH:MM[:SS]` read as wall time in
/// `tz`, or `YYYY-MM-DD` read as the start of that day in `tz`.
pub fn parse_instant(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(resolve_local(naive, tz));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| start_of_day(date, tz))
}

/// Parse a calendar day. Full instants are reduced to their day in `tz`.
pub fn parse_calendar_day(s: &str, tz: &Tz) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_instant(s, tz).map(|dt| calendar_day(&dt, tz)))
}

fn parse_tags(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|tag| match tag {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
