//! Image fields from the CMS.
//!
//! An image may arrive as a plain URL or as an uploaded media object with
//! resized variants. Strapi v4 also wraps media in `{"data": {"attributes": ...}}`.

use serde_json::Value;

/// Resolve one image value to a URL, preferring the `small` variant, then
/// `thumbnail`, then the original upload.
pub fn resolve_image(value: &Value) -> Option<String> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
        Value::Object(map) => {
            if let Some(data) = map.get("data") {
                return resolve_image(data);
            }
            if let Some(attributes) = map.get("attributes") {
                return resolve_image(attributes);
            }

            format_url(value, "small")
                .or_else(|| format_url(value, "thumbnail"))
                .or_else(|| non_empty_str(map.get("url")))
        }
        Value::Array(items) => items.iter().find_map(resolve_image),
        _ => None,
    }
}

/// Resolve a gallery field to its URLs, skipping entries with no usable URL.
pub fn resolve_images(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(resolve_image).collect(),
        Value::Object(map) => match map.get("data") {
            Some(data) => resolve_images(data),
            None => resolve_image(value).into_iter().collect(),
        },
        other => resolve_image(other).into_iter().collect(),
    }
}

fn format_url(media: &Value, variant: &str) -> Option<String> {
    non_empty_str(media.get("formats")?.get(variant)?.get("url"))
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
