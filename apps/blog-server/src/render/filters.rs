//! Tera filters used by the page templates.

use std::collections::HashMap;

use blog_core::domain::{PREVIEW_WORDS, truncate_words};
use chrono::{DateTime, Utc};
use tera::Value;

/// Publication dates read like `Mar 05, 2024`.
pub const DATE_FORMAT: &str = "%b %d, %Y";

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Tera filter: keep the first `words` words (default 30).
pub fn truncatewords(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("truncatewords", "value", String, value);
    let words = match args.get("words") {
        Some(val) => tera::try_get_value!("truncatewords", "words", usize, val),
        None => PREVIEW_WORDS,
    };

    Ok(Value::String(truncate_words(&s, words)))
}

/// Tera filter: format an RFC 3339 timestamp with [`DATE_FORMAT`].
///
/// A missing date means the post is still a draft.
pub fn pubdate(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    if value.is_null() {
        return Ok(Value::String("Draft".to_string()));
    }

    let s = tera::try_get_value!("pubdate", "value", String, value);
    let date = DateTime::parse_from_rfc3339(&s)
        .map_err(|e| tera::Error::msg(format!("pubdate: cannot parse '{s}': {e}")))?;

    Ok(Value::String(format_date(&date.with_timezone(&Utc))))
}

/// Tera filter: blank lines start a new `<p>`, single newlines become `<br>`.
///
/// The text is HTML-escaped here, so the result must be piped through `safe`.
pub fn linebreaks(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = tera::try_get_value!("linebreaks", "value", String, value);
    let normalized = s.replace("\r\n", "\n");

    let html = normalized
        .split("\n\n")
        .map(|para| para.trim_matches('\n'))
        .filter(|para| !para.is_empty())
        .map(|para| {
            let lines: Vec<String> = para.split('\n').map(tera::escape_html).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(Value::String(html))
}
