//! Conversions between TOML datetimes, duration strings and `chrono`.

use super::ModelError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use toml::value::Datetime;

static DURATION_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(ms|h|m|s)").expect("valid duration regex"));

const LOCAL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 datetime, a local datetime (taken as UTC) or a bare
/// date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Decodes an optional TOML datetime field.
///
/// Year-1 values are zero times written by older tools and read as unset.
pub fn decode_datetime(
    field: &'static str,
    value: Option<&Datetime>,
) -> Result<Option<DateTime<Utc>>, ModelError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let raw = value.to_string();
    let parsed = parse_timestamp(&raw).ok_or(ModelError::InvalidDatetime { field, value: raw })?;
    if parsed.year() <= 1 {
        return Ok(None);
    }
    Ok(Some(parsed))
}

/// Encodes a timestamp as a TOML offset datetime in UTC.
pub fn encode_datetime(
    field: &'static str,
    value: Option<DateTime<Utc>>,
) -> Result<Option<Datetime>, ModelError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let raw = value.to_rfc3339_opts(SecondsFormat::Secs, true);
    raw.parse::<Datetime>()
        .map(Some)
        .map_err(|_| ModelError::InvalidDatetime { field, value: raw })
}

/// Parses durations such as `72h`, `1h30m`, `90s` or `0`.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let trimmed = raw.trim();
    if trimmed == "0" {
        return Some(Duration::zero());
    }
    if trimmed.is_empty() {
        return None;
    }

    let mut total = Duration::zero();
    let mut consumed = 0;
    for caps in DURATION_PART_RE.captures_iter(trimmed) {
        let whole = caps.get(0)?;
        if whole.start() != consumed {
            return None;
        }
        consumed = whole.end();

        let amount: i64 = caps[1].parse().ok()?;
        let part = match &caps[2] {
            "h" => Duration::try_hours(amount)?,
            "m" => Duration::try_minutes(amount)?,
            "s" => Duration::try_seconds(amount)?,
            "ms" => Duration::try_milliseconds(amount)?,
            _ => return None,
        };
        total = total.checked_add(&part)?;
    }

    (consumed == trimmed.len()).then_some(total)
}

/// Formats a duration back into the compact `1h30m` form.
pub fn format_duration(value: Duration) -> String {
    let total_seconds = value.num_seconds();
    if total_seconds == 0 {
        return "0".to_string();
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut formatted = String::new();
    if hours > 0 {
        formatted.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        formatted.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        formatted.push_str(&format!("{seconds}s"));
    }
    formatted
}
