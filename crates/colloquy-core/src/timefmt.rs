//! Timestamp and duration formatting.
//!
//! Relative labels ("just now", "5m ago") are computed against an explicit
//! "now" instant so they stay testable; the wall-clock variants consult the
//! clock per call and never cache it. Refreshing stale labels is the
//! caller's job (the TUI re-renders them on timer ticks).

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;

/// Format for the absolute date-time label, rendered in local time.
const ABSOLUTE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format for the date-only label used once an event is a week old.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from timestamp parsing.
#[derive(Debug, Error)]
pub enum TimeError {
    /// The input was not a valid RFC 3339 timestamp.
    ///
    /// Transcripts come from a trusted event source, so this points at an
    /// upstream data bug. Failing here beats rendering a bogus label.
    #[error("invalid timestamp {input:?}: {source}")]
    Parse {
        input: String,
        source: chrono::ParseError,
    },
}

/// A timestamp formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTimestamp {
    /// Short human label relative to "now" ("just now", "5m ago", ...).
    pub relative: String,
    /// Full date-time label, independent of age.
    pub absolute: String,
    /// The parsed instant, exactly as encoded in the input.
    pub date: DateTime<Utc>,
}

/// Parse an RFC 3339 timestamp into a UTC instant.
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, TimeError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TimeError::Parse {
            input: input.to_string(),
            source,
        })
}

/// Format a timestamp against the current wall clock.
pub fn format_timestamp(input: &str) -> Result<FormattedTimestamp, TimeError> {
    format_timestamp_at(input, Utc::now())
}

/// Format a timestamp against an explicit "now" instant.
pub fn format_timestamp_at(
    input: &str,
    now: DateTime<Utc>,
) -> Result<FormattedTimestamp, TimeError> {
    let date = parse_instant(input)?;
    Ok(FormattedTimestamp {
        relative: relative_label(date, now),
        absolute: absolute_label(date),
        date,
    })
}

/// Full date-time label for an instant, rendered in local time.
pub fn absolute_label(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(ABSOLUTE_FORMAT).to_string()
}

/// Relative label for an instant, computed against `now`.
///
/// Tier boundaries are exclusive upper bounds: a diff of exactly 60 minutes
/// reads "1h ago", not "60m ago". A negative diff (future timestamp, clock
/// skew) lands in the first tier and reads "just now".
pub fn relative_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = now.signed_duration_since(date).num_milliseconds();

    if diff_ms < MINUTE_MS {
        "just now".to_string()
    } else if diff_ms < HOUR_MS {
        format!("{}m ago", diff_ms / MINUTE_MS)
    } else if diff_ms < DAY_MS {
        format!("{}h ago", diff_ms / HOUR_MS)
    } else if diff_ms < WEEK_MS {
        format!("{}d ago", diff_ms / DAY_MS)
    } else {
        date.with_timezone(&Local).format(DATE_FORMAT).to_string()
    }
}

/// Format the elapsed time between two RFC 3339 timestamps.
pub fn format_duration(start: &str, end: &str) -> Result<String, TimeError> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    Ok(format_duration_between(start, end))
}

/// Format the elapsed time between two instants.
///
/// A negative span (end before start) is clamped to zero; out-of-order
/// timestamps are a data anomaly, not something to render.
pub fn format_duration_between(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let diff_ms = end.signed_duration_since(start).num_milliseconds();
    if diff_ms < 0 {
        tracing::warn!(%start, %end, "negative duration clamped to zero");
        return format_duration_ms(0);
    }
    format_duration_ms(diff_ms)
}

/// Format a non-negative millisecond count as a duration label.
///
/// - under 1 second: `"483ms"`
/// - under 1 minute: `"2.5s"` (one decimal)
/// - 1 minute and up: `"2m 30s"`
pub fn format_duration_ms(diff_ms: i64) -> String {
    if diff_ms < 1000 {
        format!("{diff_ms}ms")
    } else if diff_ms < MINUTE_MS {
        #[allow(clippy::cast_precision_loss)]
        let seconds = diff_ms as f64 / 1000.0;
        format!("{seconds:.1}s")
    } else {
        let minutes = diff_ms / MINUTE_MS;
        let seconds = (diff_ms % MINUTE_MS) / 1000;
        format!("{minutes}m {seconds}s")
    }
}
