//! Encoding of first-seen timestamps and age formatting.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};

/// Bytes trimmed from both ends of a stored value before parsing.
pub const STAMP_PADDING: &[char] = &['\t', '\n', '\0', ' '];

/// Parses a stored attribute value as an RFC 3339 date-time.
///
/// Non-UTF-8 input is decoded lossily and will fail to parse.
///
/// # Errors
///
/// Returns the chrono parse error when the trimmed value is not RFC 3339.
pub fn parse_stamp(raw: &[u8]) -> Result<DateTime<Utc>, chrono::ParseError> {
    let text = String::from_utf8_lossy(raw);
    DateTime::parse_from_rfc3339(text.trim_matches(STAMP_PADDING)).map(|dt| dt.with_timezone(&Utc))
}

/// Encodes a timestamp for storage, e.g. `2026-10-14T08:30:00Z`.
#[must_use]
pub fn format_stamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current wall-clock time at the precision [`format_stamp`] persists.
#[must_use]
pub fn stamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Whole days of `age`, truncated toward zero, as `"N days"`.
#[must_use]
pub fn format_age(age: TimeDelta) -> String {
    format!("{} days", age.num_days())
}
