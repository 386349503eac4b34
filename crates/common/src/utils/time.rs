use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with millisecond precision, e.g. `2024-05-01T12:30:00.123Z`.
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
