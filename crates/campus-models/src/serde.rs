use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date, which is read
/// as midnight UTC.
pub fn deserialize_timestamp_or_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&s) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected an RFC 3339 timestamp or YYYY-MM-DD date, got `{s}`"
            ))
        })
}
