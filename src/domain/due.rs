//! Due dates
//!
//! Due dates are stored as UTC instants. User input is usually a calendar
//! day, which resolves to the last second of that day in local time so that
//! "today" is still a valid due date for the rest of the day.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DueDateError {
    #[error("Invalid due date '{0}': expected YYYY-MM-DD, 'today', 'tomorrow' or an RFC 3339 timestamp")]
    Invalid(String),

    #[error("Due date '{0}' does not exist in the local time zone")]
    Nonexistent(String),
}

/// Parses user input into a due instant, relative to `now` for keywords
pub fn parse_due(input: &str, now: DateTime<Local>) -> Result<DateTime<Utc>, DueDateError> {
    let input = input.trim();

    let day = match input.to_lowercase().as_str() {
        "today" => Some(now.date_naive()),
        "tomorrow" => now.date_naive().checked_add_days(Days::new(1)),
        _ => None,
    };

    if let Some(day) = day {
        return end_of_day(day, input);
    }

    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return end_of_day(day, input);
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DueDateError::Invalid(input.to_string()))
}

fn end_of_day(day: NaiveDate, input: &str) -> Result<DateTime<Utc>, DueDateError> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| DueDateError::Invalid(input.to_string()))?;

    Local
        .from_local_datetime(&day.and_time(last_second))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DueDateError::Nonexistent(input.to_string()))
}

/// Formats an optional due date for display, with a placeholder when absent
pub fn format_due(due: Option<&DateTime<Utc>>, format: &str) -> String {
    match due {
        Some(dt) => dt.with_timezone(&Local).format(format).to_string(),
        None => "No due date".to_string(),
    }
}

/// Serializes an optional due date as an RFC 3339 string (or null)
pub fn serialize<S>(due: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match due {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes a due date from an RFC 3339 string, epoch milliseconds or null
///
/// Older blobs may carry the raw millisecond timestamp, newer ones the string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| serde::de::Error::custom(format!("invalid due date '{}': {}", s, e))),
        Some(serde_json::Value::Number(n)) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| serde::de::Error::custom("due date timestamp out of range"))?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("due date timestamp out of range"))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string, number or null for due date, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn local_noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            )
            .earliest()
            .unwrap()
    }

    #[test]
    fn calendar_day_resolves_to_end_of_local_day() {
        let now = local_noon(2026, 10, 19);
        let due = parse_due("2026-10-25", now).unwrap().with_timezone(&Local);

        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
        assert_eq!(due.hour(), 23);
        assert_eq!(due.minute(), 59);
    }

    #[test]
    fn today_is_not_in_the_past() {
        let now = local_noon(2026, 10, 19);
        let due = parse_due("today", now).unwrap();
        assert!(due > now.with_timezone(&Utc));
    }

    #[test]
    fn tomorrow_is_next_day() {
        let now = local_noon(2026, 10, 19);
        let due = parse_due("Tomorrow", now).unwrap().with_timezone(&Local);
        assert_eq!(due.date_naive(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }

    #[test]
    fn rfc3339_is_taken_verbatim() {
        let now = local_noon(2026, 10, 19);
        let due = parse_due("2026-11-01T08:30:00Z", now).unwrap();
        assert_eq!(due.to_rfc3339(), "2026-11-01T08:30:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        let now = local_noon(2026, 10, 19);
        assert!(matches!(parse_due("next week", now), Err(DueDateError::Invalid(_))));
        assert!(matches!(parse_due("2026-13-01", now), Err(DueDateError::Invalid(_))));
    }

    #[test]
    fn missing_due_date_has_placeholder() {
        assert_eq!(format_due(None, "%d/%m/%Y"), "No due date");
    }

    #[derive(serde::Deserialize, serde::Serialize)]
    struct Wrapper {
        #[serde(with = "super", default)]
        due: Option<DateTime<Utc>>,
    }

    #[test]
    fn deserializes_string_number_and_null() {
        let from_str: Wrapper = serde_json::from_str(r#"{"due":"2026-10-25T10:00:00.000Z"}"#).unwrap();
        let from_millis: Wrapper = serde_json::from_str(r#"{"due":1792922400000}"#).unwrap();
        let from_null: Wrapper = serde_json::from_str(r#"{"due":null}"#).unwrap();
        let absent: Wrapper = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(from_str.due, from_millis.due);
        assert!(from_null.due.is_none());
        assert!(absent.due.is_none());
    }

    #[test]
    fn rejects_wrong_json_type() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"due":true}"#);
        assert!(result.is_err());
    }
}
