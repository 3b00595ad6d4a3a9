//! PocketBase timestamp codec.
//!
//! PocketBase writes instants as `yyyy-MM-dd HH:mm:ss.fffZ`: a variant of
//! ISO 8601 that separates date and time with a space instead of `T`.
//! Use this module with `#[serde(with = "pocketbase_core::datetime")]` on
//! `DateTime<Utc>` fields, or [`option`] for nullable ones.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// The wire format, in `chrono` notation.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3fZ";

/// Render an instant in the wire format (millisecond precision).
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// Parse an instant written in the wire format.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FORMAT).map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| {
        serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}"))
    })
}

/// Codec for nullable timestamps.
///
/// The server sends an empty string for unset date fields; it decodes to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse(&raw).map(Some).map_err(|e| {
                serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "crate::datetime")]
        at: DateTime<Utc>,
        #[serde(with = "crate::datetime::option", default)]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn parses_space_separated_format() {
        let parsed = parse("2024-03-05 14:07:09.123Z").unwrap();
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_iso_t_separator() {
        assert!(parse("2024-03-05T14:07:09.123Z").is_err());
    }

    #[test]
    fn rejects_missing_zulu_suffix() {
        assert!(parse("2024-03-05 14:07:09.123").is_err());
    }

    #[test]
    fn round_trip_keeps_millisecond_precision() {
        let original = Utc
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 58)
            .unwrap()
            .with_nanosecond(7_000_000)
            .unwrap();

        let written = format(&original);
        assert_eq!(written, "2023-12-31 23:59:58.007Z");
        assert_eq!(parse(&written).unwrap(), original);
    }

    #[test]
    fn serde_round_trip() {
        let value = Stamped {
            at: parse("2022-01-01 00:00:00.000Z").unwrap(),
            maybe: Some(parse("2022-01-02 10:00:00.500Z").unwrap()),
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["at"], "2022-01-01 00:00:00.000Z");
        assert_eq!(json["maybe"], "2022-01-02 10:00:00.500Z");

        let back: Stamped = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn empty_optional_timestamp_is_none() {
        let value: Stamped = serde_json::from_value(serde_json::json!({
            "at": "2022-01-01 00:00:00.000Z",
            "maybe": ""
        }))
        .unwrap();
        assert_eq!(value.maybe, None);
    }
}
