// Serde helpers for optional time-of-day fields.
//
// Purpose
// - Keep `startTime` and `endTime` on the wire as `HH:MM`, the shape the calendar forms send.
//
// Responsibilities
// - Serialize as `HH:MM`, or `null` when absent.
// - Accept `HH:MM` and `HH:MM:SS` on input. `null`, a missing key or an empty string mean absent.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%H:%M";

pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, WIRE_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
}

pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_str(&time.format(WIRE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value).map(Some).map_err(serde::de::Error::custom),
    }
}
