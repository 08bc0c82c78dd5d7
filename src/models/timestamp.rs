use chrono::{DateTime, SecondsFormat, Utc};

/**
 * current time truncated to milliseconds
 * BSON dates hold milliseconds, so a value read back compares equal to the one written
 */
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/**
 * `2024-05-01T09:30:00.000Z`
 */
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|parsed| parsed.with_timezone(&Utc))
}

fn to_bson(instant: &DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(instant.timestamp_millis())
}

fn from_bson<E: serde::de::Error>(stored: mongodb::bson::DateTime) -> Result<DateTime<Utc>, E> {
    DateTime::from_timestamp_millis(stored.timestamp_millis())
        .ok_or_else(|| E::custom(format!("date out of range: {stored}")))
}

/**
 * BSON date in the store, ISO string with milliseconds in JSON
 */
pub mod date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&super::format(value))
        } else {
            super::to_bson(value).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        if deserializer.is_human_readable() {
            let raw = String::deserialize(deserializer)?;
            super::parse(&raw).map_err(serde::de::Error::custom)
        } else {
            super::from_bson(mongodb::bson::DateTime::deserialize(deserializer)?)
        }
    }
}

pub mod date_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) if serializer.is_human_readable() => {
                serializer.serialize_some(&super::format(instant))
            }
            Some(instant) => serializer.serialize_some(&super::to_bson(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        if deserializer.is_human_readable() {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        } else {
            match Option::<mongodb::bson::DateTime>::deserialize(deserializer)? {
                Some(stored) => super::from_bson(stored).map(Some),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::{self, doc, Bson};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Stamped {
        #[serde(with = "date")]
        at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none", with = "date_option")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn formats_with_millisecond_precision() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format(&instant), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn now_drops_sub_millisecond_digits() {
        let instant = now();
        assert_eq!(instant.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn parses_offsets_into_utc() {
        let parsed = parse("2024-05-01T16:30:00+07:00").unwrap();
        assert_eq!(format(&parsed), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn stored_as_bson_dates() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let value = Stamped {
            at: instant,
            maybe: Some(instant),
        };
        let raw = bson::to_raw_document_buf(&value).unwrap();
        let stored = raw.to_document().unwrap();
        let expected = Bson::DateTime(bson::DateTime::from_millis(instant.timestamp_millis()));
        assert_eq!(stored, doc! { "at": expected.clone(), "maybe": expected });

        let back: Stamped = bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn rendered_as_iso_strings_in_json() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let json = serde_json::to_value(Stamped {
            at: instant,
            maybe: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "at": "2024-05-01T09:30:00.000Z" }));
    }
}
