//! serde codecs for human-readable durations ("15m", "2h", "200ms") as
//! accepted by [`humantime::parse_duration`].

pub mod humantime_duration {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let duration_str: String = String::deserialize(deserializer)?;
        humantime::parse_duration(duration_str.trim())
            .map_err(|e| D::Error::custom(format!("Invalid duration '{duration_str}': {e}")))
    }
}

pub mod optional_humantime_duration {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            None => serializer.serialize_none(),
            Some(d) => serializer.serialize_str(&humantime::format_duration(*d).to_string()),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let duration_str: Option<String> = Option::deserialize(deserializer)?;
        match duration_str {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => humantime::parse_duration(s.trim())
                .map(Some)
                .map_err(|e| D::Error::custom(format!("Invalid duration '{s}': {e}"))),
        }
    }
}
