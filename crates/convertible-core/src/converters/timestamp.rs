//! Timestamp converter

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::converter::{Argument, Conversion, Converter};

/// Converts RFC 3339 strings or integer Unix seconds to a UTC RFC 3339 string
#[derive(Debug, Clone, Copy, Default)]
pub struct ToTimestamp;

impl Converter for ToTimestamp {
    fn convert(&self, argument: Argument) -> Conversion {
        let Some(value) = argument.into_value() else {
            return Conversion::exhausted(self);
        };
        let parsed = match &value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
            _ => None,
        };
        match parsed {
            Some(dt) => Conversion::Converted(Value::String(
                dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            None => Conversion::unconvertible(self, value),
        }
    }
}
