//! `TokyoDateTime` scalar
//!
//! Timestamps rendered as `YYYY-MM-DD HH:MM:SS` in Asia/Tokyo.
//! Tokyo has had no DST since 1951, so a fixed +09:00 offset is exact.

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TOKYO_OFFSET_SECS: i32 = 9 * 3600;

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(TOKYO_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokyoDateTime(pub DateTime<Utc>);

impl TokyoDateTime {
    pub fn to_tokyo_string(&self) -> String {
        self.0.with_timezone(&tokyo()).format(FORMAT).to_string()
    }

    pub fn from_tokyo_str(s: &str) -> InputValueResult<Self> {
        let naive = NaiveDateTime::parse_from_str(s, FORMAT)?;
        naive
            .and_local_timezone(tokyo())
            .single()
            .map(|local| Self(local.with_timezone(&Utc)))
            .ok_or_else(|| InputValueError::custom(format!("{s} is not a valid Tokyo time")))
    }
}

#[Scalar(name = "TokyoDateTime")]
impl ScalarType for TokyoDateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => TokyoDateTime::from_tokyo_str(s),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_tokyo_string())
    }
}
