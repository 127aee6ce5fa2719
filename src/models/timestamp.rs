//! Serde glue for the `jiff_diesel` column wrappers.
//!
//! Rows keep the Diesel wrapper types so they load straight from `Timestamptz`
//! columns; on the way out they serialize as RFC 3339 strings through jiff.

use jiff_diesel::Timestamp;
use serde::Serializer;

pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.to_jiff())
}

pub fn serialize_option<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Current time as a column value.
pub fn now() -> Timestamp {
    use jiff_diesel::ToDiesel;
    jiff::Timestamp::now().to_diesel()
}
