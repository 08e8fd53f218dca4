//! Flat JSON records for metric sets.
//!
//! A record is one object holding `event_type`, the identifying attributes and
//! every metric at the same level, with keys in ascending order.

use super::{MetricSet, MetricValue, SourceType};
use crate::core::{IntegrationError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Reserved record field holding the event type.
pub const EVENT_TYPE_FIELD: &str = "event_type";

impl MetricSet {
    fn record(&self) -> BTreeMap<&str, Value> {
        let mut record: BTreeMap<&str, Value> = BTreeMap::new();
        for attribute in &self.attributes {
            record.insert(&attribute.key, Value::String(attribute.value.clone()));
        }
        for (key, value) in &self.metrics {
            record.insert(key, to_json(value));
        }
        record.insert(EVENT_TYPE_FIELD, Value::String(self.event_type.clone()));
        record
    }

    /// Serialize to a flat JSON object.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Serialize to a flat JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load already-computed values from a flat JSON object.
    ///
    /// Every field but `event_type` lands in the metrics as-is: numbers as
    /// floats, strings as text. No rate/delta logic runs and the store is
    /// not consulted.
    pub fn unmarshal_json(&mut self, bytes: &[u8]) -> Result<()> {
        let record: Map<String, Value> = serde_json::from_slice(bytes)?;
        self.unmarshal(record)
    }

    /// Load already-computed values from a decoded record.
    ///
    /// A `null` field is skipped, which is how a NaN or infinite gauge was
    /// marshalled. Fails without touching the set if any other field is
    /// neither a number nor a string.
    pub fn unmarshal(&mut self, record: Map<String, Value>) -> Result<()> {
        let mut decoded = Vec::with_capacity(record.len());
        for (key, value) in record {
            if key == EVENT_TYPE_FIELD {
                continue;
            }
            let value = match value {
                Value::Null => continue,
                Value::Number(n) => match n.as_f64() {
                    Some(f) => MetricValue::Number(f),
                    None => return Err(IntegrationError::type_mismatch(key, SourceType::Gauge, "numeric")),
                },
                Value::String(s) => MetricValue::Text(s),
                _ => {
                    return Err(IntegrationError::type_mismatch(
                        key,
                        SourceType::Attribute,
                        "number or string",
                    ))
                },
            };
            decoded.push((key, value));
        }

        self.metrics.extend(decoded);
        Ok(())
    }
}

/// Integral floats are written without a fractional part (`0`, not `0.0`).
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_json(value: &MetricValue) -> Value {
    match value {
        MetricValue::Text(s) => Value::String(s.clone()),
        MetricValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                Value::Number(Number::from(*n as i64))
            } else {
                Number::from_f64(*n).map_or(Value::Null, Value::Number)
            }
        },
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let record = self.record();
        let mut map = serializer.serialize_map(Some(record.len()))?;
        for (key, value) in &record {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
