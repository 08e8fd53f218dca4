//! Source types: how a raw sample becomes a reported value.

use crate::core::IntegrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic kind of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceType {
    /// Point-in-time number, stored as-is
    Gauge,
    /// Change per second against the previous sample
    Rate,
    /// Like [`SourceType::Rate`], but decreases are counter resets
    PRate,
    /// Change against the previous sample
    Delta,
    /// Like [`SourceType::Delta`], but decreases are counter resets
    PDelta,
    /// String value, stored as-is
    Attribute,
}

impl SourceType {
    /// All source types, in code order.
    pub const ALL: [SourceType; 6] = [
        SourceType::Gauge,
        SourceType::Rate,
        SourceType::PRate,
        SourceType::Delta,
        SourceType::PDelta,
        SourceType::Attribute,
    ];

    /// Whether computing this kind needs a previous observation.
    pub fn is_stateful(self) -> bool {
        matches!(
            self,
            SourceType::Rate | SourceType::PRate | SourceType::Delta | SourceType::PDelta
        )
    }

    /// Whether a decrease is rejected as a counter reset.
    pub fn is_positive_only(self) -> bool {
        matches!(self, SourceType::PRate | SourceType::PDelta)
    }

    /// Whether the change is divided by elapsed seconds.
    pub fn is_rate(self) -> bool {
        matches!(self, SourceType::Rate | SourceType::PRate)
    }

    /// Canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Gauge => "GAUGE",
            SourceType::Rate => "RATE",
            SourceType::PRate => "PRATE",
            SourceType::Delta => "DELTA",
            SourceType::PDelta => "PDELTA",
            SourceType::Attribute => "ATTRIBUTE",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = IntegrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| IntegrationError::UnknownSourceType(s.to_string()))
    }
}

impl TryFrom<i64> for SourceType {
    type Error = IntegrationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| SourceType::ALL.get(i).copied())
            .ok_or_else(|| IntegrationError::UnknownSourceType(code.to_string()))
    }
}

impl TryFrom<String> for SourceType {
    type Error = IntegrationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SourceType> for String {
    fn from(t: SourceType) -> Self {
        t.as_str().to_string()
    }
}
