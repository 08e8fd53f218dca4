//! Identifying attributes and the cache keys derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

const ATTRIBUTE_SEPARATOR: &str = "==";
const NAMESPACE_SEPARATOR: &str = "::";
const ESCAPE: char = '\\';

/// An identifying key/value pair of a metric set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub key: String,
    /// Attribute value
    pub value: String,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Shorthand for [`Attribute::new`].
pub fn attr(key: impl Into<String>, value: impl Into<String>) -> Attribute {
    Attribute::new(key, value)
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, ATTRIBUTE_SEPARATOR, self.value)
    }
}

/// Cache key for `key` scoped by `attributes`, e.g. `k1==v1::k2==v2::key`.
///
/// Attributes are sorted first, so the result does not depend on the order
/// they were supplied in. A `\`, `=` or `:` inside an attribute key, an
/// attribute value or the metric key is prefixed with `\`, so distinct
/// inputs never share a cache key.
pub fn namespace(attributes: &[Attribute], key: &str) -> String {
    let mut sorted: Vec<&Attribute> = attributes.iter().collect();
    sorted.sort();

    let mut ns = String::new();
    for attribute in sorted {
        push_escaped(&mut ns, &attribute.key);
        ns.push_str(ATTRIBUTE_SEPARATOR);
        push_escaped(&mut ns, &attribute.value);
        ns.push_str(NAMESPACE_SEPARATOR);
    }
    push_escaped(&mut ns, key);
    ns
}

fn push_escaped(ns: &mut String, part: &str) {
    for c in part.chars() {
        if matches!(c, ESCAPE | '=' | ':') {
            ns.push(ESCAPE);
        }
        ns.push(c);
    }
}
