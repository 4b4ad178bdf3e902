// ── Attribute filter predicates ──
//
// Inclusion and exclusion filters from the configuration file: a map of
// attribute name to expected value, evaluated against a device record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Device;

/// Attribute name → value predicate over device records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeFilter(BTreeMap<String, Value>);

impl AttributeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Inclusion semantics: the device carries every attribute with the
    /// expected value.
    pub fn matches_all(&self, device: &Device) -> bool {
        self.0.iter().all(|(key, expected)| {
            device
                .attribute(key)
                .is_some_and(|actual| values_equal(&actual, expected))
        })
    }

    /// Exclusion semantics: the device carries at least one of the
    /// attributes with the excluded value. A missing attribute never
    /// matches.
    pub fn matches_any(&self, device: &Device) -> bool {
        self.0.iter().any(|(key, expected)| {
            device
                .attribute(key)
                .is_some_and(|actual| values_equal(&actual, expected))
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Numbers compare by value so `z: 10` in YAML matches a stored `10.0`.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
            _ => a == b,
        },
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vacuum_gauge() -> Device {
        Device::new("gauge")
            .with_stand("DG1")
            .with_system("vacuum")
            .with_beamline("TST")
            .with_z(10.0)
    }

    #[test]
    fn empty_filter_matches_all_but_excludes_none() {
        let f = AttributeFilter::new();
        assert!(f.matches_all(&vacuum_gauge()));
        assert!(!f.matches_any(&vacuum_gauge()));
    }

    #[test]
    fn inclusion_requires_every_pair() {
        let f = AttributeFilter::new()
            .with("system", "vacuum")
            .with("beamline", "TST");
        assert!(f.matches_all(&vacuum_gauge()));

        let f = f.with("stand", "DG2");
        assert!(!f.matches_all(&vacuum_gauge()));
    }

    #[test]
    fn exclusion_matches_any_pair() {
        let f = AttributeFilter::new()
            .with("stand", "DIA")
            .with("system", "vacuum");
        assert!(f.matches_any(&vacuum_gauge()));

        let f = AttributeFilter::new().with("stand", "DIA");
        assert!(!f.matches_any(&vacuum_gauge()));
    }

    #[test]
    fn missing_attribute_never_matches() {
        let f = AttributeFilter::new().with("parent", "slits");
        assert!(!f.matches_all(&vacuum_gauge()));
        assert!(!f.matches_any(&vacuum_gauge()));
    }

    #[test]
    fn integers_match_floats() {
        let f = AttributeFilter::new().with("z", 10);
        assert!(f.matches_all(&vacuum_gauge()));
    }

    #[test]
    fn deserializes_from_plain_map() {
        let f: AttributeFilter =
            serde_json::from_value(json!({"system": "vacuum", "active": true})).unwrap_or_default();
        assert_eq!(f.len(), 2);
        assert!(f.matches_all(&vacuum_gauge()));
    }

    #[test]
    fn collects_from_pairs() {
        let f: AttributeFilter = [("stand", "DG1")].into_iter().collect();
        assert!(f.matches_all(&vacuum_gauge()));
    }
}
