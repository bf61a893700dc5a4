//! Scalar data container: one value per component name.
//!
//! Purpose
//! -------
//! Hold time-invariant data — setpoints, weights, initial conditions —
//! keyed by component name. Models resolve names to handles at the
//! boundary, so one `ScalarData` can address variables on any number of
//! model instances.
//!
//! Conventions
//! -----------
//! - Keys are the component-name strings a model's `find_component`
//!   understands.
//! - Lookup of a missing key through [`ScalarData::get_data_from_key`] is a
//!   typed error; use [`ScalarData::contains_key`] to probe first when a key
//!   may legitimately be absent.

use std::collections::HashMap;

use crate::data::errors::{DataError, DataResult};

/// Mapping from component name to a single scalar value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScalarData {
    data: HashMap<String, f64>,
}

impl ScalarData {
    /// Build from `(name, value)` pairs.
    pub fn new<K, I>(pairs: I) -> ScalarData
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        ScalarData {
            data: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The underlying name-to-value mapping.
    pub fn get_data(&self) -> &HashMap<String, f64> {
        &self.data
    }

    /// Whether a value exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The value stored for `key`.
    pub fn get_data_from_key(&self, key: &str) -> DataResult<f64> {
        self.data
            .get(key)
            .copied()
            .ok_or_else(|| DataError::KeyNotFound { key: key.to_string() })
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: &str, value: f64) {
        self.data.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction from pairs, lookup, and the missing-key error.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify construction, containment probing, and value retrieval.
    fn scalar_data_roundtrip() {
        let data = ScalarData::new([("flow_in", 0.3), ("conc[A]", 1.0)]);

        assert!(data.contains_key("flow_in"));
        assert!(!data.contains_key("flow_out"));
        assert_eq!(data.get_data_from_key("conc[A]").unwrap(), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a missing key is a typed `KeyNotFound` error.
    fn missing_key_is_reported() {
        let data = ScalarData::new([("x", 1.0)]);

        let err = data.get_data_from_key("y").unwrap_err();

        assert_eq!(err, DataError::KeyNotFound { key: "y".to_string() });
    }
}
