//! Observed server variables.
//!
//! - [`parse_variables`] turns raw dump text into [`ObservedVariables`]
//! - [`ObservedVariables`] is the read-only name → value mapping every
//!   later stage (detection, autosize formulas, comparison) looks into
//! - [`read_source`] reads dump text from a file or stdin

pub mod parser;
pub mod source;

pub use parser::parse_variables;
pub use source::read_source;

use std::collections::BTreeMap;

use serde::Serialize;

/// Name → raw value mapping of the variables a server reported.
///
/// Names are lowercase identifiers. Iteration order is alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObservedVariables {
    values: BTreeMap<String, String>,
}

impl ObservedVariables {
    /// Create an empty set of variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style insert, handy in tests.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Raw value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a variable parsed as a non-negative integer.
    ///
    /// Returns `None` when the variable is absent or not numeric.
    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name)?.trim().parse().ok()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variables were observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ObservedVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_u64_parses_numbers() {
        let vars = ObservedVariables::new().with("max_connections", "151");
        assert_eq!(vars.get_u64("max_connections"), Some(151));
    }

    #[test]
    fn get_u64_rejects_non_numeric() {
        let vars = ObservedVariables::new()
            .with("max_connections", "lots")
            .with("negative", "-1");
        assert_eq!(vars.get_u64("max_connections"), None);
        assert_eq!(vars.get_u64("negative"), None);
        assert_eq!(vars.get_u64("missing"), None);
    }

    #[test]
    fn iterates_in_name_order() {
        let vars: ObservedVariables = [("b", "2"), ("a", "1")].into_iter().collect();
        let names: Vec<_> = vars.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
