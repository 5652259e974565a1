//! Data contexts for masked name resolution
//!
//! A data context is a named set of columns (or plain values). During
//! evaluation its names take precedence over the environment, so an
//! expression like `mpg > 31` resolves `mpg` to the column when one exists
//! and only falls back to the environment for everything else.

use serde_json::Value as JsonValue;

use crate::value::Value;

/// Named values consulted before the environment during evaluation
///
/// Insertion order is preserved. Lookup is a linear scan; data contexts are
/// expected to have a handful of columns, not thousands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContext {
    columns: Vec<(String, Value)>,
}

impl DataContext {
    pub fn new() -> Self {
        DataContext { columns: Vec::new() }
    }

    /// Add or replace a named value
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.columns.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Build a data context from a JSON object of fields
    ///
    /// Each field converts via [`Value::from_json`]; arrays become columns.
    pub fn from_json(json: &JsonValue) -> Result<Self, String> {
        let obj = json
            .as_object()
            .ok_or_else(|| format!("data context must be a JSON object, got {}", json))?;

        let mut data = DataContext::new();
        for (name, field) in obj {
            let value = Value::from_json(field)
                .map_err(|e| format!("field '{}': {}", name, e))?;
            data.insert(name.clone(), value);
        }
        Ok(data)
    }
}

impl FromIterator<(String, Value)> for DataContext {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut data = DataContext::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_existing_name() {
        let mut data = DataContext::new();
        data.insert("x", Value::Num(1.0));
        data.insert("x", Value::Num(2.0));

        assert_eq!(data.len(), 1);
        assert_eq!(data.get("x"), Some(&Value::Num(2.0)));
    }

    #[test]
    fn test_from_json_typed_columns() {
        let json = json!({
            "mpg": [21, 30, 32],
            "name": ["a", "b", "c"],
            "flag": true
        });
        let data = DataContext::from_json(&json).unwrap();

        assert_eq!(data.get("mpg"), Some(&Value::NumVec(vec![21.0, 30.0, 32.0])));
        assert_eq!(
            data.get("name"),
            Some(&Value::StrVec(vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string()
            ]))
        );
        assert_eq!(data.get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result = DataContext::from_json(&json!([1, 2, 3]));
        assert!(result.is_err(), "array should not be accepted as a data context");
    }

    #[test]
    fn test_from_json_rejects_nested_objects() {
        let result = DataContext::from_json(&json!({"x": {"nested": 1}}));
        let err = result.unwrap_err();
        assert!(err.contains("field 'x'"), "error should name the field: {}", err);
    }

    #[test]
    fn test_mixed_array_becomes_list() {
        let data = DataContext::from_json(&json!({"x": [1, "two", true]})).unwrap();
        assert_eq!(
            data.get("x"),
            Some(&Value::List(vec![
                Value::Num(1.0),
                Value::Str("two".to_string()),
                Value::Bool(true)
            ]))
        );
    }
}
