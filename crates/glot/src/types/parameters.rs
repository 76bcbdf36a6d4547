use std::collections::HashMap;

use super::{ParameterValue, Value};

/// A case-insensitive map from parameter name to value.
///
/// # Example
///
/// ```
/// use glot::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.set("Count", 3);
/// assert_eq!(params.get("count").map(|p| p.value().to_string()), Some("3".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    values: HashMap<String, ParameterValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.set_value(name, ParameterValue::new(value));
    }

    /// Set a value with its formatting hooks.
    pub fn set_value(&mut self, name: &str, value: ParameterValue) {
        self.values.insert(name.to_lowercase(), value);
    }

    /// Chainable form of [`ParameterSet::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter names (lowercased), sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: AsRef<str>> FromIterator<(S, ParameterValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (S, ParameterValue)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.set_value(name.as_ref(), value);
        }
        set
    }
}

/// A stack of [`ParameterSet`] layers.
///
/// Lookups search from the top layer down and skip null values, so a
/// scope can shadow a name without hiding a real value with an absent one.
/// Writes land on the top layer.
#[derive(Debug, Clone, Default)]
pub struct LayeredParameterSet {
    layers: Vec<ParameterSet>,
}

impl LayeredParameterSet {
    /// Create a stack with `base` as its only layer.
    pub fn new(base: ParameterSet) -> Self {
        Self { layers: vec![base] }
    }

    /// Push an empty layer.
    pub fn push(&mut self) {
        self.layers.push(ParameterSet::new());
    }

    /// Remove the top layer.
    pub fn pop(&mut self) -> Option<ParameterSet> {
        self.layers.pop()
    }

    /// Number of layers currently on the stack.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.layers
            .iter()
            .rev()
            .filter_map(|layer| layer.get(name))
            .find(|value| !value.is_null())
    }

    /// Set a value on the top layer, creating one if the stack is empty.
    pub fn set(&mut self, name: &str, value: ParameterValue) {
        if self.layers.is_empty() {
            self.push();
        }
        if let Some(top) = self.layers.last_mut() {
            top.set_value(name, value);
        }
    }

    /// All names visible through the stack, sorted and deduplicated.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layers.iter().flat_map(ParameterSet::names).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl From<ParameterSet> for LayeredParameterSet {
    fn from(parameters: ParameterSet) -> Self {
        LayeredParameterSet::new(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_skip_null_layers() {
        let mut layers = LayeredParameterSet::new(ParameterSet::new().with("x", 1));
        layers.push();
        layers.set("X", ParameterValue::new(Value::Null));
        assert_eq!(layers.get("x").map(|p| p.value().to_string()), Some("1".to_string()));
        layers.set("x", ParameterValue::new(2));
        assert_eq!(layers.get("x").map(|p| p.value().to_string()), Some("2".to_string()));
        layers.pop();
        assert_eq!(layers.get("x").map(|p| p.value().to_string()), Some("1".to_string()));
    }
}
