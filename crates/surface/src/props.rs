//! Ordered string properties.

use indexmap::IndexMap;

/// An insertion-ordered map of string keys to string values.
///
/// Backs both element attributes and inline styles. Keys keep the order they
/// were first set in; overwriting keeps the position, removing shifts the
/// rest up.
#[derive(Clone, Debug, Default)]
pub struct PropertyMap {
    entries: IndexMap<Box<str>, Box<str>>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Set a property, inserting or overwriting.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(Box::from(key), Box::from(value));
    }

    /// Get a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| &**v)
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Box<str>> {
        self.entries.shift_remove(key)
    }

    /// Check for a property.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, &**v))
    }

    /// Render as a `key: value; ...` declaration list.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (key, value) in self.iter() {
            if !css.is_empty() {
                css.push_str("; ");
            }
            css.push_str(key);
            css.push_str(": ");
            css.push_str(value);
        }
        css
    }
}
