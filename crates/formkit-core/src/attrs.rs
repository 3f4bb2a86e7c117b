//! HTML attribute maps.

/// An insertion-ordered map of HTML attributes.
///
/// Ordering matters for stable markup output, so entries render in the
/// order they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(String, String)>,
}

impl AttrMap {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, overwriting an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Sets an attribute only when it is not present yet.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.entries.push((key, value.into()));
        }
    }

    /// Appends to an attribute, space-separated (used for CSS classes).
    pub fn append(&mut self, key: &str, value: &str) {
        match self.get(key) {
            Some(existing) => {
                let combined = format!("{existing} {value}").trim().to_string();
                self.set(key, combined);
            }
            None => self.set(key, value),
        }
    }

    /// Gets an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes an attribute, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Renders the attributes as an HTML attribute string with a
    /// leading space per entry.
    ///
    /// A value containing a double quote is wrapped in single quotes
    /// instead, so the attribute cannot break out of its delimiters.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        for (key, value) in &self.entries {
            if value.contains('"') {
                html.push_str(&format!(" {key}='{value}'"));
            } else {
                html.push_str(&format!(" {key}=\"{value}\""));
            }
        }

        html
    }
}
