//! Nested submission payloads.
//!
//! Query strings and form bodies arrive as flat `key=value` pairs where
//! keys may use bracket syntax (`user[address][city]`). Parsing turns
//! them into a tree of [`Value`] nodes that the form layer addresses
//! with slash-delimited paths (`user/address/city`).

use std::collections::HashMap;

/// A node in a submission payload: either a scalar string or a nested
/// map of further nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A scalar value.
    Text(String),
    /// A nested payload.
    Map(HashMap<String, Value>),
}

impl Value {
    /// Creates an empty map node.
    pub fn map() -> Self {
        Self::Map(HashMap::new())
    }

    /// Creates a scalar node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the scalar content, if this node is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Map(_) => None,
        }
    }

    /// Returns the child for `key`, if this node is a map.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.get(key),
            Self::Text(_) => None,
        }
    }

    /// Returns whether this node is an empty map or an empty scalar.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Map(entries) => entries.is_empty(),
        }
    }

    /// Resolves a slash-delimited path against this node.
    ///
    /// Segments are trimmed and empty segments are dropped before the
    /// descent, so `user//name` and ` user / name ` address the same
    /// location. Returns `None` when the path is empty or any segment
    /// is missing. The lookup is purely structural.
    ///
    /// # Example
    ///
    /// ```
    /// use formkit_http::Value;
    ///
    /// let payload = formkit_http::parse_form_urlencoded("user[address][city]=Warsaw");
    /// assert_eq!(
    ///     payload.resolve("user/address/city").and_then(Value::as_str),
    ///     Some("Warsaw"),
    /// );
    /// assert!(payload.resolve("user/address/zip").is_none());
    /// ```
    pub fn resolve(&self, path: &str) -> Option<&Self> {
        let segments: Vec<&str> = path
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return None;
        }

        let mut current = self;
        for segment in segments {
            current = current.get(segment)?;
        }

        Some(current)
    }

    /// Inserts a scalar at the location named by `segments`, creating
    /// intermediate maps as needed. A scalar in the way is replaced.
    pub fn insert_path(&mut self, segments: &[String], value: String) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        if !matches!(self, Self::Map(_)) {
            *self = Self::map();
        }

        let Self::Map(entries) = self else {
            unreachable!()
        };

        if rest.is_empty() {
            entries.insert(first.clone(), Self::Text(value));
        } else {
            entries
                .entry(first.clone())
                .or_insert_with(Self::map)
                .insert_path(rest, value);
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::map()
    }
}

/// Parses an `application/x-www-form-urlencoded` string into a payload
/// tree, honoring bracket keys (`a[b][c]=v`).
///
/// Malformed pairs are skipped; later pairs overwrite earlier ones at
/// the same location.
pub fn parse_form_urlencoded(input: &str) -> Value {
    let mut payload = Value::map();

    for pair in input.split('&').filter(|p| !p.is_empty()) {
        let mut parts = pair.splitn(2, '=');
        let Some(raw_key) = parts.next() else {
            continue;
        };
        let raw_value = parts.next().unwrap_or("");

        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);

        let segments = parse_bracket_key(&key);
        if segments.is_empty() {
            tracing::warn!(pair = %pair, "skipping malformed form pair");
            continue;
        }

        payload.insert_path(&segments, value);
    }

    payload
}

/// Splits a bracketed key (`user[address][city]`) into its segments.
///
/// Everything before the first `[` is the root segment; each following
/// `[...]` group adds one. A key without brackets is a single segment.
fn parse_bracket_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        if key.is_empty() {
            return Vec::new();
        }
        return vec![key.to_string()];
    };

    let root = &key[..open];
    if root.is_empty() {
        return Vec::new();
    }

    let mut segments = vec![root.to_string()];
    let mut rest = &key[open..];

    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            // Unterminated bracket: treat the remainder as one segment.
            segments.push(stripped.to_string());
            break;
        };
        segments.push(stripped[..close].to_string());
        rest = &stripped[close + 1..];
    }

    segments
}

/// Simple percent-decoding with `+`-as-space.
fn percent_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                    continue;
                }
            }
            result.push('%');
            result.push_str(&hex);
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_pairs() {
        let payload = parse_form_urlencoded("name=John+Doe&age=30");
        assert_eq!(
            payload.resolve("name").and_then(Value::as_str),
            Some("John Doe")
        );
        assert_eq!(payload.resolve("age").and_then(Value::as_str), Some("30"));
    }

    #[test]
    fn test_parse_bracket_keys() {
        let payload = parse_form_urlencoded("user[address][city]=Warsaw&user[name]=Jan");
        assert_eq!(
            payload.resolve("user/address/city").and_then(Value::as_str),
            Some("Warsaw")
        );
        assert_eq!(
            payload.resolve("user/name").and_then(Value::as_str),
            Some("Jan")
        );
    }

    #[test]
    fn test_parse_percent_encoding() {
        let payload = parse_form_urlencoded("city=New%20York");
        assert_eq!(
            payload.resolve("city").and_then(Value::as_str),
            Some("New York")
        );
    }

    #[test]
    fn test_resolve_empty_path_and_payload() {
        let payload = parse_form_urlencoded("a=1");
        assert!(payload.resolve("").is_none());
        assert!(payload.resolve("/").is_none());
        assert!(Value::map().resolve("a/b").is_none());
    }

    #[test]
    fn test_resolve_trims_and_drops_empty_segments() {
        let payload = parse_form_urlencoded("user[name]=Jan");
        assert_eq!(
            payload.resolve(" user //name ").and_then(Value::as_str),
            Some("Jan")
        );
    }

    #[test]
    fn test_resolve_stops_at_scalar() {
        let payload = parse_form_urlencoded("user=flat");
        assert!(payload.resolve("user/name").is_none());
    }

    #[test]
    fn test_later_pair_overwrites() {
        let payload = parse_form_urlencoded("a=1&a=2");
        assert_eq!(payload.resolve("a").and_then(Value::as_str), Some("2"));
    }

    #[test]
    fn test_insert_path_replaces_scalar_with_map() {
        let mut payload = parse_form_urlencoded("a=1");
        payload.insert_path(&["a".to_string(), "b".to_string()], "2".to_string());
        assert_eq!(payload.resolve("a/b").and_then(Value::as_str), Some("2"));
    }
}
