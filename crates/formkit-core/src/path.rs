//! Field path mapping.
//!
//! A field path addresses a location in a nested submission payload
//! with `/` as the segment delimiter (`user/address/city`). The same
//! path also determines the HTML name and element id of the control,
//! so that submitted bracket keys land back at the location the field
//! was declared against.

/// Maps a slash path to an HTML field name.
///
/// The first segment becomes the root name and every further segment a
/// bracketed suffix: `user/address/city` → `user[address][city]`.
///
/// A leading `/` is a formatting directive, not a data segment: it is
/// stripped and forces `prefix` to end with the delimiter, producing an
/// absolute name for fields that live outside the regular nesting.
///
/// # Example
///
/// ```
/// use formkit_core::path::field_name;
///
/// assert_eq!(field_name("user/address/city", ""), "user[address][city]");
/// assert_eq!(field_name("email", ""), "email");
/// assert_eq!(field_name("/ids/0", ""), "/ids[0]");
/// ```
pub fn field_name(path: &str, prefix: &str) -> String {
    let mut prefix = prefix.to_string();
    let path = if let Some(stripped) = path.strip_prefix('/') {
        prefix.push('/');
        stripped
    } else {
        path
    };

    match path.split_once('/') {
        Some((first, rest)) => {
            let brackets: String = rest.split('/').map(|s| format!("[{s}]")).collect();
            format!("{prefix}{first}{brackets}")
        }
        None => format!("{prefix}{path}"),
    }
}

/// Maps a slash path to an HTML element id.
///
/// Segments are lowercased and joined camel-case: the first segment
/// stays as-is, every later segment gets its first letter uppercased.
///
/// # Example
///
/// ```
/// use formkit_core::path::element_id;
///
/// assert_eq!(element_id("user/address/city"), "userAddressCity");
/// assert_eq!(element_id("a/bb/cc"), "aBbCc");
/// ```
pub fn element_id(path: &str) -> String {
    let mut id = String::new();

    for segment in path.split('/') {
        let lower = segment.to_lowercase();
        if id.is_empty() {
            id.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                id.extend(first.to_uppercase());
                id.push_str(chars.as_str());
            }
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_single_segment() {
        assert_eq!(field_name("email", ""), "email");
    }

    #[test]
    fn test_field_name_nested() {
        assert_eq!(field_name("user/address/city", ""), "user[address][city]");
        assert_eq!(field_name("a/b", ""), "a[b]");
    }

    #[test]
    fn test_field_name_bracket_count() {
        let name = field_name("a/b/c/d", "");
        assert_eq!(name.matches('[').count(), 3);
        assert_eq!(name, "a[b][c][d]");
    }

    #[test]
    fn test_field_name_absolute() {
        assert_eq!(field_name("/ids/0", ""), "/ids[0]");
        assert_eq!(field_name("/flat", "form"), "form/flat");
    }

    #[test]
    fn test_field_name_with_prefix() {
        assert_eq!(field_name("user/name", "app"), "appuser[name]");
    }

    #[test]
    fn test_field_name_empty() {
        assert_eq!(field_name("", ""), "");
    }

    #[test]
    fn test_element_id_camel_case() {
        assert_eq!(element_id("user/address/city"), "userAddressCity");
        assert_eq!(element_id("a/bb/cc"), "aBbCc");
    }

    #[test]
    fn test_element_id_lowercases_segments() {
        assert_eq!(element_id("User/ADDRESS/City"), "userAddressCity");
    }

    #[test]
    fn test_element_id_single_segment() {
        assert_eq!(element_id("Email"), "email");
    }

    #[test]
    fn test_element_id_no_delimiters() {
        assert!(!element_id("user/address/city").contains('/'));
    }

    #[test]
    fn test_element_id_empty() {
        assert_eq!(element_id(""), "");
    }
}
