//! Form field definitions.

use crate::attrs::AttrMap;

/// The kind of a declared field or layout directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Input,
    /// Numeric input.
    Number,
    /// Multi-line text area.
    Textarea,
    /// Dropdown select.
    Select,
    /// Checkbox.
    Checkbox,
    /// Hidden input.
    Hidden,
    /// Submit button.
    Submit,
    /// Static text rendered as a span.
    StaticText,
    /// Section title rendered as a legend.
    Title,
    /// Verbatim markup.
    Raw,
    /// Opens a layout group.
    GroupStart,
    /// Closes the active layout group.
    GroupStop,
}

impl FieldKind {
    /// Returns the `type` attribute for kinds rendered as `<input>`.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Input => Some("text"),
            Self::Number => Some("number"),
            Self::Checkbox => Some("checkbox"),
            Self::Hidden => Some("hidden"),
            Self::Submit => Some("submit"),
            _ => None,
        }
    }
}

/// The selected key(s) of a select field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// A single selected key.
    One(String),
    /// A set of selected keys (multi-select).
    Many(Vec<String>),
}

impl Selection {
    /// Returns whether `key` is selected.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::None => false,
            Self::One(selected) => selected == key,
            Self::Many(selected) => selected.iter().any(|s| s == key),
        }
    }
}

/// Choices and selection state of a select field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Ordered `(key, label)` choices.
    pub choices: Vec<(String, String)>,
    /// Current selection.
    pub selected: Selection,
}

/// Layout parameters of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSpec {
    /// Column width for fields inside the group.
    pub columns: u8,
    /// Attributes of the row wrapper.
    pub row_attrs: AttrMap,
    /// Attributes of each column wrapper.
    pub col_attrs: AttrMap,
}

/// One declared form control or layout directive.
///
/// Fields are immutable once appended to a [`FieldSet`]; the builder
/// surface on the form controller is the only producer.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field kind.
    pub kind: FieldKind,
    /// Slash path into the submission payload.
    pub path: Option<String>,
    /// Human-readable label.
    pub label: Option<String>,
    /// Extra HTML attributes.
    pub attrs: AttrMap,
    /// Select choices and selection.
    pub options: Option<SelectOptions>,
    /// CSS class override for the control element.
    pub css_class: Option<String>,
    /// Verbatim content for raw fields.
    pub content: Option<String>,
    /// Group parameters for group-start fields.
    pub group: Option<GroupSpec>,
}

impl Field {
    /// Creates a field of the given kind.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            path: None,
            label: None,
            attrs: AttrMap::new(),
            options: None,
            css_class: None,
            content: None,
            group: None,
        }
    }
}

/// The ordered, append-only collection of a form's fields.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_types() {
        assert_eq!(FieldKind::Input.input_type(), Some("text"));
        assert_eq!(FieldKind::Number.input_type(), Some("number"));
        assert_eq!(FieldKind::Textarea.input_type(), None);
        assert_eq!(FieldKind::Select.input_type(), None);
    }

    #[test]
    fn test_selection_matches() {
        assert!(!Selection::None.matches("a"));
        assert!(Selection::One("a".to_string()).matches("a"));
        assert!(!Selection::One("a".to_string()).matches("b"));

        let many = Selection::Many(vec!["a".to_string(), "c".to_string()]);
        assert!(many.matches("a"));
        assert!(many.matches("c"));
        assert!(!many.matches("b"));
    }

    #[test]
    fn test_field_set_preserves_order() {
        let mut fields = FieldSet::new();
        fields.push(Field {
            path: Some("first".to_string()),
            ..Field::new(FieldKind::Input)
        });
        fields.push(Field {
            path: Some("second".to_string()),
            ..Field::new(FieldKind::Textarea)
        });

        let paths: Vec<_> = fields.iter().filter_map(|f| f.path.as_deref()).collect();
        assert_eq!(paths, vec!["first", "second"]);
        assert_eq!(fields.len(), 2);
    }
}
