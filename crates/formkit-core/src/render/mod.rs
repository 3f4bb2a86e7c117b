//! Markup rendering for declared fields.

mod bootstrap;

pub use bootstrap::BootstrapRenderer;

use crate::attrs::AttrMap;
use crate::fields::{Field, FieldKind, GroupSpec, Selection};

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Per-field rendering context resolved by the form walk.
#[derive(Debug, Clone, Default)]
pub struct FieldContext<'a> {
    /// Bracketed HTML name derived from the field path.
    pub name: String,
    /// Camel-cased element id derived from the field path.
    pub id: String,
    /// Validation message for this field, present only once submitted
    /// data exists.
    pub error: Option<&'a str>,
    /// Column attributes of the active layout group.
    pub col_attrs: Option<&'a AttrMap>,
    /// Bound checked state, for checkbox fields.
    pub checked: bool,
}

/// Renders fields into theme-specific markup.
///
/// Implementations only decide markup and class composition; value
/// binding and error collection happen before the walk.
pub trait Renderer {
    /// Renders one field.
    fn field(&self, field: &Field, ctx: &FieldContext<'_>) -> String;

    /// Opens a layout group.
    fn group_start(&self, _group: &GroupSpec) -> String {
        String::new()
    }

    /// Closes the active layout group.
    fn group_stop(&self) -> String {
        String::new()
    }

    /// Separator appended after each rendered field.
    fn separator(&self) -> &'static str {
        ""
    }
}

/// Renders `<option>` elements for a select field.
///
/// A blank choice key omits the `value` attribute entirely.
pub(crate) fn render_options(choices: &[(String, String)], selected: &Selection) -> String {
    let mut html = String::new();

    for (key, label) in choices {
        let value = if key.is_empty() {
            String::new()
        } else {
            format!(" value=\"{key}\"")
        };
        let selected_attr = if selected.matches(key) { " selected" } else { "" };
        html.push_str(&format!("<option{value}{selected_attr}>{label}</option>"));
    }

    html
}

/// Bare markup without theme classes, one control per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl PlainRenderer {
    /// Creates a plain renderer.
    pub fn new() -> Self {
        Self
    }

    fn control_attrs(field: &Field, ctx: &FieldContext<'_>) -> AttrMap {
        let mut attrs = AttrMap::new();
        attrs.set("name", &ctx.name);
        attrs.set("id", &ctx.id);
        if let Some(input_type) = field.kind.input_type() {
            attrs.set("type", input_type);
        }
        for (key, value) in field.attrs.iter() {
            attrs.set_default(key, value);
        }
        attrs
    }

    fn label(field: &Field, ctx: &FieldContext<'_>) -> String {
        field.label.as_ref().map_or_else(String::new, |label| {
            format!("<label for=\"{}\">{label}</label><br />", ctx.id)
        })
    }
}

impl Renderer for PlainRenderer {
    fn field(&self, field: &Field, ctx: &FieldContext<'_>) -> String {
        match field.kind {
            FieldKind::Raw => return field.content.clone().unwrap_or_default(),
            FieldKind::Title => {
                return format!("<legend>{}</legend>", field.label.as_deref().unwrap_or(""));
            }
            FieldKind::GroupStart | FieldKind::GroupStop => return String::new(),
            _ => {}
        }

        let mut attrs = Self::control_attrs(field, ctx);

        match field.kind {
            FieldKind::Checkbox => {
                let label = field.label.as_deref().unwrap_or("");
                format!("<input{} />{label}", attrs.to_html())
            }
            FieldKind::StaticText => {
                let class = field
                    .css_class
                    .as_ref()
                    .map_or_else(String::new, |c| format!(" class=\"{c}\""));
                format!("<span{class}>{}</span>", field.label.as_deref().unwrap_or(""))
            }
            FieldKind::Textarea => {
                let content = attrs.remove("value").unwrap_or_default();
                format!(
                    "{}<textarea{}>{content}</textarea>",
                    Self::label(field, ctx),
                    attrs.to_html()
                )
            }
            FieldKind::Select => {
                let options = field
                    .options
                    .as_ref()
                    .map_or_else(String::new, |o| render_options(&o.choices, &o.selected));
                format!(
                    "{}<select{}>{options}</select>",
                    Self::label(field, ctx),
                    attrs.to_html()
                )
            }
            _ => format!("{}<input{}>", Self::label(field, ctx), attrs.to_html()),
        }
    }

    fn separator(&self) -> &'static str {
        "<br />"
    }
}
