//! Bootstrap 5 form rendering.

use crate::attrs::AttrMap;
use crate::fields::{Field, FieldKind, GroupSpec};

use super::{render_options, FieldContext, Renderer};

/// Bootstrap 5 markup: `mb-3` wrappers, `form-control` classes, row
/// and column layout groups, and inline error display.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapRenderer;

impl BootstrapRenderer {
    /// Creates a Bootstrap renderer.
    pub fn new() -> Self {
        Self
    }

    /// Merges the wrapper attributes: active column attrs plus the
    /// `mb-3` margin class.
    fn wrapper_attrs(ctx: &FieldContext<'_>) -> AttrMap {
        let mut attrs = ctx.col_attrs.cloned().unwrap_or_default();
        let class = format!("mb-3 {}", attrs.get("class").unwrap_or(""))
            .trim()
            .to_string();
        attrs.set("class", class);
        attrs
    }

    /// Resolves the control attributes: declared attrs first, then the
    /// name/id/type/class defaults for keys not already set.
    fn control_attrs(field: &Field, ctx: &FieldContext<'_>) -> AttrMap {
        let mut attrs = field.attrs.clone();
        attrs.set_default("name", &ctx.name);
        attrs.set_default("id", &ctx.id);
        if let Some(input_type) = field.kind.input_type() {
            attrs.set_default("type", input_type);
        }
        attrs.set_default(
            "class",
            field.css_class.as_deref().unwrap_or("form-control"),
        );
        attrs
    }

    fn label(field: &Field, ctx: &FieldContext<'_>) -> String {
        field.label.as_ref().map_or_else(String::new, |label| {
            format!(
                "<label for=\"{}\" class=\"form-label\">{label}</label><br />",
                ctx.id
            )
        })
    }

    fn error_line(ctx: &FieldContext<'_>) -> String {
        ctx.error.map_or_else(String::new, |message| {
            format!("<div class=\"validation text-danger\">{message}</div>")
        })
    }
}

impl Renderer for BootstrapRenderer {
    fn field(&self, field: &Field, ctx: &FieldContext<'_>) -> String {
        match field.kind {
            FieldKind::Raw => return field.content.clone().unwrap_or_default(),
            FieldKind::Title => {
                return format!("<legend>{}</legend>", field.label.as_deref().unwrap_or(""));
            }
            FieldKind::GroupStart | FieldKind::GroupStop => return String::new(),
            _ => {}
        }

        let mut html = format!("<div{}>", Self::wrapper_attrs(ctx).to_html());
        let mut attrs = Self::control_attrs(field, ctx);

        if ctx.error.is_some() {
            attrs.append("class", "border-danger");
        }

        match field.kind {
            FieldKind::Submit => {
                attrs.append("class", "btn btn-primary");
                html.push_str(&format!("<input{}>", attrs.to_html()));
            }
            FieldKind::Checkbox => {
                // The visible box carries no name; a hidden companion
                // field mirrors the checked state so unchecked boxes
                // still submit a value.
                attrs.remove("name");
                let class = attrs
                    .get("class")
                    .unwrap_or("")
                    .replace("form-control", "");
                attrs.set("class", format!("{} form-check-input", class.trim()).trim());
                attrs.set(
                    "onchange",
                    "document.getElementById('_' + this.id).value = this.checked ? 1 : 0",
                );

                html.push_str(&format!("<input{}>", attrs.to_html()));
                html.push_str(&format!(
                    "<label for=\"{}\" class=\"form-check-label ms-2\">{}</label><br />",
                    ctx.id,
                    field.label.as_deref().unwrap_or("")
                ));

                let mirror = AttrMap::new()
                    .with("name", &ctx.name)
                    .with("id", format!("_{}", ctx.id))
                    .with("type", "hidden")
                    .with("value", if ctx.checked { "1" } else { "0" });
                html.push_str(&format!("<input{}>", mirror.to_html()));
            }
            FieldKind::Textarea => {
                let content = attrs.remove("value").unwrap_or_default();
                html.push_str(&Self::label(field, ctx));
                html.push_str(&format!("<textarea{}>{content}</textarea>", attrs.to_html()));
            }
            FieldKind::Select => {
                let options = field
                    .options
                    .as_ref()
                    .map_or_else(String::new, |o| render_options(&o.choices, &o.selected));
                html.push_str(&Self::label(field, ctx));
                html.push_str(&format!("<select{}>{options}</select>", attrs.to_html()));
            }
            FieldKind::StaticText => {
                let class = field
                    .css_class
                    .as_ref()
                    .map_or_else(String::new, |c| format!(" class=\"{c}\""));
                html.push_str(&format!(
                    "<span{class}>{}</span>",
                    field.label.as_deref().unwrap_or("")
                ));
            }
            _ => {
                html.push_str(&Self::label(field, ctx));
                html.push_str(&format!("<input{}>", attrs.to_html()));
            }
        }

        html.push_str(&Self::error_line(ctx));
        html.push_str("</div>");
        html
    }

    fn group_start(&self, group: &GroupSpec) -> String {
        let mut attrs = group.row_attrs.clone();
        let class = format!("{} row", attrs.get("class").unwrap_or(""))
            .trim()
            .to_string();
        attrs.set("class", class);
        format!("<div{}>", attrs.to_html())
    }

    fn group_stop(&self) -> String {
        "</div>".to_string()
    }
}
