//! The form controller.
//!
//! A [`Form`] is built once per request: fields are declared against
//! slash paths, bound values are pulled from seeded data or the raw
//! request payload, validation produces a per-field error map, and the
//! walk over the declared fields emits themed markup.

use formkit_http::{Method, Request, Value};

use crate::attrs::AttrMap;
use crate::fields::{Field, FieldKind, FieldSet, GroupSpec, SelectOptions, Selection};
use crate::path::{element_id, field_name};
use crate::render::{html_escape, BootstrapRenderer, FieldContext, Renderer};
use crate::validation::{Catalog, Engine, ErrorMap, Locale, RuleSet};

/// Name of the hidden field carrying the form identity token.
const IDENTITY_FIELD: &str = "formId";

/// Returns an HTML-escaped deep copy of a payload.
pub(crate) fn escaped_copy(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(html_escape(s)),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), escaped_copy(v)))
                .collect(),
        ),
    }
}

/// Truthiness of a bound value: a trimmed scalar other than `""` and
/// `"0"`, or a non-empty map.
pub(crate) fn value_is_truthy(value: &Value) -> bool {
    match value {
        Value::Text(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed != "0"
        }
        Value::Map(entries) => !entries.is_empty(),
    }
}

/// A request-scoped form: declared fields, bound values, validation
/// state, and rendering.
pub struct Form {
    request: Request,
    action: String,
    method: Method,
    id: Option<String>,
    data: Value,
    fields: FieldSet,
    rule_errors: ErrorMap,
    manual_errors: ErrorMap,
    catalog: Catalog,
    renderer: Box<dyn Renderer>,
    prepared: bool,
    identity_injected: bool,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("action", &self.action)
            .field("method", &self.method)
            .field("id", &self.id)
            .field("fields", &self.fields.len())
            .field("prepared", &self.prepared)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Creates a form for the given request. The action defaults to
    /// the request path and the method to POST.
    pub fn new(request: Request) -> Self {
        let action = request.path.clone();
        Self {
            request,
            action,
            method: Method::Post,
            id: None,
            data: Value::map(),
            fields: FieldSet::new(),
            rule_errors: ErrorMap::new(),
            manual_errors: ErrorMap::new(),
            catalog: Catalog::default(),
            renderer: Box::new(BootstrapRenderer::new()),
            prepared: false,
            identity_injected: false,
        }
    }

    /// Sets the form action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Sets the form method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Swaps the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Sets the message locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.catalog = Catalog::new(locale);
        self
    }

    /// Sets the identity token.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Returns the identity token.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Seeds the bound data with external values (typically model
    /// data); an escaped copy is stored.
    pub fn set_data(&mut self, data: &Value) {
        self.data = escaped_copy(data);
    }

    /// Returns the current escaped data snapshot.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Resolves the bound value for a path: the current snapshot when
    /// it has data, otherwise the raw request payload for the declared
    /// method (escaped on the way out).
    pub fn data_by_path(&self, path: &str) -> Option<Value> {
        if path.trim().is_empty() {
            return None;
        }

        if self.data.is_empty() {
            self.raw_payload().resolve(path).map(escaped_copy)
        } else {
            self.data.resolve(path).cloned()
        }
    }

    fn raw_payload(&self) -> &Value {
        match self.method {
            Method::Get => self.request.all_query(),
            Method::Post => self.request.all_post(),
        }
    }

    /// Appends a field, binding its value from the current data first.
    ///
    /// A resolved scalar lands in the `value` attribute; checkboxes
    /// get a `checked` attribute on truthiness instead, and selects
    /// keep their selection state (handled in [`Self::add_select`]).
    pub fn add_field(
        &mut self,
        kind: FieldKind,
        path: Option<&str>,
        label: Option<&str>,
        mut attrs: AttrMap,
        options: Option<SelectOptions>,
        css_class: Option<&str>,
    ) -> &mut Self {
        if let Some(p) = path {
            if let Some(bound) = self.data_by_path(p) {
                match kind {
                    FieldKind::Checkbox => {
                        if value_is_truthy(&bound) {
                            attrs.set("checked", "checked");
                        }
                    }
                    FieldKind::Select => {}
                    _ => {
                        if let Some(s) = bound.as_str() {
                            attrs.set("value", s);
                        }
                    }
                }
            }
        }

        let mut field = Field::new(kind);
        field.path = path.map(ToString::to_string);
        field.label = label.map(ToString::to_string);
        field.attrs = attrs;
        field.options = options;
        field.css_class = css_class.map(ToString::to_string);
        self.fields.push(field);
        self
    }

    /// Adds a text input.
    pub fn add_input(&mut self, path: &str, label: Option<&str>, attrs: AttrMap) -> &mut Self {
        self.add_field(FieldKind::Input, Some(path), label, attrs, None, None)
    }

    /// Adds a numeric input with a two-decimal step unless overridden.
    pub fn add_float_input(
        &mut self,
        path: &str,
        label: Option<&str>,
        attrs: AttrMap,
    ) -> &mut Self {
        let mut merged = AttrMap::new().with("step", "0.01");
        for (key, value) in attrs.iter() {
            merged.set(key, value);
        }
        self.add_field(FieldKind::Number, Some(path), label, merged, None, None)
    }

    /// Adds a textarea.
    pub fn add_textarea(&mut self, path: &str, label: Option<&str>, attrs: AttrMap) -> &mut Self {
        self.add_field(FieldKind::Textarea, Some(path), label, attrs, None, None)
    }

    /// Adds a select. Bound data overrides the provided selection.
    pub fn add_select(
        &mut self,
        path: &str,
        choices: Vec<(String, String)>,
        selected: Selection,
        label: Option<&str>,
        attrs: AttrMap,
    ) -> &mut Self {
        let mut selection = selected;
        if let Some(bound) = self.data_by_path(path) {
            if let Some(s) = bound.as_str() {
                selection = Selection::One(s.to_string());
            }
        }

        self.add_field(
            FieldKind::Select,
            Some(path),
            label,
            attrs,
            Some(SelectOptions {
                choices,
                selected: selection,
            }),
            Some("form-select"),
        )
    }

    /// Adds a checkbox.
    pub fn add_checkbox(&mut self, path: &str, label: Option<&str>, attrs: AttrMap) -> &mut Self {
        self.add_field(FieldKind::Checkbox, Some(path), label, attrs, None, None)
    }

    /// Adds a hidden input. Bound data overrides the provided value.
    pub fn add_hidden(&mut self, path: &str, value: &str) -> &mut Self {
        let attrs = AttrMap::new().with("value", value);
        self.add_field(FieldKind::Hidden, Some(path), None, attrs, None, None)
    }

    /// Adds a submit button.
    pub fn add_submit(&mut self, value: &str, attrs: AttrMap) -> &mut Self {
        let mut merged = AttrMap::new().with("value", value);
        for (key, val) in attrs.iter() {
            merged.set_default(key, val);
        }
        self.add_field(FieldKind::Submit, None, None, merged, None, None)
    }

    /// Adds static text rendered as a span.
    pub fn add_static_text(&mut self, text: &str, css_class: Option<&str>) -> &mut Self {
        self.add_field(
            FieldKind::StaticText,
            None,
            Some(text),
            AttrMap::new(),
            None,
            css_class,
        )
    }

    /// Adds verbatim markup.
    pub fn add_raw(&mut self, content: impl Into<String>) -> &mut Self {
        let mut field = Field::new(FieldKind::Raw);
        field.content = Some(content.into());
        self.fields.push(field);
        self
    }

    /// Opens a layout group. Starting a new group while one is open
    /// replaces the active context; groups do not nest.
    pub fn start_group(&mut self, columns: u8, row_attrs: AttrMap, col_attrs: AttrMap) -> &mut Self {
        let mut field = Field::new(FieldKind::GroupStart);
        field.group = Some(GroupSpec {
            columns,
            row_attrs,
            col_attrs,
        });
        self.fields.push(field);
        self
    }

    /// Closes the active layout group.
    pub fn stop_group(&mut self) -> &mut Self {
        self.fields.push(Field::new(FieldKind::GroupStop));
        self
    }

    /// Adds a section title.
    pub fn add_title(&mut self, title: &str) -> &mut Self {
        self.add_field(FieldKind::Title, None, Some(title), AttrMap::new(), None, None)
    }

    /// Derives the submission snapshot and runs the rules against it.
    ///
    /// Returns `false` without running any rules when the identity
    /// token is configured and the submitted token is missing or
    /// different; that situation is "not submitted", not a per-field
    /// error. A fresh run replaces earlier rule errors and clears the
    /// manual overlay.
    pub fn validate(&mut self, rules: &RuleSet) -> bool {
        self.data = escaped_copy(self.raw_payload());
        self.prepared = true;

        if !self.identity_matches() {
            tracing::debug!(form = self.id.as_deref().unwrap_or(""), "identity token mismatch");
            return false;
        }

        let engine = Engine::new(rules, &self.data, &self.catalog);
        self.rule_errors = engine.run();
        self.manual_errors = ErrorMap::new();

        tracing::debug!(errors = self.rule_errors.len(), "validation finished");
        true
    }

    /// Records a manual error for a field. Manual entries win over
    /// rule results for the same field until the next [`Self::validate`]
    /// call recomputes the map.
    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.manual_errors.insert(path, message);
    }

    /// Returns the merged error map (manual entries win per field).
    pub fn errors(&self) -> ErrorMap {
        let mut merged = self.rule_errors.clone();
        merged.merge(&self.manual_errors);
        merged
    }

    /// Returns the effective error message for a field.
    pub fn error_for(&self, path: &str) -> Option<&str> {
        self.manual_errors
            .get(path)
            .or_else(|| self.rule_errors.get(path))
    }

    /// Returns whether any field has an error.
    pub fn has_errors(&self) -> bool {
        !self.rule_errors.is_empty() || !self.manual_errors.is_empty()
    }

    fn identity_matches(&self) -> bool {
        let Some(expected) = &self.id else {
            return true;
        };

        let escaped = html_escape(expected);
        self.data
            .resolve(IDENTITY_FIELD)
            .and_then(Value::as_str)
            .map_or(false, |token| token == escaped)
    }

    /// Returns whether this form was submitted: no errors, a derived
    /// non-empty snapshot, and a matching identity token when one is
    /// configured.
    pub fn is_submitted(&self) -> bool {
        if self.has_errors() {
            return false;
        }

        if !self.prepared || self.data.is_empty() {
            return false;
        }

        self.identity_matches()
    }

    /// Returns whether the current request asks for this form's
    /// partial (AJAX) response.
    pub fn is_partial_request(&self) -> bool {
        match &self.id {
            Some(id) => self.request.is_ajax() && self.request.query_or("form", "") == id.as_str(),
            None => false,
        }
    }

    /// Renders the inner field markup in declaration order.
    ///
    /// When an identity token is configured, the hidden token field is
    /// injected before the walk.
    pub fn render_fields(&mut self) -> String {
        if let Some(id) = self.id.clone() {
            if !self.identity_injected {
                self.add_hidden(IDENTITY_FIELD, &id);
                self.identity_injected = true;
            }
        }

        let has_data = !self.data.is_empty();
        let mut html = String::new();
        let mut active_col: Option<AttrMap> = None;

        for field in self.fields.iter() {
            match field.kind {
                FieldKind::GroupStart => {
                    let group = field.group.clone().unwrap_or_default();
                    let mut col = group.col_attrs.clone();
                    let class = format!(
                        "col-{} {}",
                        group.columns,
                        col.get("class").unwrap_or("")
                    )
                    .trim()
                    .to_string();
                    col.set("class", class);
                    active_col = Some(col);
                    html.push_str(&self.renderer.group_start(&group));
                    continue;
                }
                FieldKind::GroupStop => {
                    active_col = None;
                    html.push_str(&self.renderer.group_stop());
                    continue;
                }
                _ => {}
            }

            let path = field.path.as_deref().unwrap_or("");
            let checked = field.path.as_deref().map_or(false, |p| {
                field.kind == FieldKind::Checkbox
                    && self.data_by_path(p).as_ref().map_or(false, value_is_truthy)
            });

            let ctx = FieldContext {
                name: field_name(path, ""),
                id: element_id(path),
                error: if has_data { self.error_for(path) } else { None },
                col_attrs: active_col.as_ref(),
                checked,
            };

            html.push_str(&self.renderer.field(field, &ctx));
            html.push_str(self.renderer.separator());
        }

        html
    }

    /// Renders the complete `<form>` element.
    pub fn render(&mut self) -> String {
        let inner = self.render_fields();

        let mut attrs = AttrMap::new()
            .with("action", &self.action)
            .with("method", self.method.as_str());
        if let Some(id) = &self.id {
            attrs.set("id", id);
            attrs.set("class", "ajax-form");
        }

        format!("<form{}>{inner}</form>", attrs.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    fn post_request(body: &str) -> Request {
        Request::post("/contact").form_body(body)
    }

    #[test]
    fn test_binding_from_post_payload() {
        let mut form = Form::new(post_request("user[name]=Jan"));
        form.add_input("user/name", Some("Name"), AttrMap::new());

        let html = form.render();
        assert!(html.contains("value=\"Jan\""));
        assert!(html.contains("name=\"user[name]\""));
        assert!(html.contains("id=\"userName\""));
    }

    #[test]
    fn test_binding_prefers_seeded_data() {
        let seeded = formkit_http::parse_form_urlencoded("user[name]=Model");
        let mut form = Form::new(post_request("user[name]=Request"));
        form.set_data(&seeded);
        form.add_input("user/name", None, AttrMap::new());

        assert!(form.render().contains("value=\"Model\""));
    }

    #[test]
    fn test_binding_escapes_request_values() {
        let mut form = Form::new(post_request("note=a%26b"));
        form.add_input("note", None, AttrMap::new());

        assert!(form.render().contains("value=\"a&amp;b\""));
    }

    #[test]
    fn test_get_method_binds_from_query() {
        let request = Request::get("/search").query_string("term=rust");
        let mut form = Form::new(request).with_method(Method::Get);
        form.add_input("term", None, AttrMap::new());

        assert!(form.render().contains("value=\"rust\""));
    }

    #[test]
    fn test_checkbox_binding_truthy() {
        let mut form = Form::new(post_request("agree=1"));
        form.add_checkbox("agree", Some("I agree"), AttrMap::new());

        assert!(form.render().contains("checked=\"checked\""));
    }

    #[test]
    fn test_checkbox_binding_falsy() {
        let mut form = Form::new(post_request("agree=0"));
        form.add_checkbox("agree", Some("I agree"), AttrMap::new());

        assert!(!form.render().contains("checked=\"checked\""));
    }

    #[test]
    fn test_hidden_bound_data_overrides_value() {
        let mut form = Form::new(post_request("token=submitted"));
        form.add_hidden("token", "initial");

        assert!(form.render().contains("value=\"submitted\""));
    }

    #[test]
    fn test_select_auto_selection_from_data() {
        let mut form = Form::new(post_request("status=b"));
        form.add_select(
            "status",
            vec![("a".to_string(), "A".to_string()), ("b".to_string(), "B".to_string())],
            Selection::None,
            None,
            AttrMap::new(),
        );

        assert!(form.render().contains("<option value=\"b\" selected>B</option>"));
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut form = Form::new(post_request("email=bad"));
        let rules = RuleSet::new().field("email", [Rule::Required, Rule::IsEmail]);

        assert!(form.validate(&rules));
        assert_eq!(
            form.error_for("email"),
            Some("The provided email address is invalid.")
        );
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_is_submitted_happy_path() {
        let mut form = Form::new(post_request("email=jan%40example.com"));
        let rules = RuleSet::new().field("email", [Rule::Required, Rule::IsEmail]);

        assert!(form.validate(&rules));
        assert!(form.is_submitted());
    }

    #[test]
    fn test_is_submitted_requires_payload() {
        let mut form = Form::new(Request::post("/contact"));
        assert!(form.validate(&RuleSet::new()));
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_identity_gate_accepts_matching_token() {
        let mut form = Form::new(post_request("formId=f1&email=jan%40example.com"));
        form.set_id("f1");

        assert!(form.validate(&RuleSet::new()));
        assert!(form.is_submitted());
    }

    #[test]
    fn test_identity_gate_rejects_missing_or_wrong_token() {
        let mut form = Form::new(post_request("email=jan%40example.com"));
        form.set_id("f1");
        assert!(!form.validate(&RuleSet::new()));
        assert!(!form.is_submitted());

        let mut other = Form::new(post_request("formId=f2&email=jan%40example.com"));
        other.set_id("f1");
        assert!(!other.validate(&RuleSet::new()));
        assert!(!other.is_submitted());
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let mut form = Form::new(post_request("email=bad"));
        let rules = RuleSet::new().field("email", [Rule::IsEmail]);

        form.validate(&rules);
        let first = form.errors();
        form.validate(&rules);
        assert_eq!(first, form.errors());
    }

    #[test]
    fn test_manual_error_wins_until_revalidation() {
        let mut form = Form::new(post_request("email=jan%40example.com"));
        let rules = RuleSet::new().field("email", [Rule::IsEmail]);

        form.validate(&rules);
        form.add_error("email", "Address already registered.");
        assert_eq!(form.error_for("email"), Some("Address already registered."));
        assert!(!form.is_submitted());

        form.validate(&rules);
        assert_eq!(form.error_for("email"), None);
        assert!(form.is_submitted());
    }

    #[test]
    fn test_render_injects_identity_field_once() {
        let mut form = Form::new(post_request(""));
        form.set_id("contact");

        let html = form.render();
        assert!(html.contains("name=\"formId\""));
        assert!(html.contains("value=\"contact\""));
        assert!(html.contains("id=\"contact\" class=\"ajax-form\""));

        let again = form.render();
        assert_eq!(again.matches("name=\"formId\"").count(), 1);
    }

    #[test]
    fn test_render_form_attributes() {
        let request = Request::post("/contact");
        let mut form = Form::new(request);
        form.add_submit("Send", AttrMap::new());

        let html = form.render();
        assert!(html.starts_with("<form action=\"/contact\" method=\"POST\">"));
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_partial_request_detection() {
        let request = Request::post("/contact").query_string("ajax=form&form=contact");
        let mut form = Form::new(request);
        form.set_id("contact");
        assert!(form.is_partial_request());

        let other = Request::post("/contact").query_string("ajax=form&form=other");
        let mut mismatch = Form::new(other);
        mismatch.set_id("contact");
        assert!(!mismatch.is_partial_request());
    }

    #[test]
    fn test_group_walk_applies_columns() {
        let mut form = Form::new(post_request(""));
        form.start_group(6, AttrMap::new(), AttrMap::new())
            .add_input("a", None, AttrMap::new())
            .stop_group();

        let html = form.render();
        assert!(html.contains("<div class=\"row\">"));
        assert!(html.contains("<div class=\"mb-3 col-6\">"));
        assert!(html.contains("</div>"));
    }

    #[test]
    fn test_errors_render_only_with_data() {
        // Unsubmitted form: rules have not run, nothing to show.
        let mut form = Form::new(Request::post("/contact"));
        form.add_input("email", None, AttrMap::new());
        let html = form.render();
        assert!(!html.contains("text-danger"));

        // Submitted with a failing value: message and styling appear.
        let mut submitted = Form::new(post_request("email=bad"));
        submitted.add_input("email", None, AttrMap::new());
        let rules = RuleSet::new().field("email", [Rule::IsEmail]);
        submitted.validate(&rules);
        let html = submitted.render();
        assert!(html.contains("border-danger"));
        assert!(html.contains("The provided email address is invalid."));
    }
}
