//! Form handlers and the handler registry.
//!
//! A handler describes one named form: which fields it declares, which
//! rules gate submission, and what happens on acceptance. Handlers are
//! registered up front under explicit names; generating a form for an
//! unknown name is a typed error, never a dynamic lookup.

use std::collections::HashMap;

use formkit_http::{Request, Response, Value};

use crate::error::{FormError, Result};
use crate::form::Form;
use crate::validation::RuleSet;

/// What an accepted submission asks the surrounding response pipeline
/// to do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitOutcome {
    /// Re-render the form in place.
    #[default]
    Stay,
    /// Navigate to the given URL.
    Redirect(String),
}

/// One named form: declaration, rules, and submission handling.
pub trait FormHandler {
    /// Configures the form before fields are declared (identity token,
    /// method, action, locale).
    fn init(&mut self, _form: &mut Form) -> Result<()> {
        Ok(())
    }

    /// Declares the form's fields.
    fn build(&mut self, form: &mut Form) -> Result<()>;

    /// Returns the rules gating submission.
    fn rules(&self) -> RuleSet {
        RuleSet::new()
    }

    /// Runs once per accepted submission.
    fn on_submit(&mut self, _form: &mut Form) -> Result<SubmitOutcome> {
        Ok(SubmitOutcome::Stay)
    }
}

/// The result of one form pass.
#[derive(Debug)]
pub enum FormOutput {
    /// Full form markup for page composition.
    Page(String),
    /// A short-circuit response for a partial (AJAX) request,
    /// bypassing normal page composition.
    Partial(Response),
    /// A redirect after an accepted non-AJAX submission.
    Redirect(Response),
}

type HandlerFactory = Box<dyn Fn() -> Box<dyn FormHandler> + Send + Sync>;

/// Explicit name → handler constructor map.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("forms", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler constructor under a name.
    #[must_use]
    pub fn register<F, H>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: FormHandler + 'static,
    {
        self.factories
            .insert(name.into(), Box::new(move || Box::new(factory())));
        self
    }

    /// Returns the registered form names.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Instantiates the handler registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn FormHandler>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| FormError::UnknownForm(name.to_string()))
    }

    /// Runs a complete form pass: instantiate, configure, declare,
    /// validate, handle an accepted submission, and render.
    ///
    /// A request carrying this form's partial marker short-circuits to
    /// a [`FormOutput::Partial`] response with the inner markup (or a
    /// redirect instruction); everything else renders the full form or
    /// an HTTP redirect.
    pub fn generate(&self, name: &str, request: &Request, data: &Value) -> Result<FormOutput> {
        let mut handler = self.create(name)?;
        let mut form = Form::new(request.clone());

        if !data.is_empty() {
            form.set_data(data);
        }

        handler.init(&mut form)?;
        handler.build(&mut form)?;

        let rules = handler.rules();
        form.validate(&rules);

        let mut outcome = SubmitOutcome::Stay;
        if form.is_submitted() {
            tracing::info!(form = name, "form submitted");
            outcome = handler.on_submit(&mut form)?;
        }

        if form.is_partial_request() {
            tracing::debug!(form = name, "partial response short-circuit");
            return Ok(FormOutput::Partial(match outcome {
                SubmitOutcome::Redirect(url) => Response::ajax_redirect(url),
                SubmitOutcome::Stay => Response::html(form.render_fields()),
            }));
        }

        match outcome {
            SubmitOutcome::Redirect(url) => Ok(FormOutput::Redirect(Response::redirect(url))),
            SubmitOutcome::Stay => Ok(FormOutput::Page(form.render())),
        }
    }
}
