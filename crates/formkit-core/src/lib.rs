//! # formkit-core
//!
//! Declarative form modeling, value binding, validation, and rendering.
//!
//! This crate provides:
//! - A builder surface for declaring fields against slash-delimited
//!   payload paths (`user/address/city` → `user[address][city]`)
//! - Value binding from nested request payloads or seeded model data
//! - A rule pipeline with per-field short-circuiting and localizable,
//!   pluralization-aware messages
//! - Plain and Bootstrap 5 renderers
//! - A handler registry orchestrating full request passes, including
//!   partial (AJAX) responses
//!
//! ## Quick Start
//!
//! ```rust
//! use formkit_core::{AttrMap, Form, Rule, RuleSet};
//! use formkit_http::Request;
//!
//! let request = Request::post("/signup")
//!     .form_body("user[email]=jan%40example.com&user[age]=30");
//!
//! let mut form = Form::new(request);
//! form.add_input("user/email", Some("E-mail"), AttrMap::new())
//!     .add_input("user/age", Some("Age"), AttrMap::new())
//!     .add_submit("Sign up", AttrMap::new());
//!
//! let rules = RuleSet::new()
//!     .field("user/email", [Rule::Required, Rule::IsEmail])
//!     .field("user/age", [Rule::IsInteger]);
//!
//! form.validate(&rules);
//! assert!(form.is_submitted());
//!
//! let html = form.render();
//! assert!(html.contains("name=\"user[email]\""));
//! assert!(html.contains("value=\"jan@example.com\""));
//! ```
//!
//! ## Handlers
//!
//! Forms that live behind a name implement [`FormHandler`] and are
//! registered explicitly:
//!
//! ```rust
//! use formkit_core::{
//!     AttrMap, Form, FormHandler, FormOutput, HandlerRegistry,
//!     Result, Rule, RuleSet,
//! };
//! use formkit_http::{Request, Value};
//!
//! struct Newsletter;
//!
//! impl FormHandler for Newsletter {
//!     fn init(&mut self, form: &mut Form) -> Result<()> {
//!         form.set_id("newsletter");
//!         Ok(())
//!     }
//!
//!     fn build(&mut self, form: &mut Form) -> Result<()> {
//!         form.add_input("email", Some("E-mail"), AttrMap::new())
//!             .add_submit("Subscribe", AttrMap::new());
//!         Ok(())
//!     }
//!
//!     fn rules(&self) -> RuleSet {
//!         RuleSet::new().field("email", [Rule::Required, Rule::IsEmail])
//!     }
//! }
//!
//! let registry = HandlerRegistry::new().register("newsletter", || Newsletter);
//! let output = registry
//!     .generate("newsletter", &Request::get("/newsletter"), &Value::map())
//!     .unwrap();
//! assert!(matches!(output, FormOutput::Page(_)));
//! ```
//!
//! ## Validation messages
//!
//! Built-in messages are localizable; counted messages pick the word
//! form by Slavic plural-count rules:
//!
//! ```rust
//! use formkit_core::validation::{Catalog, Locale, MessageKey};
//!
//! let catalog = Catalog::new(Locale::Pl);
//! assert_eq!(
//!     catalog.counted(MessageKey::LengthMin, 3),
//!     "Pole nie może mieć mniej niż 3 znaki."
//! );
//! ```

pub mod assets;
mod attrs;
mod error;
mod fields;
mod form;
mod handler;
pub mod path;
pub mod render;
pub mod validation;

pub use attrs::AttrMap;
pub use error::{FormError, Result};
pub use fields::{Field, FieldKind, FieldSet, GroupSpec, SelectOptions, Selection};
pub use form::Form;
pub use handler::{FormHandler, FormOutput, HandlerRegistry, SubmitOutcome};
pub use render::{html_escape, BootstrapRenderer, PlainRenderer, Renderer};
pub use validation::{ErrorMap, Locale, Rule, RuleSet, RuleViolation};
