//! Contact Form Example
//!
//! This example walks a contact form through its full lifecycle: the
//! initial GET render, an invalid submission, and an accepted AJAX
//! submission that answers with a redirect instruction.
//!
//! Run with: cargo run -p formkit-core --example contact_form

use formkit_core::{
    AttrMap, Form, FormHandler, FormOutput, HandlerRegistry, Result, Rule, RuleSet, Selection,
    SubmitOutcome,
};
use formkit_http::{Request, Value};

/// The contact form: identity-gated, validated, redirecting on
/// acceptance.
struct ContactForm;

impl FormHandler for ContactForm {
    fn init(&mut self, form: &mut Form) -> Result<()> {
        form.set_id("contact");
        Ok(())
    }

    fn build(&mut self, form: &mut Form) -> Result<()> {
        form.add_title("Contact us")
            .start_group(6, AttrMap::new(), AttrMap::new())
            .add_input("contact/name", Some("Name"), AttrMap::new())
            .add_input("contact/email", Some("E-mail"), AttrMap::new())
            .stop_group()
            .add_select(
                "contact/topic",
                vec![
                    ("general".to_string(), "General question".to_string()),
                    ("billing".to_string(), "Billing".to_string()),
                ],
                Selection::One("general".to_string()),
                Some("Topic"),
                AttrMap::new(),
            )
            .add_textarea("contact/message", Some("Message"), AttrMap::new())
            .add_checkbox("contact/copy", Some("Send me a copy"), AttrMap::new())
            .add_submit("Send", AttrMap::new());
        Ok(())
    }

    fn rules(&self) -> RuleSet {
        RuleSet::new()
            .field("contact/name", [Rule::Required, Rule::min_length(2)])
            .field("contact/email", [Rule::Required, Rule::IsEmail])
            .field("contact/message", [Rule::Required, Rule::max_length(2000)])
    }

    fn on_submit(&mut self, form: &mut Form) -> Result<SubmitOutcome> {
        println!(
            "accepted submission from {:?}",
            form.data_by_path("contact/email")
        );
        Ok(SubmitOutcome::Redirect("/contact/thanks".to_string()))
    }
}

fn main() -> Result<()> {
    let registry = HandlerRegistry::new().register("contact", || ContactForm);

    // Initial page load: a GET with no submission data.
    let output = registry.generate("contact", &Request::get("/contact"), &Value::map())?;
    if let FormOutput::Page(html) = output {
        println!("--- initial render ---\n{html}\n");
    }

    // Invalid submission: the rendered form carries the messages.
    let invalid = Request::post("/contact")
        .form_body("formId=contact&contact[name]=J&contact[email]=nope&contact[message]=");
    let output = registry.generate("contact", &invalid, &Value::map())?;
    if let FormOutput::Page(html) = output {
        println!("--- invalid submission ---\n{html}\n");
    }

    // Accepted AJAX submission: a redirect instruction, not markup.
    let accepted = Request::post("/contact")
        .query_string("ajax=form&form=contact")
        .form_body(
            "formId=contact&contact[name]=Jan&contact[email]=jan%40example.com\
             &contact[message]=Hello",
        );
    let output = registry.generate("contact", &accepted, &Value::map())?;
    if let FormOutput::Partial(response) = output {
        println!(
            "--- accepted ajax submission ---\n{}",
            response.body_string().unwrap_or_default()
        );
    }

    Ok(())
}
