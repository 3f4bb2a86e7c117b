//! # formkit-http
//!
//! Minimal HTTP request/response types for the formkit form engine.
//!
//! The form layer never touches raw wire data: this crate parses query
//! strings and `application/x-www-form-urlencoded` bodies (bracket
//! keys included) into nested [`Value`] payloads that are addressed
//! with slash-delimited paths.
//!
//! ```rust
//! use formkit_http::{Request, Value};
//!
//! let request = Request::post("/contact")
//!     .form_body("user[email]=jan%40example.com&agree=1");
//!
//! let email = request
//!     .all_post()
//!     .resolve("user/email")
//!     .and_then(Value::as_str);
//! assert_eq!(email, Some("jan@example.com"));
//! ```

mod payload;
mod request;
mod response;

pub use payload::{parse_form_urlencoded, Value};
pub use request::{Method, Request};
pub use response::{RedirectPayload, Response};
