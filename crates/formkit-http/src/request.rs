//! HTTP request type.

use std::collections::HashMap;

use crate::payload::{parse_form_urlencoded, Value};

/// Form submission methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// GET method: values travel in the query string.
    Get,
    /// POST method: values travel in the request body.
    #[default]
    Post,
}

impl Method {
    /// Parses a method from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            _ => None,
        }
    }

    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An HTTP request as seen by the form layer.
///
/// Query and body data are kept as already-parsed nested payloads; the
/// form layer only ever performs structural lookups against them.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    query: Value,
    post: Value,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            query: Value::map(),
            post: Value::map(),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Parses a raw query string (bracket keys included) into the
    /// request's query payload.
    #[must_use]
    pub fn query_string(mut self, raw: &str) -> Self {
        self.query = parse_form_urlencoded(raw);
        self
    }

    /// Parses an `application/x-www-form-urlencoded` body into the
    /// request's post payload.
    #[must_use]
    pub fn form_body(mut self, raw: &str) -> Self {
        self.post = parse_form_urlencoded(raw);
        self
    }

    /// Sets a single query parameter, addressed by slash path.
    #[must_use]
    pub fn query_param(mut self, path: &str, value: impl Into<String>) -> Self {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        self.query.insert_path(&segments, value.into());
        self
    }

    /// Sets a single post parameter, addressed by slash path.
    #[must_use]
    pub fn post_param(mut self, path: &str, value: impl Into<String>) -> Self {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        self.post.insert_path(&segments, value.into());
        self
    }

    /// Returns the full query payload.
    pub fn all_query(&self) -> &Value {
        &self.query
    }

    /// Returns the full post payload.
    pub fn all_post(&self) -> &Value {
        &self.post
    }

    /// Returns a top-level query parameter as a scalar, or `default`
    /// when missing or structured.
    pub fn query_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.query
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Gets a header value (case-insensitive).
    pub fn get_header(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Returns whether this request asks for a partial form response
    /// (the client script appends `ajax=form` to the submission URL).
    pub fn is_ajax(&self) -> bool {
        self.query_or("ajax", "") == "form"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from_str("GET"), Some(Method::Get));
        assert_eq!(Method::from_str("post"), Some(Method::Post));
        assert_eq!(Method::from_str("DELETE"), None);
    }

    #[test]
    fn test_request_builder() {
        let req = Request::post("/contact")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form_body("user[name]=Jan&agree=1");

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/contact");
        assert_eq!(
            req.get_header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            req.all_post().resolve("user/name").and_then(Value::as_str),
            Some("Jan")
        );
    }

    #[test]
    fn test_query_or_default() {
        let req = Request::get("/").query_string("page=2");
        assert_eq!(req.query_or("page", "1"), "2");
        assert_eq!(req.query_or("missing", "1"), "1");
    }

    #[test]
    fn test_is_ajax() {
        let req = Request::post("/contact").query_string("ajax=form&form=contact");
        assert!(req.is_ajax());

        let plain = Request::post("/contact");
        assert!(!plain.is_ajax());
    }

    #[test]
    fn test_param_builders() {
        let req = Request::get("/")
            .query_param("user/city", "Warsaw")
            .post_param("agree", "1");
        assert_eq!(
            req.all_query()
                .resolve("user/city")
                .and_then(Value::as_str),
            Some("Warsaw")
        );
        assert_eq!(req.all_post().resolve("agree").and_then(Value::as_str), Some("1"));
    }
}
