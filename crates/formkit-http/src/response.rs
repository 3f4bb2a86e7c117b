//! HTTP response type.

use std::collections::HashMap;

use serde::Serialize;

/// The JSON payload the client script follows instead of swapping in
/// markup.
#[derive(Debug, Clone, Serialize)]
pub struct RedirectPayload {
    /// Always `"redirect"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Target URL.
    pub url: String,
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a response with HTML content.
    pub fn html(body: impl Into<String>) -> Self {
        let body_str = body.into();
        Self {
            status: 200,
            headers: [(
                "Content-Type".to_string(),
                "text/html; charset=utf-8".to_string(),
            )]
            .into_iter()
            .collect(),
            body: body_str.into_bytes(),
        }
    }

    /// Creates a response with JSON content.
    pub fn json<T: Serialize>(data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self {
                status: 200,
                headers: [("Content-Type".to_string(), "application/json".to_string())]
                    .into_iter()
                    .collect(),
                body,
            },
            Err(_) => Self::new(500).body(b"Internal Server Error".to_vec()),
        }
    }

    /// Creates an HTTP redirect response.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            status: 302,
            headers: [("Location".to_string(), url.into())].into_iter().collect(),
            body: Vec::new(),
        }
    }

    /// Creates the JSON redirect instruction consumed by the form
    /// submission script.
    pub fn ajax_redirect(url: impl Into<String>) -> Self {
        Self::json(&RedirectPayload {
            kind: "redirect",
            url: url.into(),
        })
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}
