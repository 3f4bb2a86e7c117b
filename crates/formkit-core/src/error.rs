//! Error types for forms.

use thiserror::Error;

/// Form-specific errors.
///
/// Per-field validation failures are not errors at this level; they are
/// collected into an error map and handed to the renderer. This enum
/// covers configuration and orchestration failures only.
#[derive(Debug, Error)]
pub enum FormError {
    /// A message locale that has no catalog.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A form name with no registered handler.
    #[error("form not found: {0}")]
    UnknownForm(String),

    /// A handler failed while building or processing a form.
    #[error("form handler error: {0}")]
    Handler(String),

    /// Asset installation failure.
    #[error("failed to install form assets: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
