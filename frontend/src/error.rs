//! Error types shared by the viewer, the transport layer and the action
//! handlers.
//!
//! Nothing here ever reaches the user as a panic: every async operation
//! catches its `ManagerError` at its own boundary and turns it into an alert
//! (actions), a placeholder (viewer) or a placeholder graphic (thumbnails).

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ManagerError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered, but not with a success status. Carries the
    /// server's `error` text when it sent one.
    #[error("{0}")]
    Server(String),

    /// pdf.js could not decode or rasterize the document.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Input problems detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid file: {0}")]
    NotPdf(String),

    #[error("No files to upload.")]
    EmptySelection,

    #[error("Open a file to rotate its current page.")]
    NoOpenDocument,
}

impl ManagerError {
    /// Text shown in the alert when an action fails. Validation messages are
    /// already complete sentences and are shown as they are.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ManagerError::Validation(err) => err.to_string(),
            other => format!("{}: {}", context, other),
        }
    }
}

impl From<gloo_net::Error> for ManagerError {
    fn from(err: gloo_net::Error) -> Self {
        ManagerError::Transport(err.to_string())
    }
}

/// Converts a rejected promise or thrown JS exception into a render error.
pub fn js_error(value: JsValue) -> ManagerError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "unknown error".to_string());
    ManagerError::Render(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_prefixed_with_context() {
        let err = ManagerError::Server("too large".to_string());
        assert_eq!(err.user_message("Upload error"), "Upload error: too large");
    }

    #[test]
    fn validation_errors_are_shown_verbatim() {
        let err = ManagerError::from(ValidationError::NotPdf("notes.txt".to_string()));
        assert_eq!(err.user_message("Upload error"), "Invalid file: notes.txt");
    }
}
