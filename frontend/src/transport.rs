//! Request helper used by every action handler.
//!
//! Callers never deal with parse failures: a body that is not JSON comes back
//! as `ApiReply::Raw` with the HTTP status and text, which is still enough to
//! build an alert. Only a request that never got a response is an error.

use common::responses::ApiStatus;
use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;
use web_sys::FormData;

use crate::error::ManagerError;

pub const UPLOAD_URL: &str = "/api/upload";
pub const DELETE_URL: &str = "/api/delete";
pub const DELETE_ALL_URL: &str = "/api/delete-all";
pub const ROTATE_URL: &str = "/api/rotate";
pub const REORDER_URL: &str = "/api/reorder";

/// Header the backend's CSRF protection reads the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Multipart field name the upload endpoint collects files from.
pub const UPLOAD_FIELD: &str = "files";

pub fn reset_url(file: &str) -> String {
    format!("/api/reset/{}", urlencoding::encode(file))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request body. `F` is the platform file type: `web_sys::File` in the
/// browser, a plain struct in tests.
#[derive(Debug, Clone)]
pub enum Body<F> {
    Json(Value),
    Form { field: &'static str, files: Vec<F> },
}

impl<F> Body<F> {
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, ManagerError> {
        serde_json::to_value(payload)
            .map(Body::Json)
            .map_err(|e| ManagerError::Transport(format!("could not encode request: {}", e)))
    }

    pub fn upload(files: Vec<F>) -> Self {
        Body::Form { field: UPLOAD_FIELD, files }
    }
}

/// Headers for a request.
///
/// Form bodies get no `Content-Type` so the browser can add the multipart
/// boundary itself. The token is only sent on non-read methods.
pub fn request_headers<F>(
    method: Method,
    body: Option<&Body<F>>,
    csrf_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();
    if let Some(Body::Json(_)) = body {
        headers.push(("Content-Type", "application/json".to_string()));
    }
    if method != Method::Get {
        if let Some(token) = csrf_token.filter(|t| !t.is_empty()) {
            headers.push((CSRF_HEADER, token.to_string()));
        }
    }
    headers
}

/// A response body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Json(Value),
    Raw { status: u16, text: String },
}

impl ApiReply {
    pub fn parse(status: u16, text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => ApiReply::Json(value),
            Err(_) => ApiReply::Raw {
                status,
                text: text.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<ApiStatus> {
        match self {
            ApiReply::Json(value) => value
                .get("status")
                .and_then(|s| serde_json::from_value(s.clone()).ok()),
            ApiReply::Raw { .. } => None,
        }
    }

    /// What to show the user when the reply is not a success: the server's
    /// `error` field if present, otherwise the whole reply.
    pub fn error_text(&self) -> String {
        match self {
            ApiReply::Json(value) => match value.get("error") {
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
                None => value.to_string(),
            },
            ApiReply::Raw { status, text } => format!("HTTP {}: {}", status, text),
        }
    }

    /// `Ok(self)` when `accept` approves the status, `ManagerError::Server`
    /// with the error text otherwise.
    pub fn require(self, accept: impl Fn(ApiStatus) -> bool) -> Result<Self, ManagerError> {
        match self.status() {
            Some(status) if accept(status) => Ok(self),
            _ => Err(ManagerError::Server(self.error_text())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    type File;

    async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<Body<Self::File>>,
    ) -> Result<ApiReply, ManagerError>;
}

/// `gloo-net` backed transport used in the browser.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    csrf_token: Option<String>,
}

impl HttpTransport {
    pub fn new(csrf_token: Option<String>) -> Self {
        Self { csrf_token }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

impl Transport for HttpTransport {
    type File = web_sys::File;

    async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<Body<web_sys::File>>,
    ) -> Result<ApiReply, ManagerError> {
        let mut builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
        };
        for (name, value) in request_headers(method, body.as_ref(), self.csrf_token()) {
            builder = builder.header(name, &value);
        }

        let request = match body {
            Some(Body::Json(value)) => builder.body(value.to_string())?,
            Some(Body::Form { field, files }) => {
                let form = FormData::new()
                    .map_err(|e| ManagerError::Transport(format!("{:?}", e)))?;
                for file in &files {
                    form.append_with_blob(field, file)
                        .map_err(|e| ManagerError::Transport(format!("{:?}", e)))?;
                }
                builder.body(form)?
            }
            None => builder.build()?,
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        log::debug!("{} -> {}", url, status);
        Ok(ApiReply::parse(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_json_body_degrades_to_raw_reply() {
        let reply = ApiReply::parse(502, "<html>Bad Gateway</html>");
        assert_eq!(
            reply,
            ApiReply::Raw {
                status: 502,
                text: "<html>Bad Gateway</html>".to_string()
            }
        );
        assert_eq!(reply.status(), None);
        assert_eq!(reply.error_text(), "HTTP 502: <html>Bad Gateway</html>");
    }

    #[test]
    fn error_field_is_preferred_for_messages() {
        let reply = ApiReply::parse(400, r#"{"error": "arquivo inválido"}"#);
        assert_eq!(reply.status(), None);
        assert_eq!(reply.error_text(), "arquivo inválido");
        assert!(matches!(
            reply.require(|s| s == ApiStatus::Ok),
            Err(ManagerError::Server(message)) if message == "arquivo inválido"
        ));
    }

    #[test]
    fn reply_without_error_field_is_shown_whole() {
        let reply = ApiReply::Json(json!({ "status": "busy" }));
        assert_eq!(reply.status(), Some(ApiStatus::Unknown));
        assert_eq!(reply.error_text(), r#"{"status":"busy"}"#);
    }

    #[test]
    fn json_post_carries_content_type_and_token() {
        let body: Body<()> = Body::json(&json!({ "filename": "a.pdf" })).unwrap();
        let headers = request_headers(Method::Post, Some(&body), Some("tok"));
        assert_eq!(
            headers,
            vec![
                ("Content-Type", "application/json".to_string()),
                (CSRF_HEADER, "tok".to_string()),
            ]
        );
    }

    #[test]
    fn form_post_leaves_content_type_to_the_browser() {
        let body = Body::upload(vec!["a.pdf"]);
        let headers = request_headers(Method::Post, Some(&body), Some("tok"));
        assert_eq!(headers, vec![(CSRF_HEADER, "tok".to_string())]);
    }

    #[test]
    fn reads_and_missing_tokens_send_no_token() {
        assert!(request_headers::<()>(Method::Get, None, Some("tok")).is_empty());
        assert!(request_headers::<()>(Method::Post, None, Some("")).is_empty());
        assert!(request_headers::<()>(Method::Post, None, None).is_empty());
    }

    #[test]
    fn reset_url_encodes_the_file_name() {
        assert_eq!(reset_url("my file.pdf"), "/api/reset/my%20file.pdf");
    }
}
