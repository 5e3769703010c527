//! Settings the server embeds in the management page.
//!
//! ```html
//! <meta name="csrf-token" content="...">
//! <meta name="log-level" content="debug">
//! <script id="pdf-session" type="application/json">{"order": ["a.pdf"]}</script>
//! ```

use common::model::session::SessionState;
use log::LevelFilter;
use thiserror::Error;
use web_sys::Document;

const CSRF_META: &str = "meta[name=csrf-token]";
const LOG_LEVEL_META: &str = "meta[name=log-level]";
const SESSION_SCRIPT_ID: &str = "pdf-session";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no document available")]
    NoDocument,

    #[error("invalid session data: {0}")]
    Session(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub csrf_token: Option<String>,
    pub session: SessionState,
    pub log_level: LevelFilter,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            csrf_token: None,
            session: SessionState::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl PageConfig {
    /// Builds the configuration from the raw strings found in the page. A
    /// blank token counts as absent and a blank session as an empty one.
    pub fn from_parts(
        csrf_token: Option<String>,
        session_json: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let session = match session_json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => serde_json::from_str(json)?,
            None => SessionState::default(),
        };
        Ok(Self {
            csrf_token: csrf_token.filter(|t| !t.trim().is_empty()),
            session,
            log_level: parse_log_level(log_level),
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        let document = document()?;
        let session_json = document
            .get_element_by_id(SESSION_SCRIPT_ID)
            .and_then(|script| script.text_content());
        Self::from_parts(
            meta_content(&document, CSRF_META),
            session_json.as_deref(),
            meta_content(&document, LOG_LEVEL_META).as_deref(),
        )
    }
}

fn document() -> Result<Document, ConfigError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ConfigError::NoDocument)
}

fn meta_content(document: &Document, selector: &str) -> Option<String> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}

/// Unknown or missing values fall back to `Info`.
pub fn parse_log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|r| r.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Reads only the log level, so logging can start before the rest of the
/// configuration is parsed.
pub fn log_level_from_document() -> LevelFilter {
    let raw = document()
        .ok()
        .and_then(|d| meta_content(&d, LOG_LEVEL_META));
    parse_log_level(raw.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_give_an_empty_session() {
        let config = PageConfig::from_parts(None, None, None).unwrap();
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let config = PageConfig::from_parts(Some("  ".to_string()), Some(""), None).unwrap();
        assert_eq!(config.csrf_token, None);
        assert!(config.session.order.is_empty());
    }

    #[test]
    fn session_json_is_parsed() {
        let json = r#"{"order": ["a.pdf", "b.pdf"], "files": {"a.pdf": {"rotations": {"0": 90}}}}"#;
        let config = PageConfig::from_parts(Some("tok".to_string()), Some(json), Some("debug")).unwrap();

        assert_eq!(config.csrf_token.as_deref(), Some("tok"));
        assert_eq!(config.session.order, vec!["a.pdf", "b.pdf"]);
        assert_eq!(config.session.rotated_pages("a.pdf"), 1);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn broken_session_json_is_an_error() {
        let result = PageConfig::from_parts(None, Some("{order: }"), None);
        assert!(matches!(result, Err(ConfigError::Session(_))));
    }

    #[test]
    fn log_levels_are_case_insensitive() {
        assert_eq!(parse_log_level(Some("WARN")), LevelFilter::Warn);
        assert_eq!(parse_log_level(Some(" trace ")), LevelFilter::Trace);
        assert_eq!(parse_log_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_log_level(None), LevelFilter::Info);
    }
}
