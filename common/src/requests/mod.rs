//! Request payloads for the document management API.
//!
//! Every mutating endpoint under `/api` takes one of these as its JSON body,
//! except `/api/upload` which is multipart and `/api/reset/{file}` which has
//! no body.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/delete`. Removes the document from the session; the
/// original upload stays on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub filename: String,
}

/// Body of `POST /api/delete-all`. Serializes to `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAllRequest {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    Right,
    Left,
}

/// Body of `POST /api/rotate`. `page` is zero-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotateRequest {
    pub filename: String,
    pub page: u32,
    pub direction: RotateDirection,
}

/// Body of `POST /api/reorder`: the complete new sidebar order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rotate_request_uses_lowercase_direction() {
        let request = RotateRequest {
            filename: "a.pdf".to_string(),
            page: 2,
            direction: RotateDirection::Right,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "filename": "a.pdf", "page": 2, "direction": "right" })
        );
    }

    #[test]
    fn delete_all_is_an_empty_object() {
        assert_eq!(serde_json::to_string(&DeleteAllRequest::default()).unwrap(), "{}");
    }
}
