use serde::{Deserialize, Serialize};

/// Value of the `status` field the API puts in its JSON replies.
///
/// Error replies usually carry no `status` at all, only an `error` field, so
/// callers should treat anything other than `Ok`/`Partial` as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Ok,
    /// `delete-all` removed the session but some files could not be unlinked.
    Partial,
    Error,
    #[serde(other)]
    Unknown,
}

impl ApiStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ApiStatus::Ok | ApiStatus::Partial)
    }
}
