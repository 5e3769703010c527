use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of the working session as the backend persists it in
/// `work/state.json` and embeds it into the index page.
///
/// `order` is the display order of the documents in the sidebar. `files`
/// only holds entries for documents that have been edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub files: BTreeMap<String, FileEdits>,
}

/// Edits applied to the working copy of a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEdits {
    /// Zero-based page index (as a string key) to accumulated clockwise
    /// rotation in degrees: 0, 90, 180 or 270.
    #[serde(default)]
    pub rotations: BTreeMap<String, u16>,
}

impl SessionState {
    /// Number of pages of `file` whose accumulated rotation is not a full turn.
    pub fn rotated_pages(&self, file: &str) -> usize {
        self.files
            .get(file)
            .map(|edits| edits.rotations.values().filter(|deg| *deg % 360 != 0).count())
            .unwrap_or(0)
    }
}
