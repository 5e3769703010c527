//! Component state for the PDF manager page.
//!
//! The document list, viewer state, session edits and staging set all live in
//! the shared `BrowserManager`; this struct only keeps what the view needs on
//! top of it: DOM refs and the flags that disable controls while a request is
//! in flight.

use std::collections::HashMap;
use std::rc::Rc;

use yew::prelude::*;

use crate::config::PageConfig;
use crate::manager::{BrowserManager, Manager};
use crate::pdf::pdfjs::{CanvasSurface, PdfJsEngine};
use crate::shell::BrowserShell;
use crate::transport::HttpTransport;

/// How long the rotate confirmation stays on screen.
pub const FEEDBACK_MS: u32 = 1100;

/// Refs for one sidebar entry.
#[derive(Clone, Default, PartialEq)]
pub struct EntryRefs {
    pub entry: NodeRef,
    pub canvas: NodeRef,
}

pub struct PdfManager {
    pub manager: Rc<BrowserManager>,
    pub config: Rc<PageConfig>,

    /// Keyed by file name, so entries keep their canvas when the list is
    /// reordered.
    pub entries: HashMap<String, EntryRefs>,
    pub viewer_ref: NodeRef,
    pub quick_input_ref: NodeRef,
    pub staging_input_ref: NodeRef,

    pub upload_open: bool,
    pub uploading: bool,
    pub delete_all_busy: bool,
    pub rotating: bool,

    pub sidebar_collapsed: bool,
    pub sidebar_shown: bool,

    pub feedback: Option<String>,
    /// Bumped on every new feedback so an older timer does not clear it.
    pub feedback_ticket: u64,

    /// Set when every thumbnail should be drawn again after the next render.
    pub thumbs_dirty: bool,
    /// Set when the active entry should be scrolled into view after the next
    /// render.
    pub scroll_pending: bool,
}

impl PdfManager {
    pub fn new(config: Rc<PageConfig>) -> Self {
        let viewer_ref = NodeRef::default();
        let manager = Manager::new(
            HttpTransport::new(config.csrf_token.clone()),
            BrowserShell,
            Rc::new(PdfJsEngine),
            CanvasSurface::new(viewer_ref.clone()),
            config.session.clone(),
        );
        let entries = manager
            .files()
            .entries()
            .iter()
            .map(|file| (file.clone(), EntryRefs::default()))
            .collect();

        Self {
            manager: Rc::new(manager),
            config,
            entries,
            viewer_ref,
            quick_input_ref: NodeRef::default(),
            staging_input_ref: NodeRef::default(),
            upload_open: false,
            uploading: false,
            delete_all_busy: false,
            rotating: false,
            sidebar_collapsed: false,
            sidebar_shown: false,
            feedback: None,
            feedback_ticket: 0,
            thumbs_dirty: true,
            scroll_pending: false,
        }
    }

    pub fn entry_refs(&self, file: &str) -> EntryRefs {
        self.entries.get(file).cloned().unwrap_or_default()
    }

    /// `(file, surface)` pairs for every entry currently in the list.
    pub fn thumbnail_targets(&self) -> Vec<(String, CanvasSurface)> {
        self.manager
            .files()
            .entries()
            .iter()
            .filter_map(|file| {
                self.entries
                    .get(file)
                    .map(|refs| (file.clone(), CanvasSurface::new(refs.canvas.clone())))
            })
            .collect()
    }

    pub fn active_entry(&self) -> Option<NodeRef> {
        let files = self.manager.files();
        let active = files.active()?;
        self.entries.get(active).map(|refs| refs.entry.clone())
    }
}
