//! Everything the management page keeps in memory, independent of yew.
//!
//! `Manager` owns the viewer, the sidebar list, the session edits, the upload
//! staging set and the rotate busy flag. The action handlers in `actions` are
//! implemented on it; the component only forwards events and re-renders.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use common::model::session::SessionState;

use crate::files::FileList;
use crate::pdf::pdfjs::PdfJsEngine;
use crate::pdf::PdfEngine;
use crate::shell::{BrowserShell, Shell};
use crate::staging::{StagedFile, StagingSet};
use crate::transport::{HttpTransport, Transport};
use crate::viewer::DocumentViewer;

pub type BrowserManager = Manager<HttpTransport, BrowserShell, PdfJsEngine>;

pub struct Manager<T, S, E>
where
    T: Transport,
    S: Shell,
    E: PdfEngine,
{
    pub(crate) transport: T,
    pub(crate) shell: S,
    pub(crate) viewer: DocumentViewer<E>,
    pub(crate) files: RefCell<FileList>,
    pub(crate) session: RefCell<SessionState>,
    pub(crate) staging: RefCell<StagingSet<T::File>>,
    pub(crate) rotate_busy: Cell<bool>,
}

impl<T, S, E> Manager<T, S, E>
where
    T: Transport,
    T::File: StagedFile,
    S: Shell,
    E: PdfEngine,
{
    pub fn new(
        transport: T,
        shell: S,
        engine: Rc<E>,
        surface: E::Surface,
        session: SessionState,
    ) -> Self {
        Self {
            transport,
            shell,
            viewer: DocumentViewer::new(engine, surface),
            files: RefCell::new(FileList::new(session.order.clone())),
            session: RefCell::new(session),
            staging: RefCell::new(StagingSet::new()),
            rotate_busy: Cell::new(false),
        }
    }

    pub fn viewer(&self) -> &DocumentViewer<E> {
        &self.viewer
    }

    pub fn files(&self) -> Ref<'_, FileList> {
        self.files.borrow()
    }

    pub fn session(&self) -> Ref<'_, SessionState> {
        self.session.borrow()
    }

    pub fn staging(&self) -> Ref<'_, StagingSet<T::File>> {
        self.staging.borrow()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotate_busy.get()
    }
}

/// Raises a busy flag for as long as it is alive.
pub(crate) struct BusyFlag<'a>(&'a Cell<bool>);

impl<'a> BusyFlag<'a> {
    pub(crate) fn raise(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        BusyFlag(flag)
    }
}

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
