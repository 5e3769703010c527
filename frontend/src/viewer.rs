//! Single-document viewer: owns the open document, the current page, the page
//! count and the zoom scale, and repaints one surface.
//!
//! Every `open` takes a new request generation. When a load finishes after a
//! newer `open` (or a `close`) has started, the loaded document is destroyed
//! and the result dropped, so the last request always wins regardless of
//! which fetch completes first. At most one document is ever current.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::ManagerError;
use crate::pdf::{PdfDocument, PdfEngine, PdfPage, Surface};

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;

pub const SELECT_PROMPT: &str = "Select a file...";
pub const LOAD_FAILED: &str = "Failed to load PDF.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub phase: Phase,
    pub current_file: Option<String>,
    /// Always within `1..=max(1, total_pages)`.
    pub current_page: u32,
    pub total_pages: u32,
    /// Always within `MIN_SCALE..=MAX_SCALE`.
    pub scale: f64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            phase: Phase::Empty,
            current_file: None,
            current_page: 1,
            total_pages: 0,
            scale: 1.0,
        }
    }
}

impl ViewerState {
    pub fn page_indicator(&self) -> String {
        if self.total_pages == 0 {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.current_page, self.total_pages)
        }
    }

    pub fn zoom_indicator(&self) -> String {
        format!("{}%", (self.scale * 100.0).round() as i64)
    }

    /// Message to show instead of the canvas, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Empty => Some(SELECT_PROMPT),
            Phase::Failed => Some(LOAD_FAILED),
            Phase::Loading | Phase::Ready => None,
        }
    }
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Reads the "go to page" input from its leading integer, so `"3.5"` and
/// `"12abc"` mean pages 3 and 12. Input without leading digits is ignored;
/// zero and negative numbers mean the first page.
pub fn parse_page_input(raw: &str) -> Option<u32> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    if negative {
        return Some(1);
    }
    let value: u64 = rest[..digits].parse().unwrap_or(u64::MAX);
    Some(value.clamp(1, u32::MAX as u64) as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened { page: u32, total_pages: u32 },
    /// A newer `open` or a `close` started while this one was loading.
    Superseded,
}

pub struct DocumentViewer<E: PdfEngine> {
    engine: Rc<E>,
    surface: E::Surface,
    state: RefCell<ViewerState>,
    document: RefCell<Option<Rc<E::Document>>>,
    generation: Cell<u64>,
}

impl<E: PdfEngine> DocumentViewer<E> {
    pub fn new(engine: Rc<E>, surface: E::Surface) -> Self {
        Self {
            engine,
            surface,
            state: RefCell::new(ViewerState::default()),
            document: RefCell::new(None),
            generation: Cell::new(0),
        }
    }

    pub fn engine(&self) -> Rc<E> {
        self.engine.clone()
    }

    #[cfg(test)]
    pub fn surface(&self) -> &E::Surface {
        &self.surface
    }

    pub fn state(&self) -> ViewerState {
        self.state.borrow().clone()
    }

    pub fn current_file(&self) -> Option<String> {
        self.state.borrow().current_file.clone()
    }

    /// `true` while a document is current and rendered.
    pub fn is_open(&self) -> bool {
        self.document.borrow().is_some() && self.state.borrow().phase == Phase::Ready
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Opens `file_id` at `page`, clamped to the document's page range.
    ///
    /// The previous document is destroyed before the new one is fetched. On
    /// failure the viewer shows the load-failed placeholder and the error is
    /// returned for logging; callers do not need to alert.
    pub async fn open(&self, file_id: &str, page: u32) -> Result<OpenOutcome, ManagerError> {
        let generation = self.next_generation();
        {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Loading;
            state.current_file = Some(file_id.to_string());
        }

        let previous = self.document.borrow_mut().take();
        if let Some(previous) = previous {
            previous.destroy().await;
        }

        let loaded = self.engine.open(file_id).await;
        if !self.is_current(generation) {
            if let Ok(document) = &loaded {
                document.destroy().await;
            }
            log::debug!("dropping superseded load of {}", file_id);
            return Ok(OpenOutcome::Superseded);
        }

        let document = match loaded {
            Ok(document) => document,
            Err(err) => {
                self.fail();
                return Err(err);
            }
        };

        let total_pages = document.page_count();
        let page = clamp_page(page, total_pages);
        {
            let mut state = self.state.borrow_mut();
            state.total_pages = total_pages;
            state.current_page = page;
            state.phase = Phase::Ready;
        }
        *self.document.borrow_mut() = Some(Rc::new(document));

        if let Err(err) = self.render_page(page).await {
            if self.is_current(generation) {
                let document = self.document.borrow_mut().take();
                if let Some(document) = document {
                    document.destroy().await;
                }
                self.fail();
            }
            return Err(err);
        }
        if !self.is_current(generation) {
            return Ok(OpenOutcome::Superseded);
        }
        Ok(OpenOutcome::Opened { page, total_pages })
    }

    fn fail(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.phase = Phase::Failed;
            state.total_pages = 0;
            state.current_page = 1;
        }
        self.surface.resize(0, 0);
    }

    /// Renders page `number` of the current document at the current scale.
    /// Does nothing unless a document is ready. `number` must already be in
    /// range.
    pub async fn render_page(&self, number: u32) -> Result<(), ManagerError> {
        let Some(document) = self.document.borrow().clone() else {
            return Ok(());
        };
        let generation = self.generation.get();
        let scale = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Ready {
                return Ok(());
            }
            state.current_page = number;
            state.scale
        };

        let page = document.page(number).await?;
        if !self.is_current(generation) {
            return Ok(());
        }
        let viewport = page.viewport(scale)?;
        let (width, height) = viewport.pixel_size();
        self.surface.resize(width, height);
        page.render(&self.surface, viewport).await
    }

    pub async fn next_page(&self) -> Result<(), ManagerError> {
        let target = {
            let state = self.state.borrow();
            if state.phase != Phase::Ready || state.current_page >= state.total_pages {
                return Ok(());
            }
            state.current_page + 1
        };
        self.render_page(target).await
    }

    pub async fn prev_page(&self) -> Result<(), ManagerError> {
        let target = {
            let state = self.state.borrow();
            if state.phase != Phase::Ready || state.current_page <= 1 {
                return Ok(());
            }
            state.current_page - 1
        };
        self.render_page(target).await
    }

    pub async fn go_to_page(&self, page: u32) -> Result<(), ManagerError> {
        let target = {
            let state = self.state.borrow();
            if state.phase != Phase::Ready {
                return Ok(());
            }
            clamp_page(page, state.total_pages)
        };
        self.render_page(target).await
    }

    /// Adds `delta` to the scale, clamped, and re-renders the current page
    /// when a document is open.
    pub async fn set_zoom(&self, delta: f64) -> Result<(), ManagerError> {
        if !delta.is_finite() {
            return Ok(());
        }
        let page = {
            let mut state = self.state.borrow_mut();
            state.scale = clamp_scale(state.scale + delta);
            state.current_page
        };
        if self.is_open() {
            self.render_page(page).await
        } else {
            Ok(())
        }
    }

    pub async fn zoom_in(&self) -> Result<(), ManagerError> {
        self.set_zoom(ZOOM_STEP).await
    }

    pub async fn zoom_out(&self) -> Result<(), ManagerError> {
        self.set_zoom(-ZOOM_STEP).await
    }

    /// Destroys the current document and returns to `Empty`. The zoom scale
    /// is kept for the next document.
    pub async fn close(&self) {
        self.next_generation();
        let document = self.document.borrow_mut().take();
        if let Some(document) = document {
            document.destroy().await;
        }
        {
            let mut state = self.state.borrow_mut();
            let scale = state.scale;
            *state = ViewerState {
                scale,
                ..ViewerState::default()
            };
        }
        self.surface.resize(0, 0);
    }
}
