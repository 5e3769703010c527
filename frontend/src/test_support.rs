//! Recording mocks for the engine, surface, transport and shell seams.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{json, Value};

use crate::error::ManagerError;
use crate::pdf::{PdfDocument, PdfEngine, PdfPage, Surface, Viewport};
use crate::shell::Shell;
use crate::staging::StagedFile;
use crate::transport::{ApiReply, Body, Method, Transport};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize(u32, u32),
    Clear,
    Placeholder(String),
    Render { page: u32, width: u32, height: u32 },
}

#[derive(Debug, Default)]
pub struct MockSurface {
    ops: RefCell<Vec<SurfaceOp>>,
}

impl MockSurface {
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.borrow().clone()
    }

    fn record(&self, op: SurfaceOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl Surface for MockSurface {
    fn resize(&self, width: u32, height: u32) {
        self.record(SurfaceOp::Resize(width, height));
    }

    fn clear(&self) {
        self.record(SurfaceOp::Clear);
    }

    fn paint_placeholder(&self, text: &str) {
        self.record(SurfaceOp::Placeholder(text.to_string()));
    }
}

#[derive(Debug, Clone, Copy)]
struct DocumentShape {
    pages: u32,
    size: (f64, f64),
}

/// Engine serving in-memory documents. Unknown names fail to open. Every open
/// and destroy is appended to a shared event log.
#[derive(Default)]
pub struct MockEngine {
    documents: RefCell<HashMap<String, DocumentShape>>,
    failing_render: HashSet<String>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    page_gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    events: Rc<RefCell<Vec<String>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, name: &str, pages: u32, size: (f64, f64)) -> Self {
        self.documents
            .borrow_mut()
            .insert(name.to_string(), DocumentShape { pages, size });
        self
    }

    pub fn failing_render(mut self, name: &str) -> Self {
        self.failing_render.insert(name.to_string());
        self
    }

    /// Makes later opens of `name` fail to decode.
    pub fn forget(&self, name: &str) {
        self.documents.borrow_mut().remove(name);
    }

    /// Holds the next open of `name` until the returned sender fires.
    pub fn gate(&self, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(name.to_string(), rx);
        tx
    }

    /// Holds the first page fetch from the next opened copy of `name` until
    /// the returned sender fires.
    pub fn gate_page(&self, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.page_gates.borrow_mut().insert(name.to_string(), rx);
        tx
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.events_with("open ")
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.events_with("destroy ")
    }

    fn events_with(&self, prefix: &str) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| e.strip_prefix(prefix).map(str::to_string))
            .collect()
    }
}

impl PdfEngine for MockEngine {
    type Surface = MockSurface;
    type Document = MockDocument;

    async fn open(&self, file_id: &str) -> Result<MockDocument, ManagerError> {
        self.events.borrow_mut().push(format!("open {}", file_id));
        let gate = self.gates.borrow_mut().remove(file_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let shape = self.documents.borrow().get(file_id).copied();
        match shape {
            Some(shape) => Ok(MockDocument {
                name: file_id.to_string(),
                shape,
                page_gate: RefCell::new(self.page_gates.borrow_mut().remove(file_id)),
                failing_render: self.failing_render.contains(file_id),
                events: self.events.clone(),
            }),
            None => Err(ManagerError::Render(format!("cannot decode {}", file_id))),
        }
    }
}

pub struct MockDocument {
    name: String,
    shape: DocumentShape,
    page_gate: RefCell<Option<oneshot::Receiver<()>>>,
    failing_render: bool,
    events: Rc<RefCell<Vec<String>>>,
}

impl PdfDocument for MockDocument {
    type Surface = MockSurface;
    type Page = MockPage;

    fn page_count(&self) -> u32 {
        self.shape.pages
    }

    async fn page(&self, number: u32) -> Result<MockPage, ManagerError> {
        let gate = self.page_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if number == 0 || number > self.shape.pages {
            return Err(ManagerError::Render(format!("no page {}", number)));
        }
        Ok(MockPage {
            number,
            size: self.shape.size,
            failing_render: self.failing_render,
        })
    }

    async fn destroy(&self) {
        self.events.borrow_mut().push(format!("destroy {}", self.name));
    }
}

pub struct MockPage {
    number: u32,
    size: (f64, f64),
    failing_render: bool,
}

impl PdfPage for MockPage {
    type Surface = MockSurface;

    fn viewport(&self, scale: f64) -> Result<Viewport, ManagerError> {
        Ok(Viewport {
            scale,
            width: self.size.0 * scale,
            height: self.size.1 * scale,
        })
    }

    async fn render(&self, surface: &MockSurface, viewport: Viewport) -> Result<(), ManagerError> {
        if self.failing_render {
            return Err(ManagerError::Render("rasterizer crashed".to_string()));
        }
        let (width, height) = viewport.pixel_size();
        surface.record(SurfaceOp::Render {
            page: self.number,
            width,
            height,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeFile {
    pub name: String,
    pub size: f64,
}

impl FakeFile {
    pub fn new(name: &str, size: f64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl StagedFile for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> f64 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub url: String,
    pub method: Method,
    pub json: Option<Value>,
    pub files: Vec<String>,
}

/// Transport answering from a queue of canned replies. An empty queue
/// answers `{"status": "ok"}`.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<ApiReply, ManagerError>>>,
    sent: RefCell<Vec<SentRequest>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(ApiReply::Json(body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ManagerError::Transport(message.to_string())));
        self
    }

    /// Holds the next request until the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for MockTransport {
    type File = FakeFile;

    async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<Body<FakeFile>>,
    ) -> Result<ApiReply, ManagerError> {
        let (json, files) = match body {
            Some(Body::Json(value)) => (Some(value), Vec::new()),
            Some(Body::Form { files, .. }) => (None, files.into_iter().map(|f| f.name).collect()),
            None => (None, Vec::new()),
        };
        self.sent.borrow_mut().push(SentRequest {
            url: url.to_string(),
            method,
            json,
            files,
        });
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let reply = self.replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Ok(ApiReply::Json(json!({ "status": "ok" }))))
    }
}

/// Shell that answers every confirm with a fixed choice.
pub struct MockShell {
    accept: Cell<bool>,
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    reloads: Cell<u32>,
}

impl Default for MockShell {
    fn default() -> Self {
        Self {
            accept: Cell::new(true),
            alerts: RefCell::new(Vec::new()),
            confirms: RefCell::new(Vec::new()),
            reloads: Cell::new(0),
        }
    }
}

impl MockShell {
    pub fn declining() -> Self {
        let shell = Self::default();
        shell.accept.set(false);
        shell
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn reloads(&self) -> u32 {
        self.reloads.get()
    }
}

impl Shell for MockShell {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.accept.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}
