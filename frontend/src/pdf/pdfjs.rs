//! pdf.js bindings.
//!
//! The host page loads pdf.js as a classic script, which exposes the global
//! `pdfjsLib`. Only the handful of calls the manager needs are bound here.

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;

use super::{view_url, PdfDocument, PdfEngine, PdfPage, Surface, Viewport};
use crate::error::{js_error, ManagerError};
use crate::thumbnails::THUMB_BOX;

#[wasm_bindgen]
extern "C" {
    type LoadingTask;

    #[wasm_bindgen(catch, js_namespace = pdfjsLib, js_name = getDocument)]
    fn get_document(src: &str) -> Result<LoadingTask, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &LoadingTask) -> Promise;

    type PdfDocumentProxy;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    fn num_pages(this: &PdfDocumentProxy) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocumentProxy, number: u32) -> Promise;

    #[wasm_bindgen(method)]
    fn destroy(this: &PdfDocumentProxy) -> Promise;

    type PdfPageProxy;

    #[wasm_bindgen(catch, method, js_name = getViewport)]
    fn get_viewport(this: &PdfPageProxy, params: &Object) -> Result<PageViewport, JsValue>;

    #[wasm_bindgen(catch, method)]
    fn render(this: &PdfPageProxy, params: &Object) -> Result<RenderTask, JsValue>;

    type PageViewport;

    #[wasm_bindgen(method, getter)]
    fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    fn height(this: &PageViewport) -> f64;

    type RenderTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &RenderTask) -> Promise;
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), ManagerError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfJsEngine;

impl PdfEngine for PdfJsEngine {
    type Surface = CanvasSurface;
    type Document = PdfJsDocument;

    async fn open(&self, file_id: &str) -> Result<PdfJsDocument, ManagerError> {
        let url = view_url(file_id, js_sys::Date::now() as u64);
        let task = get_document(&url).map_err(js_error)?;
        let proxy = JsFuture::from(task.promise()).await.map_err(js_error)?;
        Ok(PdfJsDocument {
            proxy: proxy.unchecked_into(),
        })
    }
}

pub struct PdfJsDocument {
    proxy: PdfDocumentProxy,
}

impl PdfDocument for PdfJsDocument {
    type Surface = CanvasSurface;
    type Page = PdfJsPage;

    fn page_count(&self) -> u32 {
        self.proxy.num_pages()
    }

    async fn page(&self, number: u32) -> Result<PdfJsPage, ManagerError> {
        let page = JsFuture::from(self.proxy.get_page(number))
            .await
            .map_err(js_error)?;
        Ok(PdfJsPage {
            proxy: page.unchecked_into(),
        })
    }

    async fn destroy(&self) {
        if let Err(err) = JsFuture::from(self.proxy.destroy()).await {
            log::debug!("document destroy failed: {}", js_error(err));
        }
    }
}

pub struct PdfJsPage {
    proxy: PdfPageProxy,
}

impl PdfJsPage {
    fn js_viewport(&self, scale: f64) -> Result<PageViewport, ManagerError> {
        let params = Object::new();
        set(&params, "scale", &JsValue::from_f64(scale))?;
        self.proxy.get_viewport(&params).map_err(js_error)
    }
}

impl PdfPage for PdfJsPage {
    type Surface = CanvasSurface;

    fn viewport(&self, scale: f64) -> Result<Viewport, ManagerError> {
        let viewport = self.js_viewport(scale)?;
        Ok(Viewport {
            scale,
            width: viewport.width(),
            height: viewport.height(),
        })
    }

    async fn render(&self, surface: &CanvasSurface, viewport: Viewport) -> Result<(), ManagerError> {
        let context = surface
            .context()
            .ok_or_else(|| ManagerError::Render("canvas is not mounted".to_string()))?;
        let params = Object::new();
        set(&params, "canvasContext", &context)?;
        let viewport: JsValue = self.js_viewport(viewport.scale)?.into();
        set(&params, "viewport", &viewport)?;
        let task = self.proxy.render(&params).map_err(js_error)?;
        JsFuture::from(task.promise()).await.map_err(js_error)?;
        Ok(())
    }
}

/// A `<canvas>` owned by a yew component, resolved lazily through its
/// `NodeRef`. Every operation is a no-op while the canvas is not mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasSurface {
    node: NodeRef,
}

impl CanvasSurface {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }

    fn canvas(&self) -> Option<HtmlCanvasElement> {
        self.node.cast::<HtmlCanvasElement>()
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.canvas()?
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()
    }

    /// Current size, or the thumbnail box while the canvas has never been sized.
    fn extent(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let width = if canvas.width() == 0 { THUMB_BOX.width } else { canvas.width() as f64 };
        let height = if canvas.height() == 0 { THUMB_BOX.height } else { canvas.height() as f64 };
        (width, height)
    }
}

impl Surface for CanvasSurface {
    fn resize(&self, width: u32, height: u32) {
        if let Some(canvas) = self.canvas() {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }

    fn clear(&self) {
        if let (Some(canvas), Some(context)) = (self.canvas(), self.context()) {
            let (width, height) = Self::extent(&canvas);
            context.clear_rect(0.0, 0.0, width, height);
        }
    }

    fn paint_placeholder(&self, text: &str) {
        let (Some(canvas), Some(context)) = (self.canvas(), self.context()) else {
            return;
        };
        let (width, height) = Self::extent(&canvas);
        context.clear_rect(0.0, 0.0, width, height);
        let _ = Reflect::set(
            context.as_ref(),
            &JsValue::from_str("fillStyle"),
            &JsValue::from_str("#f3f3f3"),
        );
        context.fill_rect(0.0, 0.0, width, height);
        let _ = Reflect::set(
            context.as_ref(),
            &JsValue::from_str("fillStyle"),
            &JsValue::from_str("#666"),
        );
        context.set_font("12px sans-serif");
        let _ = context.fill_text(text, 6.0, 20.0);
    }
}
