//! DOM helpers for the manager component: scrolling, file inputs, object URL
//! previews and viewport checks.

use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{
    Element, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Url,
};
use yew::platform::spawn_local;
use yew::NodeRef;

/// How long an object URL opened for a staged file stays valid.
pub const PREVIEW_URL_LIFETIME_MS: u32 = 30_000;

/// Below this width the sidebar overlays the viewer instead of sitting next
/// to it.
pub const NARROW_VIEWPORT_PX: f64 = 900.0;

fn supports_smooth_scroll() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|root| Reflect::get(&root, &JsValue::from_str("style")).ok())
        .map(|style| Reflect::has(&style, &JsValue::from_str("scrollBehavior")).unwrap_or(false))
        .unwrap_or(false)
}

/// Scrolls `node` to the middle of its scroll container, smoothly when the
/// browser can.
pub fn scroll_into_view(node: &NodeRef) {
    let Some(element) = node.cast::<Element>() else {
        return;
    };
    if supports_smooth_scroll() {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    } else {
        element.scroll_into_view();
    }
}

/// Takes the files out of a file input and resets it, so picking the same
/// file again fires another change event.
pub fn take_files(input: &HtmlInputElement) -> Vec<web_sys::File> {
    let files = match input.files() {
        Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
        None => Vec::new(),
    };
    input.set_value("");
    files
}

pub fn click_input(node: &NodeRef) {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        input.click();
    }
}

/// Opens `file` in a new tab through a temporary object URL.
pub fn open_preview(file: &web_sys::File) {
    let url = match Url::create_object_url_with_blob(file) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("could not create preview URL: {:?}", err);
            return;
        }
    };
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
            log::warn!("could not open preview: {:?}", err);
        }
    }
    spawn_local(async move {
        TimeoutFuture::new(PREVIEW_URL_LIFETIME_MS).await;
        let _ = Url::revoke_object_url(&url);
    });
}

pub fn is_narrow_viewport() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width < NARROW_VIEWPORT_PX)
        .unwrap_or(false)
}
