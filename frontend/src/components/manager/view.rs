//! View rendering for the PDF manager page.
//!
//! Three regions: a header with the upload, merge, download and delete-all
//! controls; a sidebar listing the session's files with their thumbnails;
//! and the viewer with its navigation and zoom toolbar. The upload modal is
//! rendered on top when open.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::upload_modal::upload_modal;
use crate::files::MoveDirection;
use crate::viewer::Phase;

use super::helpers::{click_input, take_files};
use super::messages::Msg;
use super::state::PdfManager;

pub fn view(component: &PdfManager, ctx: &Context<PdfManager>) -> Html {
    let link = ctx.link();
    html! {
        <div class="pdf-manager">
            { build_header(component, link) }
            <div class="pdf-manager-body">
                { build_sidebar(component, link) }
                { build_viewer(component, link) }
            </div>
            { upload_modal(component, link) }
        </div>
    }
}

fn build_header(component: &PdfManager, link: &Scope<PdfManager>) -> Html {
    let quick_ref = component.quick_input_ref.clone();
    let on_quick_click = Callback::from(move |_: MouseEvent| click_input(&quick_ref));
    let on_quick_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::QuickUpload(take_files(&input))
    });
    let token = component.config.csrf_token.clone().unwrap_or_default();
    let has_files = !component.manager.files().is_empty();

    html! {
        <header class="pdf-manager-header">
            <button class="icon-button" title="Toggle file list" onclick={link.callback(|_| Msg::ToggleSidebar)}>
                <span class="material-icons">{"menu"}</span>
            </button>
            <h1>{"PDF Manager"}</h1>
            <div class="header-actions">
                <input
                    type="file"
                    accept=".pdf,application/pdf"
                    multiple=true
                    style="display:none;"
                    ref={component.quick_input_ref.clone()}
                    onchange={on_quick_change}
                />
                <button onclick={on_quick_click} disabled={component.uploading}>{"Quick upload"}</button>
                <button onclick={link.callback(|_| Msg::OpenUpload)} disabled={component.uploading}>
                    {"Upload..."}
                </button>
                <form method="post" action="/merge" class="inline-form">
                    <input type="hidden" name="csrf_token" value={token} />
                    <button type="submit" disabled={!has_files}>{"Merge"}</button>
                </form>
                <a class="button-link" href="/download">{"Download"}</a>
                <button
                    class="danger"
                    onclick={link.callback(|_| Msg::DeleteAll)}
                    disabled={component.delete_all_busy}
                >
                    { if component.delete_all_busy { "Deleting..." } else { "Delete all" } }
                </button>
            </div>
        </header>
    }
}

fn build_sidebar(component: &PdfManager, link: &Scope<PdfManager>) -> Html {
    let files = component.manager.files();
    let total = files.len();
    let entries = files
        .entries()
        .iter()
        .enumerate()
        .map(|(index, file)| build_entry(component, link, file, index, total, files.is_active(file)))
        .collect::<Html>();

    html! {
        <aside class={classes!(
            "sidebar",
            component.sidebar_collapsed.then_some("collapsed"),
            component.sidebar_shown.then_some("show"),
        )}>
            {
                if total == 0 {
                    html! { <div class="sidebar-empty">{"No files yet. Upload a PDF to start."}</div> }
                } else {
                    entries
                }
            }
        </aside>
    }
}

fn build_entry(
    component: &PdfManager,
    link: &Scope<PdfManager>,
    file: &str,
    index: usize,
    total: usize,
    active: bool,
) -> Html {
    let refs = component.entry_refs(file);
    let rotated = component.manager.session().rotated_pages(file);
    let on_open = {
        let file = file.to_string();
        link.callback(move |_: MouseEvent| Msg::Open(file.clone()))
    };

    html! {
        <div
            key={file.to_string()}
            class={classes!("file-entry", active.then_some("active"))}
            ref={refs.entry}
            onclick={on_open}
        >
            <canvas class="thumb" ref={refs.canvas}></canvas>
            <div class="file-name" title={file.to_string()}>
                { file }
                {
                    if rotated > 0 {
                        html! { <span class="rotated-marker" title="Pages rotated">{ format!(" ↻{}", rotated) }</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <div class="entry-actions">
                { entry_button(link, "arrow_upward", "Move up", index == 0, file, |f| Msg::Move(f, MoveDirection::Up)) }
                { entry_button(link, "arrow_downward", "Move down", index + 1 == total, file, |f| Msg::Move(f, MoveDirection::Down)) }
                { entry_button(link, "restore", "Restore original", rotated == 0, file, Msg::Reset) }
                { entry_button(link, "delete", "Remove", false, file, Msg::Delete) }
            </div>
        </div>
    }
}

/// A small icon button inside an entry. The click does not reach the entry,
/// so it never opens the file.
fn entry_button(
    link: &Scope<PdfManager>,
    icon: &'static str,
    title: &'static str,
    disabled: bool,
    file: &str,
    to_msg: impl Fn(String) -> Msg + 'static,
) -> Html {
    let file = file.to_string();
    let onclick = link.callback(move |e: MouseEvent| {
        e.stop_propagation();
        to_msg(file.clone())
    });
    html! {
        <button class="icon-button" {title} {disabled} {onclick}>
            <span class="material-icons">{ icon }</span>
        </button>
    }
}

fn build_viewer(component: &PdfManager, link: &Scope<PdfManager>) -> Html {
    let state = component.manager.viewer().state();
    let ready = state.phase == Phase::Ready;
    let on_page_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::GoToPage(input.value())
    });

    html! {
        <main class="viewer">
            <div class="viewer-toolbar">
                <button onclick={link.callback(|_| Msg::PrevPage)} disabled={!ready || state.current_page <= 1}>
                    {"‹ Prev"}
                </button>
                <input
                    class="page-input"
                    type="number"
                    min="1"
                    max={state.total_pages.max(1).to_string()}
                    value={state.current_page.to_string()}
                    disabled={!ready}
                    onchange={on_page_change}
                />
                <span class="page-indicator">{ state.page_indicator() }</span>
                <button
                    onclick={link.callback(|_| Msg::NextPage)}
                    disabled={!ready || state.current_page >= state.total_pages}
                >
                    {"Next ›"}
                </button>
                <span class="separator" />
                <button onclick={link.callback(|_| Msg::ZoomOut)}>{"−"}</button>
                <span class="zoom-indicator">{ state.zoom_indicator() }</span>
                <button onclick={link.callback(|_| Msg::ZoomIn)}>{"+"}</button>
                <span class="separator" />
                <button
                    onclick={link.callback(|_| Msg::Rotate)}
                    disabled={!ready || component.rotating || component.manager.is_rotating()}
                    title="Rotate the current page clockwise"
                >
                    { if component.rotating { "Rotating..." } else { "Rotate ↻" } }
                </button>
                {
                    match &component.feedback {
                        Some(text) => html! { <span class="feedback">{ text.clone() }</span> },
                        None => html! {},
                    }
                }
            </div>
            <div class={classes!("viewer-stage", (state.phase == Phase::Loading).then_some("loading"))}>
                <canvas ref={component.viewer_ref.clone()}></canvas>
                {
                    match state.placeholder() {
                        Some(text) => html! { <div class="viewer-placeholder">{ text }</div> },
                        None => html! {},
                    }
                }
            </div>
        </main>
    }
}
