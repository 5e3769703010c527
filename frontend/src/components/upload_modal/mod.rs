use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::manager::{take_files, Msg, PdfManager};
use crate::staging::{size_label, StagedFile};
use crate::tops_sheet::modal_sheet::ModalSheet;

/// Batch upload dialog: pick PDFs, review them, then send them all at once.
pub fn upload_modal(component: &PdfManager, link: &Scope<PdfManager>) -> Html {
    let staging = component.manager.staging();
    let count = staging.len();
    let busy = component.uploading;

    let on_pick = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Stage(take_files(&input))
    });

    let rows = staging
        .iter()
        .map(|(name, file)| {
            let preview = {
                let name = name.to_string();
                link.callback(move |_: MouseEvent| Msg::PreviewStaged(name.clone()))
            };
            let remove = {
                let name = name.to_string();
                link.callback(move |_: MouseEvent| Msg::Unstage(name.clone()))
            };
            html! {
                <li key={name.to_string()} class="staged-file">
                    <a class="staged-name" title="Open preview" onclick={preview}>{ name }</a>
                    <span class="staged-size">{ size_label(file.size()) }</span>
                    <button class="icon-button" title="Remove" disabled={busy} onclick={remove}>
                        <span class="material-icons">{"close"}</span>
                    </button>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <ModalSheet open={component.upload_open} on_close={link.callback(|_| Msg::CloseUpload)}>
            <div class="upload-modal">
                <h2>{"Upload PDFs"}</h2>
                <input
                    type="file"
                    accept=".pdf,application/pdf"
                    multiple=true
                    disabled={busy}
                    ref={component.staging_input_ref.clone()}
                    onchange={on_pick}
                />
                <div class="staged-count">{ format!("{} file(s) selected", count) }</div>
                <ul class="staged-list">{ rows }</ul>
                {
                    if busy {
                        html! { <div class="upload-progress">{ format!("Uploading {} file(s)...", count) }</div> }
                    } else {
                        html! {}
                    }
                }
                <div class="modal-actions">
                    <button onclick={link.callback(|_| Msg::ClearStaged)} disabled={busy || count == 0}>
                        {"Clear"}
                    </button>
                    <button onclick={link.callback(|_| Msg::CloseUpload)} disabled={busy}>{"Cancel"}</button>
                    <button class="primary" onclick={link.callback(|_| Msg::SubmitUpload)} disabled={busy || count == 0}>
                        {"Upload"}
                    </button>
                </div>
            </div>
        </ModalSheet>
    }
}
