//! Update function for the PDF manager component.
//!
//! Every message that talks to the backend or to pdf.js spawns a task on the
//! shared `BrowserManager` and reports back with a follow-up message. Failures
//! were already alerted by the manager, so the follow-ups only restore
//! controls and re-render.

use std::future::Future;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::actions::{DeleteOutcome, ReloadOutcome, ResetOutcome, RotateOutcome};
use crate::manager::BrowserManager;
use crate::pdf::pdfjs::CanvasSurface;
use crate::thumbnails::{render_thumbnail, THUMB_BOX};
use crate::viewer::parse_page_input;

use super::helpers::{is_narrow_viewport, open_preview};
use super::messages::Msg;
use super::state::{PdfManager, FEEDBACK_MS};

fn spawn_task<F, Fut>(component: &PdfManager, ctx: &Context<PdfManager>, task: F)
where
    F: FnOnce(Rc<BrowserManager>, Scope<PdfManager>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_local(task(component.manager.clone(), ctx.link().clone()));
}

/// Runs a viewer operation and re-renders once it has finished.
fn spawn_viewer_op<F, Fut>(component: &PdfManager, ctx: &Context<PdfManager>, op: F)
where
    F: FnOnce(Rc<BrowserManager>) -> Fut + 'static,
    Fut: Future<Output = Result<(), crate::error::ManagerError>> + 'static,
{
    spawn_task(component, ctx, |manager, link| async move {
        if let Err(err) = op(manager).await {
            log::error!("viewer: {}", err);
        }
        link.send_message(Msg::Refresh);
    });
}

pub fn open_first(component: &mut PdfManager, ctx: &Context<PdfManager>) {
    component.scroll_pending = true;
    spawn_task(component, ctx, |manager, link| async move {
        if manager.open_first().await.is_some() {
            link.send_message(Msg::Refresh);
        }
    });
}

pub fn update(component: &mut PdfManager, ctx: &Context<PdfManager>, msg: Msg) -> bool {
    match msg {
        Msg::Refresh => true,

        Msg::Open(file) => {
            component.scroll_pending = true;
            if is_narrow_viewport() {
                component.sidebar_shown = false;
            }
            spawn_task(component, ctx, |manager, link| async move {
                let _ = manager.open_file(&file, 1).await;
                link.send_message(Msg::Refresh);
            });
            false
        }
        Msg::NextPage => {
            spawn_viewer_op(component, ctx, |m| async move { m.viewer().next_page().await });
            false
        }
        Msg::PrevPage => {
            spawn_viewer_op(component, ctx, |m| async move { m.viewer().prev_page().await });
            false
        }
        Msg::GoToPage(raw) => {
            let Some(page) = parse_page_input(&raw) else {
                return true;
            };
            spawn_viewer_op(component, ctx, move |m| async move { m.viewer().go_to_page(page).await });
            false
        }
        Msg::ZoomIn => {
            spawn_viewer_op(component, ctx, |m| async move { m.viewer().zoom_in().await });
            false
        }
        Msg::ZoomOut => {
            spawn_viewer_op(component, ctx, |m| async move { m.viewer().zoom_out().await });
            false
        }

        Msg::Delete(file) => {
            spawn_task(component, ctx, |manager, link| async move {
                match manager.delete_file(&file).await {
                    Ok(DeleteOutcome::Deleted { .. }) => link.send_message(Msg::Deleted(file)),
                    Ok(DeleteOutcome::Cancelled) | Err(_) => {}
                }
            });
            false
        }
        Msg::Deleted(file) => {
            component.entries.remove(&file);
            component.thumbs_dirty = true;
            true
        }
        Msg::DeleteAll => {
            component.delete_all_busy = true;
            spawn_task(component, ctx, |manager, link| async move {
                if !matches!(manager.delete_all().await, Ok(ReloadOutcome::Reloaded)) {
                    link.send_message(Msg::DeleteAllDone);
                }
            });
            true
        }
        Msg::DeleteAllDone => {
            component.delete_all_busy = false;
            true
        }

        Msg::Rotate => {
            if component.rotating {
                return false;
            }
            component.rotating = true;
            spawn_task(component, ctx, |manager, link| async move {
                let refresh = link.clone();
                let outcome = manager
                    .rotate_current(move |file| {
                        refresh.send_message(Msg::RefreshThumbnail(file.to_string()))
                    })
                    .await;
                let page = match outcome {
                    Ok(RotateOutcome::Rotated { page, .. }) => Some(page),
                    Ok(RotateOutcome::Busy) | Err(_) => None,
                };
                link.send_message(Msg::RotateDone(page));
            });
            true
        }
        Msg::RotateDone(page) => {
            component.rotating = false;
            if let Some(page) = page {
                component.feedback = Some(format!("Page {} rotated.", page));
                component.feedback_ticket += 1;
                let ticket = component.feedback_ticket;
                let link = ctx.link().clone();
                spawn_local(async move {
                    TimeoutFuture::new(FEEDBACK_MS).await;
                    link.send_message(Msg::ClearFeedback(ticket));
                });
            }
            true
        }
        Msg::ClearFeedback(ticket) => {
            if ticket != component.feedback_ticket {
                return false;
            }
            component.feedback = None;
            true
        }
        Msg::RefreshThumbnail(file) => {
            let Some(refs) = component.entries.get(&file) else {
                return false;
            };
            let surface = CanvasSurface::new(refs.canvas.clone());
            let engine = component.manager.viewer().engine();
            spawn_local(async move {
                render_thumbnail(engine.as_ref(), &surface, &file, THUMB_BOX).await;
            });
            false
        }

        Msg::Reset(file) => {
            spawn_task(component, ctx, |manager, link| async move {
                if let Ok(ResetOutcome::Reset { .. }) = manager.reset_file(&file).await {
                    link.send_message(Msg::RefreshThumbnail(file));
                    link.send_message(Msg::Refresh);
                }
            });
            false
        }
        Msg::Move(file, direction) => {
            spawn_task(component, ctx, |manager, link| async move {
                let _ = manager.move_file(&file, direction).await;
                link.send_message(Msg::Refresh);
            });
            false
        }

        Msg::QuickUpload(files) => {
            spawn_task(component, ctx, |manager, _| async move {
                let _ = manager.quick_upload(files).await;
            });
            false
        }
        Msg::OpenUpload => {
            component.upload_open = true;
            true
        }
        Msg::CloseUpload => {
            if component.uploading {
                return false;
            }
            component.upload_open = false;
            component.manager.clear_staging();
            true
        }
        Msg::Stage(files) => {
            component.manager.stage_files(files);
            true
        }
        Msg::Unstage(name) => {
            component.manager.unstage_file(&name);
            true
        }
        Msg::ClearStaged => {
            component.manager.clear_staging();
            true
        }
        Msg::PreviewStaged(name) => {
            if let Some(file) = component.manager.staging().get(&name) {
                open_preview(file);
            }
            false
        }
        Msg::SubmitUpload => {
            component.uploading = true;
            spawn_task(component, ctx, |manager, link| async move {
                if !matches!(manager.submit_staged().await, Ok(ReloadOutcome::Reloaded)) {
                    link.send_message(Msg::UploadDone);
                }
            });
            true
        }
        Msg::UploadDone => {
            component.uploading = false;
            true
        }

        Msg::ToggleSidebar => {
            component.sidebar_collapsed = !component.sidebar_collapsed;
            if is_narrow_viewport() {
                component.sidebar_shown = !component.sidebar_shown;
            }
            true
        }
    }
}
