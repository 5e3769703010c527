//! User-triggered operations that change backend state.
//!
//! Each handler reports its own failures to the user through the shell and
//! also returns them, so the component can restore its controls. Input
//! problems are caught before any request is sent. Nothing is retried.

use common::requests::{
    DeleteAllRequest, DeleteRequest, ReorderRequest, RotateDirection, RotateRequest,
};
use common::responses::ApiStatus;
use serde::Serialize;

use crate::error::{ManagerError, ValidationError};
use crate::files::MoveDirection;
use crate::manager::{BusyFlag, Manager};
use crate::pdf::PdfEngine;
use crate::shell::Shell;
use crate::staging::{validate_quick_batch, StagedFile};
use crate::transport::{
    reset_url, ApiReply, Body, Method, Transport, DELETE_ALL_URL, DELETE_URL, REORDER_URL,
    ROTATE_URL, UPLOAD_URL,
};
use crate::viewer::OpenOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted { was_open: bool },
}

/// Result of the actions whose success path reloads the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Cancelled,
    Reloaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotateOutcome {
    /// A rotation was already running; the click was ignored.
    Busy,
    Rotated { file: String, page: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Cancelled,
    Reset { was_open: bool },
}

fn is_ok(status: ApiStatus) -> bool {
    status == ApiStatus::Ok
}

impl<T, S, E> Manager<T, S, E>
where
    T: Transport,
    T::File: StagedFile + Clone,
    S: Shell,
    E: PdfEngine,
{
    async fn post_json<P: Serialize>(&self, url: &str, payload: &P) -> Result<ApiReply, ManagerError> {
        let body = Body::json(payload)?;
        self.transport.send(url, Method::Post, Some(body)).await
    }

    async fn upload(&self, files: Vec<T::File>) -> Result<ApiReply, ManagerError> {
        self.transport
            .send(UPLOAD_URL, Method::Post, Some(Body::upload(files)))
            .await?
            .require(is_ok)
    }

    fn report(&self, context: &str, err: ManagerError) -> ManagerError {
        log::error!("{}: {}", context, err);
        self.shell.alert(&err.user_message(context));
        err
    }

    /// Marks `file` active and opens it in the viewer. A failed load only
    /// shows the viewer placeholder.
    pub async fn open_file(&self, file: &str, page: u32) -> Result<OpenOutcome, ManagerError> {
        self.files.borrow_mut().mark_active(Some(file));
        let result = self.viewer.open(file, page).await;
        if let Err(err) = &result {
            log::error!("loading {} failed: {}", file, err);
        }
        result
    }

    /// Opens the first document of the list, if there is one.
    pub async fn open_first(&self) -> Option<Result<OpenOutcome, ManagerError>> {
        let first = self.files.borrow().first().map(str::to_string)?;
        Some(self.open_file(&first, 1).await)
    }

    pub async fn delete_file(&self, file: &str) -> Result<DeleteOutcome, ManagerError> {
        let question = format!("Remove {} from the list? The original upload is kept.", file);
        if !self.shell.confirm(&question) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let request = DeleteRequest {
            filename: file.to_string(),
        };
        if let Err(err) = self
            .post_json(DELETE_URL, &request)
            .await
            .and_then(|reply| reply.require(is_ok))
        {
            return Err(self.report("Delete failed", err));
        }

        let order = {
            let mut files = self.files.borrow_mut();
            files.remove(file);
            files.entries().to_vec()
        };
        {
            let mut session = self.session.borrow_mut();
            session.order = order;
            session.files.remove(file);
        }
        let was_open = self.viewer.current_file().as_deref() == Some(file);
        if was_open {
            self.viewer.close().await;
        }
        log::info!("removed {} from the session", file);
        Ok(DeleteOutcome::Deleted { was_open })
    }

    /// Deletes every document and reloads. A partial deletion still reloads,
    /// since the session itself was reset.
    pub async fn delete_all(&self) -> Result<ReloadOutcome, ManagerError> {
        if !self
            .shell
            .confirm("Delete ALL PDFs and start a new session? This cannot be undone.")
        {
            return Ok(ReloadOutcome::Cancelled);
        }

        match self
            .post_json(DELETE_ALL_URL, &DeleteAllRequest::default())
            .await
            .and_then(|reply| reply.require(ApiStatus::is_success))
        {
            Ok(reply) => {
                if reply.status() == Some(ApiStatus::Partial) {
                    log::warn!("delete-all left files behind: {}", reply.error_text());
                }
                self.shell.reload();
                Ok(ReloadOutcome::Reloaded)
            }
            Err(err) => Err(self.report("Delete all failed", err)),
        }
    }

    /// Rotates the page on screen a quarter turn clockwise.
    ///
    /// `on_rotated` runs once the server confirms, before the viewer reopens
    /// the file; the component uses it to refresh the file's thumbnail. The
    /// busy flag is held until the reopen has finished, whatever happens.
    pub async fn rotate_current(
        &self,
        on_rotated: impl FnOnce(&str),
    ) -> Result<RotateOutcome, ManagerError> {
        if self.rotate_busy.get() {
            return Ok(RotateOutcome::Busy);
        }
        let state = self.viewer.state();
        let file = match state.current_file {
            Some(file) if self.viewer.is_open() => file,
            _ => return Err(self.report("Rotate failed", ValidationError::NoOpenDocument.into())),
        };
        let _busy = BusyFlag::raise(&self.rotate_busy);

        let page_index = state.current_page - 1;
        let request = RotateRequest {
            filename: file.clone(),
            page: page_index,
            direction: RotateDirection::Right,
        };
        let reply = match self
            .post_json(ROTATE_URL, &request)
            .await
            .and_then(|reply| reply.require(is_ok))
        {
            Ok(reply) => reply,
            Err(err) => return Err(self.report("Rotate failed", err)),
        };
        self.record_rotation(&file, page_index, &reply);

        on_rotated(&file);
        // Another file may have been opened while the request was pending.
        if self.viewer.current_file().as_deref() == Some(file.as_str()) {
            if let Err(err) = self.viewer.open(&file, page_index + 1).await {
                log::error!("reopening {} after rotation failed: {}", file, err);
            }
        }
        Ok(RotateOutcome::Rotated {
            file,
            page: page_index + 1,
        })
    }

    fn record_rotation(&self, file: &str, page_index: u32, reply: &ApiReply) {
        let ApiReply::Json(body) = reply else {
            return;
        };
        if let Some(degrees) = body.get("rotation").and_then(|r| r.as_u64()) {
            self.session
                .borrow_mut()
                .files
                .entry(file.to_string())
                .or_default()
                .rotations
                .insert(page_index.to_string(), (degrees % 360) as u16);
        }
    }

    /// Adds picked files to the upload staging set. Returns how many were new.
    pub fn stage_files(&self, files: Vec<T::File>) -> usize {
        let added = self.staging.borrow_mut().add(files);
        log::debug!("staged {} new file(s): {:?}", added, self.staging.borrow().names());
        added
    }

    pub fn unstage_file(&self, name: &str) {
        self.staging.borrow_mut().remove(name);
    }

    pub fn clear_staging(&self) {
        self.staging.borrow_mut().clear();
    }

    /// Sends the whole staging set as one multipart request and reloads.
    /// On failure the set is kept so the user can try again.
    pub async fn submit_staged(&self) -> Result<ReloadOutcome, ManagerError> {
        let files = self.staging.borrow().files();
        if files.is_empty() {
            return Err(self.report("Upload error", ValidationError::EmptySelection.into()));
        }
        let question = format!("Upload {} file(s) to the server?", files.len());
        if !self.shell.confirm(&question) {
            return Ok(ReloadOutcome::Cancelled);
        }

        match self.upload(files).await {
            Ok(_) => {
                self.staging.borrow_mut().clear();
                self.shell.reload();
                Ok(ReloadOutcome::Reloaded)
            }
            Err(err) => Err(self.report("Upload error", err)),
        }
    }

    /// Uploads the header picker's selection right away. Every file has to be
    /// a PDF or nothing is sent.
    pub async fn quick_upload(&self, files: Vec<T::File>) -> Result<ReloadOutcome, ManagerError> {
        if files.is_empty() {
            return Ok(ReloadOutcome::Cancelled);
        }
        if let Err(err) = validate_quick_batch(&files) {
            return Err(self.report("Upload error", err.into()));
        }
        let question = format!("Upload {} selected file(s) now?", files.len());
        if !self.shell.confirm(&question) {
            return Ok(ReloadOutcome::Cancelled);
        }

        match self.upload(files).await {
            Ok(_) => {
                self.shell.reload();
                Ok(ReloadOutcome::Reloaded)
            }
            Err(err) => Err(self.report("Upload error", err)),
        }
    }

    /// Restores `file` to the uploaded original, dropping its rotations. An
    /// open viewer reloads it at the same page.
    pub async fn reset_file(&self, file: &str) -> Result<ResetOutcome, ManagerError> {
        let question = format!("Restore {} to its original pages?", file);
        if !self.shell.confirm(&question) {
            return Ok(ResetOutcome::Cancelled);
        }

        if let Err(err) = self
            .transport
            .send(&reset_url(file), Method::Post, None)
            .await
            .and_then(|reply| reply.require(is_ok))
        {
            return Err(self.report("Reset failed", err));
        }
        self.session.borrow_mut().files.remove(file);

        let state = self.viewer.state();
        let was_open = state.current_file.as_deref() == Some(file);
        if was_open {
            if let Err(err) = self.viewer.open(file, state.current_page).await {
                log::error!("reopening {} after reset failed: {}", file, err);
            }
        }
        Ok(ResetOutcome::Reset { was_open })
    }

    /// Moves `file` one place and saves the new order. The local order is
    /// restored if the server rejects it.
    pub async fn move_file(&self, file: &str, direction: MoveDirection) -> Result<bool, ManagerError> {
        let previous = self.files.borrow().entries().to_vec();
        if !self.files.borrow_mut().move_entry(file, direction) {
            return Ok(false);
        }
        let request = ReorderRequest {
            order: self.files.borrow().entries().to_vec(),
        };

        match self
            .post_json(REORDER_URL, &request)
            .await
            .and_then(|reply| reply.require(is_ok))
        {
            Ok(_) => {
                self.session.borrow_mut().order = request.order;
                Ok(true)
            }
            Err(err) => {
                self.files.borrow_mut().restore(previous);
                Err(self.report("Reorder failed", err))
            }
        }
    }
}
