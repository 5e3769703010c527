use web_sys::window;

/// The blocking browser dialogs and page reload used by the action handlers.
pub trait Shell {
    fn alert(&self, message: &str);

    /// `true` when the user accepted.
    fn confirm(&self, message: &str) -> bool;

    fn reload(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserShell;

impl Shell for BrowserShell {
    fn alert(&self, message: &str) {
        if let Some(window) = window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn confirm(&self, message: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn reload(&self) {
        if let Some(window) = window() {
            if let Err(err) = window.location().reload() {
                log::error!("page reload failed: {:?}", err);
            }
        }
    }
}
