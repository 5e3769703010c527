use crate::files::MoveDirection;

pub enum Msg {
    /// An async viewer or list operation finished; re-render from the manager.
    Refresh,

    Open(String),
    NextPage,
    PrevPage,
    GoToPage(String),
    ZoomIn,
    ZoomOut,

    Delete(String),
    Deleted(String),
    DeleteAll,
    DeleteAllDone,

    Rotate,
    RotateDone(Option<u32>),
    RefreshThumbnail(String),
    ClearFeedback(u64),

    Reset(String),
    Move(String, MoveDirection),

    QuickUpload(Vec<web_sys::File>),
    OpenUpload,
    CloseUpload,
    Stage(Vec<web_sys::File>),
    Unstage(String),
    ClearStaged,
    PreviewStaged(String),
    SubmitUpload,
    UploadDone,

    ToggleSidebar,
}
