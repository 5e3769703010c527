pub mod manager;
pub mod upload_modal;
