//! Terminal chat client for CodeReview.
//!
//! Exposes the ratatui screen and the state behind `codereview chat`.

pub mod app;
pub mod client;
pub mod clipboard;
pub mod input;
pub mod markdown_view;
pub mod render;
pub mod runtime;
pub mod theme;
pub mod upload;

pub use app::{AppState, Command, FALLBACK_REPLY};
pub use client::{ClientError, RelayClient};
pub use input::handle_key_event;
pub use render::draw_ui;
pub use runtime::run_chat;
pub use upload::{read_upload, UploadError, UploadedFile};
