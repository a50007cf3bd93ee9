//! Tauri side of the notification core: the webview surface backend
//! and the boundary event wiring.

pub mod host;
pub mod ipc;
