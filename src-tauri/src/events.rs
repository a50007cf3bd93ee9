//! Event names crossing the shell boundary.
//!
//! Inbound events come from the chat page (`notify-show`) and from the
//! popup content templates (`notify-close`, `notify-click`); their
//! payload shapes live in `notify_stack::boundary`. Outbound,
//! `notify-set-contents` carries a serialized notification to one popup
//! and `notify-clicked` tells the main window which conversation to
//! open.

pub const MAIN_WINDOW_LABEL: &str = "main";

/// Label prefix for popup surface windows.
pub const SURFACE_LABEL_PREFIX: &str = "notify-";

// -- Inbound --
pub const NOTIFY_SHOW: &str = "notify-show";
pub const NOTIFY_CLOSE: &str = "notify-close";
pub const NOTIFY_CLICK: &str = "notify-click";
/// Emitted by a popup template once its content finished loading.
pub const NOTIFY_READY: &str = "notify-ready";

// -- Outbound --
pub const NOTIFY_SET_CONTENTS: &str = "notify-set-contents";
pub const NOTIFY_CLICKED: &str = "notify-clicked";
