//! Wire contract between the presentation side and the manager.
//!
//! Inbound requests arrive as events from the chat page and from the
//! popup content templates; the shell deserializes them into these
//! types and calls into [`NotifyManager`](crate::manager::NotifyManager).
//! Outbound, a surface receives the serialized [`Notification`] itself
//! and the main window receives a [`ClickForward`] after close-all.

use serde::{Deserialize, Serialize};

use crate::notify::{Notification, NotifyOptions};
use crate::surface::SurfaceId;

/// `notify-show`: display a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRequest {
    pub title: String,
    #[serde(default)]
    pub options: NotifyOptions,
}

/// `notify-close`: the popup's close control was used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    pub surface_id: SurfaceId,
    #[serde(default)]
    pub notify: Option<Notification>,
}

/// `notify-click`: the popup body was clicked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    pub surface_id: SurfaceId,
    #[serde(default)]
    pub notify: Option<Notification>,
}

/// Forwarded to the main window after a click closed all popups, so it
/// can bring the matching conversation to the front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickForward {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ClickForward {
    pub fn for_notification(notify: Option<&Notification>) -> Self {
        Self {
            username: notify.and_then(|n| n.options.username.clone()),
        }
    }
}
