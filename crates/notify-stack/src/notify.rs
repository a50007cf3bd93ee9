//! Notification entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monotonic notification id, unique for the process lifetime.
pub type NotifyId = u64;

/// Renderable notification options.
///
/// Only the fields the content template knows about are typed; anything
/// else the chat client attaches rides along in `extra` and survives the
/// round trip to the surface untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Conversation the notification belongs to; forwarded to the main
    /// window on click.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single notification, immutable once created.
///
/// Referenced by exactly one surface while visible and dropped when that
/// surface goes inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotifyId,
    pub title: String,
    pub options: NotifyOptions,
}

impl Notification {
    pub fn new(id: NotifyId, title: impl Into<String>, options: NotifyOptions) -> Self {
        Self {
            id,
            title: title.into(),
            options,
        }
    }
}
