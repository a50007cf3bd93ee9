use std::sync::Arc;

use notify_stack::NotifyManager;

/// Application shared state accessible from Tauri commands and event
/// listeners.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// The notification core; constructed once at startup.
    notify: NotifyManager,
}

impl SharedState {
    pub fn new(notify: NotifyManager) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { notify }),
        }
    }

    pub fn notify(&self) -> &NotifyManager {
        &self.inner.notify
    }
}
