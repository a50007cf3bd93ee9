//! Popup surfaces backed by Tauri webview windows.
//!
//! Each surface is a borderless, transparent, always-on-top webview
//! loading the fixed `notification.html` template. Creation resolves
//! once the template emits `notify-ready`; everything after creation is
//! fire-and-forget with platform errors logged and swallowed, matching
//! the core's surface contract.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;
use notify_stack::geometry::{Point, WorkArea};
use notify_stack::{
    Notification, NotifyConfig, NotifyError, Surface, SurfaceHost, SurfaceId,
};
use tauri::{
    AppHandle, Emitter, Listener, PhysicalPosition, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};
use tokio::sync::oneshot;

use crate::events;

struct TauriSurface {
    id: SurfaceId,
    window: WebviewWindow,
}

impl Surface for TauriSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_position(&self, pos: Point) {
        if let Err(e) = self.window.set_position(PhysicalPosition::new(pos.x, pos.y)) {
            tracing::warn!(surface = self.id, error = %e, "Failed to move surface");
        }
    }

    fn show(&self) {
        // The window was built unfocused, so showing it does not steal
        // focus from the foreground window.
        if let Err(e) = self.window.show() {
            tracing::warn!(surface = self.id, error = %e, "Failed to show surface");
        }
        let _ = self.window.set_always_on_top(true);
    }

    fn hide(&self) {
        if let Err(e) = self.window.hide() {
            tracing::warn!(surface = self.id, error = %e, "Failed to hide surface");
        }
    }

    fn destroy(&self) {
        if let Err(e) = self.window.destroy() {
            tracing::warn!(surface = self.id, error = %e, "Failed to destroy surface");
        }
    }

    fn set_contents(&self, notify: &Notification) {
        if let Err(e) = self
            .window
            .emit_to(self.window.label(), events::NOTIFY_SET_CONTENTS, notify)
        {
            tracing::warn!(surface = self.id, error = %e, "Failed to push contents");
        }
    }
}

/// Surface factory over the Tauri window system.
pub struct TauriSurfaceHost {
    app: AppHandle,
    config: NotifyConfig,
    next_id: AtomicU64,
}

impl TauriSurfaceHost {
    pub fn new(app: AppHandle, config: NotifyConfig) -> Self {
        Self {
            app,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    fn build_window(&self, label: &str) -> notify_stack::Result<WebviewWindow> {
        let window = WebviewWindowBuilder::new(
            &self.app,
            label,
            WebviewUrl::App("notification.html".into()),
        )
        .title("Notification")
        .inner_size(
            self.config.surface_width() as f64,
            self.config.surface_height() as f64,
        )
        .decorations(false)
        .resizable(false)
        .transparent(true)
        .always_on_top(true)
        .skip_taskbar(true)
        .visible(false)
        .focused(false)
        .build()
        .map_err(|e| NotifyError::SurfaceCreate(e.to_string()))?;

        if let Err(e) = window.set_visible_on_all_workspaces(true) {
            tracing::warn!(label, error = %e, "Failed to pin surface to all workspaces");
        }
        Ok(window)
    }
}

impl SurfaceHost for TauriSurfaceHost {
    fn create_surface(&self) -> BoxFuture<'_, notify_stack::Result<Arc<dyn Surface>>> {
        Box::pin(async move {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let label = format!("{}{id}", events::SURFACE_LABEL_PREFIX);
            let window = self.build_window(&label)?;

            // Resolve only once the content template has loaded and is
            // listening for contents.
            let (ready_tx, ready_rx) = oneshot::channel();
            window.once(events::NOTIFY_READY, move |_| {
                let _ = ready_tx.send(());
            });
            ready_rx.await.map_err(|_| {
                NotifyError::SurfaceCreate("surface closed before signalling ready".into())
            })?;

            tracing::debug!(label, "Surface created");
            Ok(Arc::new(TauriSurface { id, window }) as Arc<dyn Surface>)
        })
    }

    fn work_area(&self) -> WorkArea {
        match self.app.primary_monitor() {
            Ok(Some(monitor)) => {
                let pos = monitor.position();
                let size = monitor.size();
                WorkArea {
                    x: pos.x,
                    y: pos.y,
                    width: size.width,
                    height: size.height,
                }
            }
            _ => {
                tracing::warn!("Primary monitor unavailable, using fallback work area");
                WorkArea {
                    x: 0,
                    y: 0,
                    width: 1280,
                    height: 720,
                }
            }
        }
    }
}
