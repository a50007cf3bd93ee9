//! Platform seam for popup surfaces.
//!
//! The manager never talks to a window system directly; it drives
//! surfaces through these traits. The shell implements them with Tauri
//! webview windows, tests implement them with in-memory mocks.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::Result;
use crate::geometry::{Point, WorkArea};
use crate::notify::Notification;

/// Stable handle identifying one surface for its whole lifetime.
pub type SurfaceId = u64;

/// One popup window rendering a single notification.
///
/// All operations past construction are expected to succeed; backends
/// log and swallow platform errors rather than propagate them.
pub trait Surface: Send + Sync {
    fn id(&self) -> SurfaceId;

    /// Move the surface to an absolute screen position.
    fn set_position(&self, pos: Point);

    /// Make the surface visible without taking focus from the
    /// foreground window.
    fn show(&self);

    fn hide(&self);

    /// Destroy the underlying window. The surface is unusable afterwards.
    fn destroy(&self);

    /// Push serialized notification content to the surface for rendering.
    fn set_contents(&self, notify: &Notification);
}

/// Constructs surfaces and reports display metrics.
pub trait SurfaceHost: Send + Sync + 'static {
    /// Build a new hidden surface with the fixed popup chrome
    /// (always-on-top, borderless, transparent, no taskbar entry,
    /// visible on all workspaces) and resolve once its content template
    /// has finished loading.
    fn create_surface(&self) -> BoxFuture<'_, Result<Arc<dyn Surface>>>;

    /// Work area of the primary display, queried before every show.
    fn work_area(&self) -> WorkArea;
}
