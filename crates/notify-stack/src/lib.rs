//! Popup notification core for the webchat desktop shell.
//!
//! Owns the pool of reusable popup surfaces, the single-flight action
//! queue that serializes show/close transitions, the overflow queue for
//! notifications beyond screen capacity, and the slot geometry. The
//! windowing backend plugs in through the [`Surface`]/[`SurfaceHost`]
//! traits; everything else is platform independent.

pub mod boundary;
pub mod config;
pub mod geometry;
pub mod manager;
pub mod notify;
mod pool;
pub mod surface;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{Corner, NotifyConfig};
pub use geometry::{Point, WorkArea};
pub use manager::NotifyManager;
pub use notify::{Notification, NotifyId, NotifyOptions};
pub use surface::{Surface, SurfaceHost, SurfaceId};

/// Errors that can occur in the notification core.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid corner index {0} (expected 0..=3)")]
    InvalidCorner(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Surface creation failed: {0}")]
    SurfaceCreate(String),

    #[error("Surface creation timed out after {0} ms")]
    CreateTimeout(u64),

    #[error("Notification queue is full")]
    QueueFull,

    #[error("Notification manager is shut down")]
    QueueClosed,
}

/// Result type alias for notification core operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
