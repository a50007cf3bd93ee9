//! Fixed startup configuration for the notification manager.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{NotifyError, Result};

/// Screen corner a notification stack is anchored to.
///
/// The numeric form matches the original wire contract
/// (0 top-left, 1 top-right, 2 bottom-right, 3 bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Parse a corner from its numeric index, rejecting out-of-range values.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Self::TopLeft),
            1 => Ok(Self::TopRight),
            2 => Ok(Self::BottomRight),
            3 => Ok(Self::BottomLeft),
            other => Err(NotifyError::InvalidCorner(other)),
        }
    }

    /// Whether the stack grows downward from the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Whether the stack hugs the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }
}

impl TryFrom<u8> for Corner {
    type Error = NotifyError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_index(value)
    }
}

impl From<Corner> for u8 {
    fn from(corner: Corner) -> u8 {
        match corner {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }
}

/// Notification manager configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Content width in pixels.
    pub width: u32,
    /// Content height in pixels.
    pub height: u32,
    /// Margin around the content (leaves room for the shadow).
    pub margin: u32,
    /// Corner the stack is anchored to.
    pub corner: Corner,
    /// How long a notification stays visible.
    pub notify_duration: Duration,
    /// How long an inactive surface is kept before disposal.
    pub garbage_duration: Duration,
    /// Upper bound on simultaneously visible notifications.
    pub default_max_visible: usize,
    /// Upper bound on surface construction time; a show action that
    /// exceeds it fails alone instead of stalling the queue.
    pub create_timeout: Duration,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 80,
            margin: 10,
            corner: Corner::TopRight,
            notify_duration: Duration::from_millis(10_000),
            garbage_duration: Duration::from_millis(10_000),
            default_max_visible: 5,
            create_timeout: Duration::from_millis(10_000),
        }
    }
}

impl NotifyConfig {
    /// Reject configurations the geometry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(NotifyError::InvalidConfig(
                "notification width and height must be non-zero",
            ));
        }
        if self.notify_duration.is_zero() || self.garbage_duration.is_zero() {
            return Err(NotifyError::InvalidConfig(
                "notify and garbage durations must be non-zero",
            ));
        }
        if self.create_timeout.is_zero() {
            return Err(NotifyError::InvalidConfig(
                "surface creation timeout must be non-zero",
            ));
        }
        Ok(())
    }

    /// Outer surface width (content plus margins).
    pub fn surface_width(&self) -> u32 {
        self.width + 2 * self.margin
    }

    /// Outer surface height (content plus margins).
    pub fn surface_height(&self) -> u32 {
        self.height + 2 * self.margin
    }

    /// Vertical distance between consecutive stack slots.
    pub fn slot_stride(&self) -> u32 {
        self.height + self.margin
    }
}
