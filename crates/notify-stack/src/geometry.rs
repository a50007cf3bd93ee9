//! Slot geometry for the notification stack.
//!
//! Pure functions over the primary display's work area. Both are
//! recomputed on every show so resolution or display changes are
//! picked up without any event plumbing.

use serde::{Deserialize, Serialize};

use crate::config::NotifyConfig;

/// Usable area of a display, excluding taskbars and docks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// An on-screen position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Maximum number of notifications that fit the work area, clamped to
/// the configured upper bound.
pub fn max_visible(work: &WorkArea, config: &NotifyConfig) -> usize {
    let fit = (work.height / config.slot_stride()) as usize;
    fit.min(config.default_max_visible)
}

/// Position of the surface occupying stack slot `slot`.
///
/// Slot 0 sits at the anchored corner; higher slots stack away from the
/// anchored edge.
pub fn slot_position(slot: usize, work: &WorkArea, config: &NotifyConfig) -> Point {
    let offset = (config.slot_stride() as usize * slot) as i32;

    let x = if config.corner.is_left() {
        work.x
    } else {
        work.x + work.width as i32 - config.width as i32 - 2 * config.margin as i32
    };

    let y = if config.corner.is_top() {
        work.y + offset
    } else {
        work.y + work.height as i32 - config.height as i32 - config.margin as i32 - offset
    };

    Point { x, y }
}
