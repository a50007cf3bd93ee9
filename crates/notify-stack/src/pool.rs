//! Surface pool bookkeeping.
//!
//! Owns every surface the manager ever created, split into the active
//! stack (visible, in stacking order) and the inactive list (hidden,
//! awaiting reuse or disposal). The per-surface extension state lives
//! inside [`Slot`], so a surface and its timers/flags can never drift
//! apart. All mutation happens from the manager's worker task.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::notify::Notification;
use crate::surface::{Surface, SurfaceId};

/// A pooled surface together with its lifecycle state.
pub(crate) struct Slot {
    pub surface: Arc<dyn Surface>,
    /// Present exactly while the slot is active.
    pub notify: Option<Notification>,
    /// Running while the slot is active; fires a close request.
    pub duration_timer: Option<JoinHandle<()>>,
    /// Running while the slot is inactive; fires a dispose action.
    pub garbage_timer: Option<JoinHandle<()>>,
    /// Set once a close has been requested, cleared on park/reuse.
    pub pending_close: bool,
}

impl Slot {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            surface,
            notify: None,
            duration_timer: None,
            garbage_timer: None,
            pending_close: false,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn abort_timers(&mut self) {
        if let Some(timer) = self.duration_timer.take() {
            timer.abort();
        }
        if let Some(timer) = self.garbage_timer.take() {
            timer.abort();
        }
    }
}

#[derive(Default)]
pub(crate) struct SurfacePool {
    /// Visible surfaces in stacking order (index 0 at the anchored corner).
    active: Vec<Slot>,
    /// Hidden surfaces kept for reuse.
    inactive: Vec<Slot>,
}

impl SurfacePool {
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn inactive_len(&self) -> usize {
        self.inactive.len()
    }

    pub fn active_slots(&self) -> &[Slot] {
        &self.active
    }

    pub fn active_slot_mut(&mut self, id: SurfaceId) -> Option<&mut Slot> {
        self.active.iter_mut().find(|slot| slot.id() == id)
    }

    /// Ids of the oldest `count` active surfaces without a pending close.
    pub fn oldest_active_without_pending_close(&self, count: usize) -> Vec<SurfaceId> {
        self.active
            .iter()
            .take(count)
            .filter(|slot| !slot.pending_close)
            .map(Slot::id)
            .collect()
    }

    pub fn push_active(&mut self, slot: Slot) {
        self.active.push(slot);
    }

    /// Remove an active slot, returning its former stacking index.
    pub fn remove_active(&mut self, id: SurfaceId) -> Option<(usize, Slot)> {
        let index = self.active.iter().position(|slot| slot.id() == id)?;
        Some((index, self.active.remove(index)))
    }

    /// Pop a recyclable surface, cancelling its garbage timer and
    /// clearing any stale close state.
    pub fn take_inactive(&mut self) -> Option<Slot> {
        let mut slot = self.inactive.pop()?;
        slot.abort_timers();
        slot.pending_close = false;
        Some(slot)
    }

    /// Park a slot in the inactive list after it finished closing.
    pub fn park(&mut self, slot: Slot) {
        debug_assert!(slot.notify.is_none());
        self.inactive.push(slot);
    }

    /// Remove an inactive slot for disposal. Returns `None` if the
    /// surface was reacquired in the meantime.
    pub fn remove_inactive(&mut self, id: SurfaceId) -> Option<Slot> {
        let index = self.inactive.iter().position(|slot| slot.id() == id)?;
        Some(self.inactive.remove(index))
    }

    /// Drain every slot from both sets, aborting all timers.
    pub fn drain_all(&mut self) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self.active.drain(..).chain(self.inactive.drain(..)).collect();
        for slot in &mut slots {
            slot.abort_timers();
        }
        slots
    }
}
