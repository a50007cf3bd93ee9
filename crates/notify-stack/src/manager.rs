//! Notification manager: action queue, scheduler, and lifecycle.
//!
//! Every show/close transition goes through a bounded FIFO channel
//! consumed by a single worker task, so transitions are globally
//! serialized: a new action never starts before the previous one has
//! fully completed, including its async suspension points (surface
//! construction, content load). Timer callbacks never touch the pool
//! directly; they only set the pending-close guard and enqueue actions.
//!
//! `close_all` is the one sanctioned exception: it bypasses the queue,
//! bumps the epoch so stale queued actions become no-ops, and tears
//! every surface down immediately.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use crate::config::NotifyConfig;
use crate::geometry;
use crate::notify::{Notification, NotifyId, NotifyOptions};
use crate::pool::{Slot, SurfacePool};
use crate::surface::{SurfaceHost, SurfaceId};
use crate::{NotifyError, Result};

/// Maximum number of queued show/close actions.
const QUEUE_CAPACITY: usize = 256;

enum ActionKind {
    Show(Notification),
    Close(SurfaceId),
    Dispose(SurfaceId),
    Drain(oneshot::Sender<()>),
}

struct Action {
    /// Epoch the action was enqueued in; actions from before the last
    /// `close_all` are dropped unprocessed.
    epoch: u64,
    kind: ActionKind,
}

#[derive(Default)]
struct ManagerState {
    pool: SurfacePool,
    /// Notifications deferred because the visible stack was full.
    overflow: VecDeque<Notification>,
    epoch: u64,
    next_notify_id: NotifyId,
}

struct Inner {
    config: NotifyConfig,
    host: Arc<dyn SurfaceHost>,
    tx: mpsc::Sender<Action>,
    state: Mutex<ManagerState>,
    /// Self-reference handed to timer tasks; timers must not keep the
    /// manager alive on their own.
    weak: Weak<Inner>,
}

/// Handle to the notification manager.
///
/// Cheap to clone; constructed once at process start and passed to the
/// boundary adapter.
#[derive(Clone)]
pub struct NotifyManager {
    inner: Arc<Inner>,
}

impl NotifyManager {
    /// Validate the configuration and start the worker task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(host: Arc<dyn SurfaceHost>, config: NotifyConfig) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let inner = Arc::new_cyclic(|weak| Inner {
            config,
            host,
            tx,
            state: Mutex::new(ManagerState::default()),
            weak: weak.clone(),
        });

        tokio::spawn(worker_loop(Arc::downgrade(&inner), rx));
        tracing::info!(capacity = QUEUE_CAPACITY, "Notification worker started");

        Ok(Self { inner })
    }

    /// Create a notification entity and enqueue its show action.
    ///
    /// Returns the assigned id; the notification appears (or lands in
    /// the overflow queue) once the worker reaches the action.
    pub fn notify(&self, title: impl Into<String>, options: NotifyOptions) -> Result<NotifyId> {
        let (id, epoch) = {
            let mut state = self.inner.state();
            let id = state.next_notify_id;
            state.next_notify_id += 1;
            (id, state.epoch)
        };

        let notification = Notification::new(id, title, options);
        tracing::debug!(id, title = %notification.title, "Notification queued");
        self.inner
            .enqueue_at(epoch, ActionKind::Show(notification))?;
        Ok(id)
    }

    /// Request that a visible surface be closed (click on the close
    /// control, or the duration timer firing).
    ///
    /// Idempotent: returns `false` if the surface is not active or a
    /// close is already pending for it.
    pub fn request_close(&self, surface: SurfaceId) -> bool {
        self.inner.request_close(surface)
    }

    /// Emergency reset: drop all queued actions, cancel every timer,
    /// destroy every surface, and clear the overflow queue.
    pub fn close_all(&self) {
        let slots = {
            let mut state = self.inner.state();
            state.epoch += 1;
            state.overflow.clear();
            state.pool.drain_all()
        };

        let count = slots.len();
        for slot in slots {
            slot.surface.destroy();
        }
        tracing::info!(surfaces = count, "Closed all notifications");
    }

    /// Wait until every action enqueued before this call has been
    /// processed.
    pub async fn drain(&self) -> Result<()> {
        let (done_tx, done_rx) = oneshot::channel();
        let epoch = self.inner.state().epoch;
        self.inner
            .tx
            .send(Action {
                epoch,
                kind: ActionKind::Drain(done_tx),
            })
            .await
            .map_err(|_| NotifyError::QueueClosed)?;
        done_rx.await.map_err(|_| NotifyError::QueueClosed)
    }

    /// Tear down on shell exit: destroy everything, then let the
    /// worker observe the cleared state.
    pub async fn shutdown(&self) {
        self.close_all();
        if let Err(e) = self.drain().await {
            tracing::warn!(error = %e, "Notification worker already stopped");
        }
    }

    // -- Diagnostics (also used by the test suite) --

    /// Number of currently visible surfaces.
    pub fn active_count(&self) -> usize {
        self.inner.state().pool.active_len()
    }

    /// Number of hidden surfaces awaiting reuse or disposal.
    pub fn inactive_count(&self) -> usize {
        self.inner.state().pool.inactive_len()
    }

    /// Number of notifications waiting for a free slot.
    pub fn overflow_len(&self) -> usize {
        self.inner.state().overflow.len()
    }

    /// Surface ids of the visible stack, in stacking order.
    pub fn active_surfaces(&self) -> Vec<SurfaceId> {
        self.inner
            .state()
            .pool
            .active_slots()
            .iter()
            .map(|slot| slot.surface.id())
            .collect()
    }

    /// Notification ids of the visible stack, in stacking order.
    pub fn active_notifications(&self) -> Vec<NotifyId> {
        self.inner
            .state()
            .pool
            .active_slots()
            .iter()
            .filter_map(|slot| slot.notify.as_ref().map(|n| n.id))
            .collect()
    }
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue an action stamped with the given epoch. Lock-free so it
    /// can be called while the state mutex is held.
    fn enqueue_at(&self, epoch: u64, kind: ActionKind) -> Result<()> {
        self.tx
            .try_send(Action { epoch, kind })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => NotifyError::QueueClosed,
            })
    }

    /// The guarded close request. Sets `pending_close` exactly once,
    /// cancels the duration timer, and enqueues the close transition.
    fn request_close(&self, surface: SurfaceId) -> bool {
        let epoch = {
            let mut state = self.state();
            let Some(slot) = state.pool.active_slot_mut(surface) else {
                return false;
            };
            if slot.pending_close {
                return false;
            }
            slot.pending_close = true;
            if let Some(timer) = slot.duration_timer.take() {
                timer.abort();
            }
            state.epoch
        };

        if let Err(e) = self.enqueue_at(epoch, ActionKind::Close(surface)) {
            tracing::warn!(surface, error = %e, "Failed to enqueue close");
        }
        true
    }

    fn spawn_duration_timer(&self, surface: SurfaceId) -> JoinHandle<()> {
        let weak = self.weak.clone();
        let duration = self.config.notify_duration;
        tokio::spawn(async move {
            sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                inner.request_close(surface);
            }
        })
    }

    fn spawn_garbage_timer(&self, surface: SurfaceId) -> JoinHandle<()> {
        let weak = self.weak.clone();
        let duration = self.config.garbage_duration;
        tokio::spawn(async move {
            sleep(duration).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let epoch = inner.state().epoch;
            if let Err(e) = inner.enqueue_at(epoch, ActionKind::Dispose(surface)) {
                tracing::warn!(surface, error = %e, "Failed to enqueue dispose");
            }
        })
    }

    /// Show transition. Runs on the worker task.
    async fn handle_show(&self, notification: Notification) {
        let work = self.host.work_area();
        let capacity = geometry::max_visible(&work, &self.config);

        let (reused, epoch) = {
            let mut state = self.state();
            let epoch = state.epoch;

            if state.pool.active_len() >= capacity {
                // Free slots for queued notifications before parking
                // this one in the overflow queue.
                let excess = state.pool.active_len() - capacity + 1;
                let victims = state.pool.oldest_active_without_pending_close(excess);
                for id in victims {
                    if let Some(slot) = state.pool.active_slot_mut(id) {
                        slot.pending_close = true;
                        if let Some(timer) = slot.duration_timer.take() {
                            timer.abort();
                        }
                    }
                    if let Err(e) = self.enqueue_at(epoch, ActionKind::Close(id)) {
                        tracing::warn!(surface = id, error = %e, "Failed to enqueue eviction");
                    }
                }
                tracing::debug!(
                    id = notification.id,
                    capacity,
                    "Stack full, notification deferred to overflow queue"
                );
                state.overflow.push_back(notification);
                return;
            }

            (state.pool.take_inactive(), epoch)
        };

        let surface = match reused {
            Some(slot) => {
                tracing::debug!(surface = slot.id(), "Reusing inactive surface");
                slot.surface
            }
            None => {
                let created = timeout(self.config.create_timeout, self.host.create_surface()).await;
                match created {
                    Ok(Ok(surface)) => surface,
                    Ok(Err(e)) => {
                        tracing::error!(
                            id = notification.id,
                            error = %e,
                            "Surface creation failed, dropping notification"
                        );
                        return;
                    }
                    Err(_) => {
                        let e = NotifyError::CreateTimeout(self.config.create_timeout.as_millis() as u64);
                        tracing::error!(
                            id = notification.id,
                            error = %e,
                            "Surface creation timed out, dropping notification"
                        );
                        return;
                    }
                }
            }
        };

        {
            let mut state = self.state();
            if state.epoch != epoch {
                // close_all ran while the surface was being built.
                surface.destroy();
                return;
            }

            let slot_index = state.pool.active_len();
            surface.set_position(geometry::slot_position(slot_index, &work, &self.config));

            let mut slot = Slot::new(Arc::clone(&surface));
            slot.duration_timer = Some(self.spawn_duration_timer(surface.id()));
            slot.notify = Some(notification.clone());
            state.pool.push_active(slot);
        }

        surface.set_contents(&notification);
        surface.show();
        tracing::debug!(
            id = notification.id,
            surface = surface.id(),
            "Notification shown"
        );
    }

    /// Close transition. Runs on the worker task.
    fn handle_close(&self, surface: SurfaceId) {
        let mut state = self.state();
        let Some((index, mut slot)) = state.pool.remove_active(surface) else {
            // Already closed (e.g. by close_all between request and here).
            return;
        };

        slot.notify = None;
        slot.pending_close = false;
        if let Some(timer) = slot.duration_timer.take() {
            timer.abort();
        }
        slot.surface.hide();
        slot.garbage_timer = Some(self.spawn_garbage_timer(surface));
        state.pool.park(slot);
        tracing::debug!(surface, "Surface parked as inactive");

        let work = self.host.work_area();
        let capacity = geometry::max_visible(&work, &self.config);

        if !state.overflow.is_empty() && state.pool.active_len() < capacity {
            if let Some(next) = state.overflow.pop_front() {
                let epoch = state.epoch;
                if let Err(e) = self.enqueue_at(epoch, ActionKind::Show(next)) {
                    tracing::warn!(error = %e, "Failed to promote overflow notification");
                }
            }
        }

        // Close the visual gap: every surface stacked after the removed
        // one moves one slot toward the anchored edge.
        for (slot_index, active) in state.pool.active_slots().iter().enumerate().skip(index) {
            active
                .surface
                .set_position(geometry::slot_position(slot_index, &work, &self.config));
        }
    }

    /// Garbage disposal. Runs on the worker task; a no-op if the
    /// surface was reacquired after its timer fired.
    fn handle_dispose(&self, surface: SurfaceId) {
        let mut state = self.state();
        let Some(mut slot) = state.pool.remove_inactive(surface) else {
            return;
        };
        slot.abort_timers();
        slot.surface.destroy();
        tracing::debug!(surface, "Disposed inactive surface");
    }
}

/// Single consumer over the action queue.
///
/// Holds only a weak reference so dropping the last manager handle
/// shuts the loop down once the channel closes.
async fn worker_loop(inner: Weak<Inner>, mut rx: mpsc::Receiver<Action>) {
    while let Some(action) = rx.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };

        let stale = action.epoch != inner.state().epoch;
        match action.kind {
            ActionKind::Drain(done) => {
                let _ = done.send(());
            }
            _ if stale => {
                tracing::trace!("Dropping action from before close_all");
            }
            ActionKind::Show(notification) => inner.handle_show(notification).await,
            ActionKind::Close(surface) => inner.handle_close(surface),
            ActionKind::Dispose(surface) => inner.handle_dispose(surface),
        }
    }

    tracing::info!("Notification worker stopped");
}
