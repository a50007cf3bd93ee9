//! Shared test fixtures: an in-memory surface host.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::geometry::{Point, WorkArea};
use crate::notify::{Notification, NotifyId};
use crate::surface::{Surface, SurfaceHost, SurfaceId};
use crate::{NotifyError, Result};


/// Recording stand-in for a popup window.
pub(crate) struct MockSurface {
    id: SurfaceId,
    pub positions: Mutex<Vec<Point>>,
    pub visible: AtomicBool,
    pub destroyed: AtomicBool,
    pub hide_calls: AtomicU64,
    /// Ids of every notification rendered on this surface, in order.
    pub contents: Mutex<Vec<NotifyId>>,
}

impl MockSurface {
    fn new(id: SurfaceId) -> Self {
        Self {
            id,
            positions: Mutex::new(Vec::new()),
            visible: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            hide_calls: AtomicU64::new(0),
            contents: Mutex::new(Vec::new()),
        }
    }

    pub fn last_position(&self) -> Option<Point> {
        self.positions.lock().unwrap().last().copied()
    }

    pub fn position_count(&self) -> usize {
        self.positions.lock().unwrap().len()
    }

    pub fn rendered(&self) -> Vec<NotifyId> {
        self.contents.lock().unwrap().clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl Surface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_position(&self, pos: Point) {
        self.positions.lock().unwrap().push(pos);
    }

    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
        self.hide_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    fn set_contents(&self, notify: &Notification) {
        self.contents.lock().unwrap().push(notify.id);
    }
}

/// Host over a mocked primary display.
pub(crate) struct MockHost {
    next_id: AtomicU64,
    pub work: Mutex<WorkArea>,
    pub created: Mutex<Vec<Arc<MockSurface>>>,
    /// Fail every creation attempt.
    pub fail_creates: AtomicBool,
    /// Never resolve creation (exercises the creation timeout).
    pub hang_creates: AtomicBool,
}

impl MockHost {
    /// Host whose work area fits exactly `height / slot-stride` popups.
    pub fn with_work_height(height: u32) -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            work: Mutex::new(WorkArea {
                x: 0,
                y: 0,
                width: 1920,
                height,
            }),
            created: Mutex::new(Vec::new()),
            fail_creates: AtomicBool::new(false),
            hang_creates: AtomicBool::new(false),
        })
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn surface(&self, index: usize) -> Arc<MockSurface> {
        self.created.lock().unwrap()[index].clone()
    }

    pub fn surface_by_id(&self, id: SurfaceId) -> Arc<MockSurface> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .expect("unknown surface id")
    }
}

impl SurfaceHost for MockHost {
    fn create_surface(&self) -> BoxFuture<'_, Result<Arc<dyn Surface>>> {
        Box::pin(async move {
            if self.hang_creates.load(Ordering::SeqCst) {
                futures::future::pending::<()>().await;
            }
            if self.fail_creates.load(Ordering::SeqCst) {
                return Err(NotifyError::SurfaceCreate("mock failure".into()));
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let surface = Arc::new(MockSurface::new(id));
            self.created.lock().unwrap().push(Arc::clone(&surface));
            Ok(surface as Arc<dyn Surface>)
        })
    }

    fn work_area(&self) -> WorkArea {
        *self.work.lock().unwrap()
    }
}
