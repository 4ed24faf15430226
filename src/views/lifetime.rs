use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use uuid::Uuid;

/// Liveness token of one view instance.
///
/// Clones share the flag, so a completion handler running in a spawned task
/// sees the unmount done by the view's owner.
#[derive(Debug, Clone)]
pub struct ViewLifetime {
    id: Uuid,
    mounted: Arc<AtomicBool>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}
