use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared liveness flag handed to everything that may outlive the component
/// that started it (frame requests, fetch workers).
///
/// Clones observe the same flag. Once [`MountToken::cancel`] has been called
/// every clone reports [`MountToken::is_live`] as `false` and the flag can
/// never be set again.
#[derive(Clone, Debug)]
pub struct MountToken {
    live: Arc<AtomicBool>,
}

impl MountToken {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Mark the owner as torn down. Returns `true` if this call performed the
    /// transition.
    pub fn cancel(&self) -> bool {
        let was_live = self.live.swap(false, Ordering::SeqCst);
        if was_live {
            tracing::debug!("mount token cancelled");
        }
        was_live
    }
}

impl Default for MountToken {
    fn default() -> Self {
        Self::new()
    }
}
