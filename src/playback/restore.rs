use tracing::{debug, warn};

/// A remembered position waiting for its track's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PendingRestore {
    #[default]
    Idle,
    Armed { index: usize, time_secs: f64 },
}

/// Reconciles the saved position with whatever track is loaded when
/// metadata arrives.
///
/// The restore is one-shot per session: it is armed once after the initial
/// selection and consumed (applied or discarded) exactly once. Returning to
/// the originally armed track later does not re-arm it.
#[derive(Debug, Clone, Default)]
pub struct RestoreCoordinator {
    pending: PendingRestore,
    armed_once: bool,
}

impl RestoreCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> PendingRestore {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.pending, PendingRestore::Armed { .. })
    }

    /// Arm the restore. Only the first call in a session takes effect.
    pub fn arm(&mut self, index: usize, time_secs: f64) -> bool {
        if self.armed_once {
            warn!(index, "restore already armed this session, ignoring");
            return false;
        }
        self.armed_once = true;
        self.pending = PendingRestore::Armed { index, time_secs };
        debug!(index, time_secs, "restore armed");
        true
    }

    /// A track was selected. Autoplay always starts fresh; a silent
    /// selection of another track makes the saved position irrelevant.
    pub fn on_select(&mut self, index: usize, autoplay: bool) {
        if let PendingRestore::Armed { index: armed, .. } = self.pending {
            if autoplay || armed != index {
                debug!(armed, selected = index, autoplay, "restore discarded");
                self.pending = PendingRestore::Idle;
            }
        }
    }

    /// Metadata is ready for `index`. Consumes any pending restore and
    /// returns the position to seek to, if one should be applied.
    pub fn on_metadata(&mut self, index: usize, duration: f64) -> Option<f64> {
        let PendingRestore::Armed {
            index: armed,
            time_secs,
        } = std::mem::take(&mut self.pending)
        else {
            return None;
        };

        if armed != index {
            debug!(armed, loaded = index, "restore discarded, different track loaded");
            return None;
        }
        if !duration.is_finite() || duration <= 0.0 {
            debug!(index, "restore consumed without seek, duration unknown");
            return None;
        }

        let target = time_secs.clamp(0.0, duration);
        if target > 0.0 {
            debug!(index, target, "restore applied");
            Some(target)
        } else {
            debug!(index, "restore consumed at start of track");
            None
        }
    }
}
