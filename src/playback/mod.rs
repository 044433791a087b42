//! Playback state machine: track selection, element notifications, and the
//! deferred position restore.

mod controller;
pub mod media;
pub mod restore;
pub mod shortcuts;
pub mod state;

pub use controller::PlaybackController;
pub use media::{DetachedMedia, MediaElement, MediaEvent};
pub use restore::{PendingRestore, RestoreCoordinator};
pub use shortcuts::Shortcut;
pub use state::{PlaybackState, PlayerView, TrackRow};
