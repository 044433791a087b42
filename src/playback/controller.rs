use crate::api::{Catalog, CatalogError, CatalogStatus, Track};
use crate::config::PlayerConfig;
use crate::db::{KeyValueStore, Persistence, SnapshotKeys};
use crate::playback::media::{MediaElement, MediaEvent};
use crate::playback::restore::RestoreCoordinator;
use crate::playback::shortcuts::Shortcut;
use crate::playback::state::{PlaybackState, PlayerView, TrackRow};
use crate::utils::{finite_or_zero, format_time, progress_percent};
use tracing::{debug, info, warn};

/// Owns the catalog, the media element, and the playback state. Every
/// mutation of any of them goes through one of these operations.
pub struct PlaybackController<M, S> {
    config: PlayerConfig,
    media: M,
    store: Persistence<S>,
    catalog: Catalog,
    status: CatalogStatus,
    state: PlaybackState,
    restore: RestoreCoordinator,
    title: String,
    cover: String,
}

impl<M: MediaElement, S: KeyValueStore> PlaybackController<M, S> {
    pub fn new(media: M, store: S, config: PlayerConfig) -> Self {
        let keys = SnapshotKeys::from_config(&config);
        let cover = config.placeholder_cover.clone();
        Self {
            config,
            media,
            store: Persistence::new(store, keys),
            catalog: Catalog::default(),
            status: CatalogStatus::Loading,
            state: PlaybackState::default(),
            restore: RestoreCoordinator::new(),
            title: String::new(),
            cover,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn restore(&self) -> &RestoreCoordinator {
        &self.restore
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Apply the saved volume and mute flag to the element.
    pub fn restore_audio_settings(&mut self) {
        let volume = self.store.volume();
        let muted = self.store.muted();
        self.media.set_volume(volume);
        self.media.set_muted(muted);
        self.sync_volume();
    }

    /// Install the fetched catalog, select the saved (or first) track
    /// silently, and arm the position restore for it.
    pub fn on_catalog_loaded(&mut self, tracks: Vec<Track>) {
        self.catalog = Catalog::new(tracks);
        if self.catalog.is_empty() {
            info!("catalog is empty");
            self.status = CatalogStatus::Empty;
            self.cover = self.config.placeholder_cover.clone();
            return;
        }

        self.status = CatalogStatus::Ready;
        let index = self.store.last_index(self.catalog.len());
        self.select_track(index, false);
        let time = self.store.last_time();
        self.restore.arm(index, time);
        info!(index, time, tracks = self.catalog.len(), "initial track selected");
    }

    pub fn on_catalog_failed(&mut self, err: &CatalogError) {
        warn!(%err, "track list unavailable");
        self.catalog = Catalog::default();
        self.status = CatalogStatus::Failed("Failed to load the track list.".to_string());
        self.cover = self.config.placeholder_cover.clone();
    }

    /// Load `index` into the element. Out-of-range indices are ignored.
    pub fn select_track(&mut self, index: usize, autoplay: bool) {
        let Some(track) = self.catalog.get(index) else {
            debug!(index, len = self.catalog.len(), "ignoring out-of-range selection");
            return;
        };
        let url = track.url.clone();
        let title = track.display_name(index);
        let cover = track
            .cover_url()
            .unwrap_or_else(|| self.config.placeholder_cover.clone());

        self.state.current = Some(index);
        self.media.set_src(&url);
        self.title = title;
        self.cover = cover;
        self.store.save_index(index);
        self.restore.on_select(index, autoplay);

        if autoplay {
            self.media.request_play();
        }
    }

    pub fn play_pause(&mut self) {
        if self.media.src().is_empty() {
            return;
        }
        if self.media.paused() {
            self.media.request_play();
        } else {
            self.media.pause();
        }
    }

    pub fn prev(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let target = match self.state.current {
            Some(current) => (current + len - 1) % len,
            None => len - 1,
        };
        self.select_track(target, true);
    }

    pub fn next(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let target = match self.state.current {
            Some(current) => (current + 1) % len,
            None => 0,
        };
        self.select_track(target, true);
    }

    /// Single entry point for element notifications.
    pub fn handle(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Played => self.state.playing = true,
            MediaEvent::Paused => self.state.playing = false,
            MediaEvent::Ended => self.next(),
            MediaEvent::MetadataReady { duration } => self.on_metadata(duration),
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::VolumeChanged => self.sync_volume(),
        }
    }

    fn on_metadata(&mut self, duration: f64) {
        self.state.shown_duration = finite_or_zero(duration);
        let Some(current) = self.state.current else {
            return;
        };
        if let Some(target) = self.restore.on_metadata(current, duration) {
            self.media.set_current_time(target);
            let now = finite_or_zero(self.media.current_time());
            self.state.shown_elapsed = now;
            self.state.progress = progress_percent(now, duration);
        }
    }

    fn on_time_update(&mut self) {
        if self.state.seeking {
            return;
        }
        let current = finite_or_zero(self.media.current_time());
        let duration = finite_or_zero(self.media.duration());
        self.state.shown_elapsed = current;
        self.state.shown_duration = duration;
        self.state.progress = progress_percent(current, duration);
        self.store.save_time(current);
    }

    // Re-read volume/mute from the element and persist both. Safe to call
    // repeatedly for the same change.
    fn sync_volume(&mut self) {
        self.state.volume = self.media.volume();
        self.state.muted = self.media.muted();
        self.store.save_audio(self.state.volume, self.state.muted);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.media.set_muted(muted);
        self.sync_volume();
    }

    pub fn toggle_mute(&mut self) {
        let muted = self.media.muted();
        self.set_muted(!muted);
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.media.set_volume(volume.clamp(0.0, 1.0));
        self.sync_volume();
    }

    pub fn nudge_volume(&mut self, delta: f64) {
        let volume = self.media.volume();
        self.set_volume(volume + delta);
    }

    /// The position slider is being dragged.
    pub fn begin_seek(&mut self) {
        self.state.seeking = true;
    }

    /// The position slider was released at `percent` (0-100).
    pub fn commit_seek(&mut self, percent: f64) {
        let duration = finite_or_zero(self.media.duration());
        let percent = finite_or_zero(percent).clamp(0.0, 100.0);
        self.media.set_current_time(duration * (percent / 100.0));
        self.state.seeking = false;
    }

    /// Relative seek. Backward clamps at 0; forward requires a known
    /// duration and clamps to it.
    pub fn seek_by(&mut self, delta: f64) {
        let current = finite_or_zero(self.media.current_time());
        if delta < 0.0 {
            self.media.set_current_time((current + delta).max(0.0));
        } else {
            let duration = self.media.duration();
            if duration.is_finite() {
                self.media.set_current_time((current + delta).min(duration));
            }
        }
    }

    /// The cover image failed to load.
    pub fn cover_failed(&mut self) {
        self.cover = self.config.placeholder_cover.clone();
    }

    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        let seek_step = self.config.seek_step_secs;
        let volume_step = self.config.volume_step;
        match shortcut {
            Shortcut::TogglePlay => self.play_pause(),
            Shortcut::ToggleMute => self.toggle_mute(),
            Shortcut::Previous => self.prev(),
            Shortcut::Next => self.next(),
            Shortcut::SeekBackward => self.seek_by(-seek_step),
            Shortcut::SeekForward => self.seek_by(seek_step),
            Shortcut::VolumeUp => self.nudge_volume(volume_step),
            Shortcut::VolumeDown => self.nudge_volume(-volume_step),
        }
    }

    /// Final flush before the page goes away.
    pub fn teardown(&mut self) {
        self.store.save_time(finite_or_zero(self.media.current_time()));
        if let Some(index) = self.state.current {
            self.store.save_index(index);
        }
        self.store.save_audio(self.media.volume(), self.media.muted());
    }

    pub fn view(&self) -> PlayerView {
        let rows = self
            .catalog
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| TrackRow {
                index,
                number: index + 1,
                name: track.display_name(index),
                ext_label: track.ext_label(),
                active: self.state.current == Some(index),
            })
            .collect();

        PlayerView {
            status: self.status.clone(),
            rows,
            current: self.state.current,
            title: self.title.clone(),
            cover: self.cover.clone(),
            play_glyph: self.state.play_glyph(),
            mute_glyph: self.state.mute_glyph(),
            elapsed_label: format_time(self.state.shown_elapsed),
            duration_label: format_time(self.state.shown_duration),
            progress: self.state.progress,
            volume: self.state.volume,
            muted: self.state.muted,
        }
    }
}
