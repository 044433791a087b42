use crate::api::CatalogStatus;

pub const PLAY_GLYPH: &str = "▶️";
pub const PAUSE_GLYPH: &str = "⏸️";
pub const MUTED_GLYPH: &str = "🔇";
pub const AUDIBLE_GLYPH: &str = "🔈";

/// Mutable playback state owned by the controller.
///
/// `current` is `None` until a track is selected, and always indexes into
/// the catalog otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current: Option<usize>,
    pub playing: bool,
    pub muted: bool,
    pub volume: f64,
    /// Set while the user drags the position slider; freezes time labels.
    pub seeking: bool,
    pub shown_elapsed: f64,
    pub shown_duration: f64,
    pub progress: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            muted: false,
            volume: 1.0,
            seeking: false,
            shown_elapsed: 0.0,
            shown_duration: 0.0,
            progress: 0.0,
        }
    }
}

impl PlaybackState {
    pub fn mute_glyph(&self) -> &'static str {
        if self.muted || self.volume == 0.0 {
            MUTED_GLYPH
        } else {
            AUDIBLE_GLYPH
        }
    }

    pub fn play_glyph(&self) -> &'static str {
        if self.playing {
            PAUSE_GLYPH
        } else {
            PLAY_GLYPH
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub index: usize,
    pub number: usize,
    pub name: String,
    pub ext_label: String,
    pub active: bool,
}

impl TrackRow {
    /// Classes for the row element; `assets/styling/app.css` highlights
    /// `.track.active`.
    pub fn class_name(&self) -> &'static str {
        if self.active {
            "track active"
        } else {
            "track"
        }
    }
}

/// Read-only snapshot handed to the view layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerView {
    pub status: CatalogStatus,
    pub rows: Vec<TrackRow>,
    pub current: Option<usize>,
    pub title: String,
    pub cover: String,
    pub play_glyph: &'static str,
    pub mute_glyph: &'static str,
    pub elapsed_label: String,
    pub duration_label: String,
    pub progress: f64,
    pub volume: f64,
    pub muted: bool,
}
