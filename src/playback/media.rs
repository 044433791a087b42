/// The single media element the controller drives.
///
/// Mirrors the subset of `HTMLMediaElement` the player needs. `duration`
/// is `NaN` until metadata has loaded.
pub trait MediaElement {
    fn src(&self) -> String;
    fn set_src(&mut self, url: &str);
    /// Ask the element to start playing. A rejection (autoplay policy, bad
    /// source) is absorbed by the implementation.
    fn request_play(&mut self);
    fn pause(&mut self);
    fn paused(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
}

impl<M: MediaElement + ?Sized> MediaElement for Box<M> {
    fn src(&self) -> String {
        (**self).src()
    }
    fn set_src(&mut self, url: &str) {
        (**self).set_src(url)
    }
    fn request_play(&mut self) {
        (**self).request_play()
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn paused(&self) -> bool {
        (**self).paused()
    }
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }
    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds)
    }
    fn duration(&self) -> f64 {
        (**self).duration()
    }
    fn volume(&self) -> f64 {
        (**self).volume()
    }
    fn set_volume(&mut self, volume: f64) {
        (**self).set_volume(volume)
    }
    fn muted(&self) -> bool {
        (**self).muted()
    }
    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }
}

/// Notifications emitted by the media element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    Played,
    Paused,
    Ended,
    MetadataReady { duration: f64 },
    TimeUpdate,
    VolumeChanged,
}

/// Headless media element: keeps the element's observable state without
/// producing sound. Stands in when the page has no document, and in tests.
#[derive(Debug, Clone)]
pub struct DetachedMedia {
    src: String,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    pub reject_play: bool,
    pub play_requests: u32,
}

impl Default for DetachedMedia {
    fn default() -> Self {
        Self {
            src: String::new(),
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            muted: false,
            reject_play: false,
            play_requests: 0,
        }
    }
}

impl DetachedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate metadata arriving for the current source.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }
}

impl MediaElement for DetachedMedia {
    fn src(&self) -> String {
        self.src.clone()
    }

    // Assigning a source restarts the load: position and duration reset and
    // the element pauses.
    fn set_src(&mut self, url: &str) {
        self.src = url.to_string();
        self.current_time = 0.0;
        self.duration = f64::NAN;
        self.paused = true;
    }

    fn request_play(&mut self) {
        self.play_requests += 1;
        if !self.reject_play && !self.src.is_empty() {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut seconds = seconds.max(0.0);
        if self.duration.is_finite() {
            seconds = seconds.min(self.duration);
        }
        self.current_time = seconds;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
