/// Global keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    ToggleMute,
    Previous,
    Next,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
}

impl Shortcut {
    /// Map a `KeyboardEvent` `key`/`code` pair. Letter keys ignore case.
    pub fn from_key(key: &str, code: &str) -> Option<Self> {
        if code == "Space" {
            return Some(Self::TogglePlay);
        }
        match key {
            "ArrowLeft" => return Some(Self::SeekBackward),
            "ArrowRight" => return Some(Self::SeekForward),
            "ArrowUp" => return Some(Self::VolumeUp),
            "ArrowDown" => return Some(Self::VolumeDown),
            _ => {}
        }
        match key.to_lowercase().as_str() {
            "m" => Some(Self::ToggleMute),
            "j" => Some(Self::Previous),
            "l" => Some(Self::Next),
            _ => None,
        }
    }

    /// Whether the browser's default action (page scroll) must be suppressed.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::TogglePlay | Self::VolumeUp | Self::VolumeDown)
    }
}
