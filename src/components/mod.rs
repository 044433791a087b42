//! The components module contains the view binding for the player page.

mod app;
mod audio_manager;
mod player;
mod player_handle;
mod playlist;

pub use app::*;
pub use audio_manager::*;
pub use player::*;
pub use player_handle::*;
pub use playlist::*;
