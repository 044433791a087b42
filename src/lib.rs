//! Core of the maxplayer web player.
//!
//! Everything here is independent of the UI layer: the track catalog, the
//! best-effort persistence store, and the playback/restore state machine that
//! the Dioxus components drive.

pub mod api;
pub mod config;
pub mod db;
pub mod playback;
pub mod utils;
