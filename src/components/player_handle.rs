use crate::components::create_media;
use dioxus::prelude::*;
use maxplayer::config::PlayerConfig;
use maxplayer::db::{default_store, KeyValueStore};
use maxplayer::playback::{MediaElement, PlaybackController, PlayerView};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

pub type WebController = PlaybackController<Box<dyn MediaElement>, Box<dyn KeyValueStore>>;

/// Shared handle to the one playback controller on the page.
///
/// Components and element listeners never touch the controller directly;
/// they go through `dispatch`, which republishes the view afterwards.
#[derive(Clone)]
pub struct PlayerHandle {
    controller: Rc<RefCell<WebController>>,
    view: Signal<PlayerView>,
}

impl PlayerHandle {
    pub fn create(config: PlayerConfig) -> Self {
        let mut controller = PlaybackController::new(create_media(), default_store(), config);
        controller.restore_audio_settings();
        let view = Signal::new(controller.view());
        Self {
            controller: Rc::new(RefCell::new(controller)),
            view,
        }
    }

    /// Current view; subscribes the calling component.
    pub fn view(&self) -> PlayerView {
        self.view.read().clone()
    }

    pub fn dispatch<F>(&self, f: F)
    where
        F: FnOnce(&mut WebController),
    {
        let next = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                warn!("player busy, dropping re-entrant update");
                return;
            };
            f(&mut controller);
            controller.view()
        };

        let mut view = self.view;
        if *view.peek() != next {
            view.set(next);
        }
    }
}
