//! Audio Manager - binds the page's `<audio>` element to the playback controller.
//! Element notifications, global shortcuts, and page teardown all funnel into
//! `PlayerHandle::dispatch`.

use crate::components::PlayerHandle;
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use maxplayer::playback::{DetachedMedia, MediaElement, MediaEvent, Shortcut};
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast};
use web_sys::{window, EventTarget, HtmlAudioElement, KeyboardEvent};

const AUDIO_ELEMENT_ID: &str = "maxplayer-audio";

/// Initialize the page audio element once
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    // Metadata is enough to learn the duration before playback starts.
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

pub struct WebMedia {
    audio: HtmlAudioElement,
}

impl MediaElement for WebMedia {
    fn src(&self) -> String {
        self.audio.src()
    }

    fn set_src(&mut self, url: &str) {
        self.audio.set_src(url);
    }

    fn request_play(&mut self) {
        match self.audio.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    debug!(?err, "play request rejected");
                }
            }),
            Err(err) => debug!(?err, "play request failed"),
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            debug!(?err, "pause failed");
        }
    }

    fn paused(&self) -> bool {
        self.audio.paused()
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.audio.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }
}

/// The page `<audio>` element, or a detached stand-in when there is no document.
pub fn create_media() -> Box<dyn MediaElement> {
    match get_or_create_audio_element() {
        Some(audio) => Box::new(WebMedia { audio }),
        None => {
            warn!("no document to host the audio element, playback is detached");
            Box::new(DetachedMedia::new())
        }
    }
}

fn listen<E>(target: &EventTarget, name: &str, mut handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let runtime = Runtime::current();
    let callback = Closure::wrap(Box::new(move |event: E| {
        let _guard = RuntimeGuard::new(runtime.clone());
        handler(event);
    }) as Box<dyn FnMut(E)>);
    if let Err(err) =
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
    {
        warn!(name, ?err, "failed to attach listener");
    }
    callback.forget();
}

fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

fn shortcut_from_event(event: &KeyboardEvent) -> Option<Shortcut> {
    if event.default_prevented() || event.is_composing() || is_editable_shortcut_target(event) {
        return None;
    }
    if event.ctrl_key() || event.meta_key() || event.alt_key() {
        return None;
    }
    Shortcut::from_key(&event.key(), &event.code())
}

fn install_listeners(player: PlayerHandle) {
    let Some(audio) = get_or_create_audio_element() else {
        warn!("audio element unavailable, media notifications disabled");
        return;
    };

    for (name, event) in [
        ("play", MediaEvent::Played),
        ("pause", MediaEvent::Paused),
        ("ended", MediaEvent::Ended),
        ("timeupdate", MediaEvent::TimeUpdate),
        ("volumechange", MediaEvent::VolumeChanged),
    ] {
        let player = player.clone();
        listen(&audio, name, move |_: web_sys::Event| {
            player.dispatch(|c| c.handle(event));
        });
    }

    {
        let player = player.clone();
        let element = audio.clone();
        listen(&audio, "loadedmetadata", move |_: web_sys::Event| {
            let duration = element.duration();
            player.dispatch(|c| c.handle(MediaEvent::MetadataReady { duration }));
        });
    }

    let Some(win) = window() else {
        return;
    };

    if let Some(doc) = win.document() {
        let player = player.clone();
        listen(&doc, "keydown", move |event: KeyboardEvent| {
            let Some(shortcut) = shortcut_from_event(&event) else {
                return;
            };
            if shortcut.prevents_default() {
                event.prevent_default();
            }
            player.dispatch(|c| c.apply_shortcut(shortcut));
        });
    }

    listen(&win, "beforeunload", move |_: web_sys::Event| {
        player.dispatch(|c| c.teardown());
    });
}

/// Attaches the element, keyboard, and teardown listeners once.
#[component]
pub fn AudioBridge() -> Element {
    let player = use_context::<PlayerHandle>();

    use_hook(move || install_listeners(player));

    rsx! {}
}
