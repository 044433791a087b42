use crate::components::{AudioBridge, PlayerHandle, PlayerPanel, Playlist};
use dioxus::prelude::*;
use maxplayer::api::fetch_catalog;
use maxplayer::config::PlayerConfig;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

/// Id of the optional `<script type="application/json">` block carrying
/// player configuration.
const CONFIG_ELEMENT_ID: &str = "maxplayer-config";

fn load_page_config() -> PlayerConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    PlayerConfig::from_json_or_default(&raw)
}

#[component]
pub fn App() -> Element {
    let config = use_hook(load_page_config);
    let player = use_hook({
        let config = config.clone();
        move || PlayerHandle::create(config)
    });

    use_context_provider(|| player.clone());

    // Load the track list once on mount
    {
        let player = player.clone();
        let config = config.clone();
        use_effect(move || {
            let player = player.clone();
            let config = config.clone();
            spawn(async move {
                match fetch_catalog(&config).await {
                    Ok(tracks) => player.dispatch(|c| c.on_catalog_loaded(tracks)),
                    Err(err) => player.dispatch(|c| c.on_catalog_failed(&err)),
                }
            });
        });
    }

    rsx! {
        document::Stylesheet { href: APP_CSS }

        main { class: "app",
            PlayerPanel {}
            Playlist {}
            AudioBridge {}
        }
    }
}
