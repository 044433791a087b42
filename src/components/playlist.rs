use crate::components::PlayerHandle;
use dioxus::prelude::*;
use maxplayer::api::CatalogStatus;

/// Track list. Clicking a row starts that track from the beginning.
#[component]
pub fn Playlist() -> Element {
    let player = use_context::<PlayerHandle>();
    let view = player.view();

    let hint = match &view.status {
        CatalogStatus::Loading | CatalogStatus::Ready => None,
        CatalogStatus::Empty => Some("No tracks found.".to_string()),
        CatalogStatus::Failed(message) => Some(message.clone()),
    };

    rsx! {
        section { class: "playlist-panel",
            if let Some(hint) = hint {
                p { id: "emptyHint", class: "empty-hint", "{hint}" }
            }
            ul { id: "playlist", class: "playlist",
                for row in view.rows.iter().cloned() {
                    li {
                        key: "{row.index}",
                        class: row.class_name(),
                        onclick: {
                            let player = player.clone();
                            let index = row.index;
                            move |_| player.dispatch(|c| c.select_track(index, true))
                        },
                        div { class: "index", "{row.number}" }
                        div { class: "name", "{row.name}" }
                        div { class: "ext", "{row.ext_label}" }
                    }
                }
            }
        }
    }
}
