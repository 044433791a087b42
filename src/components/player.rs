use crate::components::PlayerHandle;
use dioxus::prelude::*;

/// Now-playing panel: cover, title, transport, position, and volume.
#[component]
pub fn PlayerPanel() -> Element {
    let player = use_context::<PlayerHandle>();
    let view = player.view();

    let on_seek_input = {
        let player = player.clone();
        move |_: Event<FormData>| player.dispatch(|c| c.begin_seek())
    };

    let on_seek_commit = {
        let player = player.clone();
        move |e: Event<FormData>| {
            if let Ok(percent) = e.value().parse::<f64>() {
                player.dispatch(|c| c.commit_seek(percent));
            }
        }
    };

    let on_volume_change = {
        let player = player.clone();
        move |e: Event<FormData>| {
            if let Ok(volume) = e.value().parse::<f64>() {
                player.dispatch(|c| c.set_volume(volume));
            }
        }
    };

    rsx! {
        section { class: "player",
            img {
                id: "cover",
                class: "cover",
                src: "{view.cover}",
                alt: "",
                onerror: {
                    let player = player.clone();
                    move |_| player.dispatch(|c| c.cover_failed())
                },
            }
            h2 { id: "nowTitle", class: "now-title", "{view.title}" }

            div { class: "controls",
                button {
                    id: "prevBtn",
                    r#type: "button",
                    onclick: {
                        let player = player.clone();
                        move |_| player.dispatch(|c| c.prev())
                    },
                    "⏮️"
                }
                button {
                    id: "playPauseBtn",
                    r#type: "button",
                    onclick: {
                        let player = player.clone();
                        move |_| player.dispatch(|c| c.play_pause())
                    },
                    "{view.play_glyph}"
                }
                button {
                    id: "nextBtn",
                    r#type: "button",
                    onclick: {
                        let player = player.clone();
                        move |_| player.dispatch(|c| c.next())
                    },
                    "⏭️"
                }
            }

            div { class: "timeline",
                span { id: "currentTime", class: "time", "{view.elapsed_label}" }
                input {
                    id: "progress",
                    r#type: "range",
                    min: "0",
                    max: "100",
                    step: "0.1",
                    value: "{view.progress}",
                    oninput: on_seek_input,
                    onchange: on_seek_commit,
                }
                span { id: "duration", class: "time", "{view.duration_label}" }
            }

            div { class: "volume",
                button {
                    id: "muteBtn",
                    r#type: "button",
                    onclick: {
                        let player = player.clone();
                        move |_| player.dispatch(|c| c.toggle_mute())
                    },
                    "{view.mute_glyph}"
                }
                input {
                    id: "volume",
                    r#type: "range",
                    min: "0",
                    max: "1",
                    step: "0.01",
                    value: "{view.volume}",
                    oninput: on_volume_change,
                }
            }
        }
    }
}
