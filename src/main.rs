#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
fn main() {
    dioxus::launch(components::App);
}

/// The player drives a browser `<audio>` element and has no native frontend.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("maxplayer runs in the browser; serve it with `dx serve --platform web`");
    std::process::exit(1);
}
