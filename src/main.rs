use dioxus::prelude::*;

mod components;

use components::FeedView;

const FEED_CSS: Asset = asset!("/assets/styling/feed.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Attach the widgets once the feed markup is in the document.
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let settings = feedwidgets::dom::load_settings();
        let mounted = feedwidgets::dom::mount_all(&settings);
        if let Some(playback) = mounted.playback {
            attach_factory_video(&playback);
        }
    });

    rsx! {
        document::Meta { name: "theme-color", content: "#111111" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Stylesheet { href: FEED_CSS }

        FeedView {}
    }
}

/// Fill the dynamic slot with a video built by the media factory.
#[cfg(target_arch = "wasm32")]
fn attach_factory_video(playback: &feedwidgets::dom::PlaybackBinding) {
    use feedwidgets::widgets::MediaOptions;
    use web_sys::window;

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(slot) = document.get_element_by_id(components::DYNAMIC_VIDEO_SLOT) else {
        return;
    };
    let options = MediaOptions {
        class_name: Some("feed-video".to_string()),
        ..MediaOptions::default()
    };
    let result = feedwidgets::dom::create_video(
        &document,
        "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.webm",
        &options,
    )
    .and_then(|video| {
        slot.append_child(&video)?;
        playback.register(video)
    });
    if let Err(err) = result {
        tracing::warn!("factory video not attached: {err}");
    }
}
