use dioxus::prelude::*;

#[component]
pub fn ReelsSection(sources: Vec<String>) -> Element {
    rsx! {
        section { class: "reels-container", tabindex: "0",
            for (index, src) in sources.iter().enumerate() {
                div { class: "reel", key: "{index}",
                    video { class: "reel-video", src: "{src}", preload: "metadata" }
                    span { class: "reel-counter", {format!("{} / {}", index + 1, sources.len())} }
                }
            }
        }
    }
}
