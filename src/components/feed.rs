use dioxus::prelude::*;

use crate::components::{demo_posts, demo_reels, PostCard, ReelsSection};

/// Slot the shell fills with a video built through the media factory.
pub const DYNAMIC_VIDEO_SLOT: &str = "dynamic-video-slot";

#[component]
pub fn FeedView() -> Element {
    let posts = use_hook(demo_posts);
    let reels = use_hook(demo_reels);

    rsx! {
        main { class: "feed",
            for post in posts {
                PostCard { key: "{post.id}", post: post.clone() }
            }
            div { id: DYNAMIC_VIDEO_SLOT, class: "post" }
            h2 { class: "feed-heading", "Reels" }
            ReelsSection { sources: reels }
            p { class: "feed-hint", "Press M to toggle sound." }
        }
    }
}
