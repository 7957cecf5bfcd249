use dioxus::prelude::*;

const VIDEO_SAMPLE: &str =
    "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4";

/// What a feed post shows.
#[derive(Clone, PartialEq)]
pub enum PostMedia {
    /// Image slides; `with_dots` renders the indicators in markup instead of
    /// letting the carousel build them.
    Carousel { images: Vec<String>, with_dots: bool },
    Video { src: String, poster: Option<String> },
}

#[derive(Clone, PartialEq)]
pub struct Post {
    pub id: u32,
    pub author: String,
    pub caption: String,
    pub media: PostMedia,
}

fn picsum(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/600/600")
}

pub fn demo_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: "harbor.lights".to_string(),
            caption: "Four frames from the pier".to_string(),
            media: PostMedia::Carousel {
                images: ["pier-a", "pier-b", "pier-c", "pier-d"].map(picsum).to_vec(),
                with_dots: false,
            },
        },
        Post {
            id: 2,
            author: "slow.bloom".to_string(),
            caption: "Time-lapse, no filter".to_string(),
            media: PostMedia::Video {
                src: VIDEO_SAMPLE.to_string(),
                poster: Some(picsum("bloom")),
            },
        },
        Post {
            id: 3,
            author: "trailhead".to_string(),
            caption: "Ridge walk".to_string(),
            media: PostMedia::Carousel {
                images: ["ridge-a", "ridge-b", "ridge-c"].map(picsum).to_vec(),
                with_dots: true,
            },
        },
    ]
}

pub fn demo_reels() -> Vec<String> {
    (0..4).map(|_| VIDEO_SAMPLE.to_string()).collect()
}

#[component]
pub fn PostCard(post: Post) -> Element {
    let media = match post.media {
        PostMedia::Carousel { images, with_dots } => rsx! {
            CarouselMarkup { images, with_dots }
        },
        PostMedia::Video { src, poster } => rsx! {
            video {
                class: "feed-video",
                src: "{src}",
                poster: poster.unwrap_or_default(),
                preload: "metadata",
            }
        },
    };

    rsx! {
        article { class: "post",
            header { class: "post-header",
                span { class: "post-author", "@{post.author}" }
            }
            {media}
            p { class: "post-caption", "{post.caption}" }
        }
    }
}

#[component]
fn CarouselMarkup(images: Vec<String>, with_dots: bool) -> Element {
    rsx! {
        div { class: "carousel-container", tabindex: "0",
            div { class: "carousel-track",
                for (index, src) in images.iter().enumerate() {
                    div { class: "carousel-slide", key: "{index}",
                        img { src: "{src}", alt: "slide {index}", draggable: "false" }
                    }
                }
            }
            if with_dots {
                div { class: "carousel-dots",
                    for index in 0..images.len() {
                        div { class: "carousel-dot", key: "{index}", "data-index": "{index}" }
                    }
                }
            }
        }
    }
}
