use serde::{Deserialize, Serialize};

use super::MediaHandle;

/// Settings for a video element built from code rather than markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaOptions {
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
    pub controls: bool,
    pub class_name: Option<String>,
    pub poster: Option<String>,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            muted: true,
            looping: false,
            autoplay: false,
            controls: false,
            class_name: None,
            poster: None,
        }
    }
}

impl MediaOptions {
    pub fn reel() -> Self {
        Self {
            looping: true,
            class_name: Some(super::REEL_VIDEO_CLASS.to_string()),
            ..Self::default()
        }
    }

    /// Configure a freshly created element. Inline playback is always on.
    pub fn apply<M: MediaHandle>(&self, media: &M) {
        media.set_muted(self.muted);
        media.set_plays_inline(true);
        media.set_looping(self.looping);
        media.set_autoplay(self.autoplay);
        media.set_controls(self.controls);
        if let Some(class_name) = &self.class_name {
            media.set_class_name(class_name);
        }
        if let Some(poster) = &self.poster {
            media.set_poster(poster);
        }
    }
}
