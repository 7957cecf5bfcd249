//! Video autoplay, click-to-toggle, reel looping and the global mute toggle.

mod options;

pub use options::*;

use crate::error::{Result, WidgetError};

pub const VIDEO_MARKER: &str = "video";
pub const REEL_VIDEO_CLASS: &str = "reel-video";
pub const LOADING_CLASS: &str = "loading";
pub const MUTE_INDICATOR_CLASS: &str = "mute-indicator";

/// A playable media element as seen by the manager.
pub trait MediaHandle {
    fn is_paused(&self) -> bool;
    /// Start playback. A synchronous refusal by the host surfaces as
    /// [`WidgetError::PlaybackRejected`].
    fn play(&self) -> Result<()>;
    fn pause(&self);
    fn is_muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn set_plays_inline(&self, inline: bool);
    fn set_looping(&self, looping: bool);
    fn set_autoplay(&self, autoplay: bool);
    fn set_controls(&self, controls: bool);
    fn set_poster(&self, poster: &str);
    fn set_class_name(&self, class_name: &str);
    fn has_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, present: bool);
    fn rewind(&self);
    fn source(&self) -> String;
}

/// Handle to a media element registered with a [`PlaybackManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(usize);

impl MediaId {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Indicator text for a mute state.
pub fn mute_label(muted: bool) -> &'static str {
    if muted {
        "🔇 Muted"
    } else {
        "🔊 Unmuted"
    }
}

struct Tracked<M> {
    media: M,
    reel: bool,
}

pub struct PlaybackManager<M: MediaHandle> {
    media: Vec<Tracked<M>>,
    visibility_threshold: f64,
}

impl<M: MediaHandle> PlaybackManager<M> {
    pub fn new(visibility_threshold: f64) -> Self {
        Self {
            media: Vec::new(),
            visibility_threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn get(&self, id: MediaId) -> Option<&M> {
        self.media.get(id.0).map(|t| &t.media)
    }

    pub fn is_reel(&self, id: MediaId) -> bool {
        self.media.get(id.0).is_some_and(|t| t.reel)
    }

    /// Take over a media element: force muted inline playback and loop only
    /// reel media. Visibility observation is the caller's job.
    pub fn register(&mut self, media: M) -> MediaId {
        let reel = media.has_class(REEL_VIDEO_CLASS);
        media.set_muted(true);
        media.set_plays_inline(true);
        media.set_looping(reel);
        self.media.push(Tracked { media, reel });
        MediaId(self.media.len() - 1)
    }

    pub fn should_play(&self, visible_ratio: f64) -> bool {
        visible_ratio >= self.visibility_threshold
    }

    /// Visibility changed for `id`.
    pub fn observe(&self, id: MediaId, visible_ratio: f64) {
        if self.should_play(visible_ratio) {
            self.play(id);
        } else {
            self.pause(id);
        }
    }

    pub fn play(&self, id: MediaId) {
        let Some(media) = self.get(id) else {
            return;
        };
        if !media.is_paused() {
            return;
        }
        if let Err(err) = media.play() {
            tracing::warn!("video autoplay failed for {}: {err}", media.source());
        }
    }

    pub fn pause(&self, id: MediaId) {
        if let Some(media) = self.get(id) {
            if !media.is_paused() {
                media.pause();
            }
        }
    }

    pub fn toggle(&self, id: MediaId) {
        let Some(media) = self.get(id) else {
            return;
        };
        if media.is_paused() {
            self.play(id);
        } else {
            self.pause(id);
        }
    }

    /// Playback reached the end. Reels start over; feed media stay paused.
    pub fn handle_ended(&self, id: MediaId) {
        if !self.is_reel(id) {
            return;
        }
        if let Some(media) = self.get(id) {
            media.rewind();
            self.play(id);
        }
    }

    pub fn loading_started(&self, id: MediaId) {
        if let Some(media) = self.get(id) {
            media.set_class(LOADING_CLASS, true);
        }
    }

    pub fn ready(&self, id: MediaId) {
        if let Some(media) = self.get(id) {
            media.set_class(LOADING_CLASS, false);
        }
    }

    /// The element failed to load. Logged; no retry.
    pub fn load_failed(&self, id: MediaId) {
        if let Some(media) = self.get(id) {
            let err = WidgetError::MediaLoad(media.source());
            tracing::error!("{err}");
            media.set_class(LOADING_CLASS, false);
        }
    }

    /// Flip every registered element to the opposite of the first element's
    /// mute state and return the new state. An empty set resolves to muted.
    pub fn toggle_mute_all(&self) -> bool {
        let muted = !self.media.first().is_some_and(|t| t.media.is_muted());
        for tracked in &self.media {
            tracked.media.set_muted(muted);
        }
        muted
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;

    #[derive(Default)]
    pub(crate) struct FakeMedia {
        pub paused: Cell<bool>,
        pub muted: Cell<bool>,
        pub inline: Cell<bool>,
        pub looping: Cell<bool>,
        pub autoplay: Cell<bool>,
        pub controls: Cell<bool>,
        pub poster: RefCell<Option<String>>,
        pub classes: RefCell<BTreeSet<String>>,
        pub position: Cell<f64>,
        pub plays: Cell<u32>,
        pub pauses: Cell<u32>,
        pub reject_play: Cell<bool>,
    }

    impl FakeMedia {
        pub fn feed() -> Self {
            let media = Self::default();
            media.paused.set(true);
            media
        }

        pub fn reel() -> Self {
            let media = Self::feed();
            media.classes.borrow_mut().insert(REEL_VIDEO_CLASS.to_string());
            media
        }
    }

    impl MediaHandle for FakeMedia {
        fn is_paused(&self) -> bool {
            self.paused.get()
        }

        fn play(&self) -> Result<()> {
            self.plays.set(self.plays.get() + 1);
            if self.reject_play.get() {
                return Err(WidgetError::PlaybackRejected("NotAllowedError".into()));
            }
            self.paused.set(false);
            Ok(())
        }

        fn pause(&self) {
            self.pauses.set(self.pauses.get() + 1);
            self.paused.set(true);
        }

        fn is_muted(&self) -> bool {
            self.muted.get()
        }

        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }

        fn set_plays_inline(&self, inline: bool) {
            self.inline.set(inline);
        }

        fn set_looping(&self, looping: bool) {
            self.looping.set(looping);
        }

        fn set_autoplay(&self, autoplay: bool) {
            self.autoplay.set(autoplay);
        }

        fn set_controls(&self, controls: bool) {
            self.controls.set(controls);
        }

        fn set_poster(&self, poster: &str) {
            *self.poster.borrow_mut() = Some(poster.to_string());
        }

        fn set_class_name(&self, class_name: &str) {
            let mut classes = self.classes.borrow_mut();
            classes.clear();
            classes.extend(class_name.split_whitespace().map(str::to_string));
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().contains(class)
        }

        fn set_class(&self, class: &str, present: bool) {
            let mut classes = self.classes.borrow_mut();
            if present {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }

        fn rewind(&self) {
            self.position.set(0.0);
        }

        fn source(&self) -> String {
            "clip.mp4".to_string()
        }
    }

    fn manager() -> PlaybackManager<FakeMedia> {
        PlaybackManager::new(0.5)
    }

    #[test]
    fn register_forces_muted_inline_and_reel_looping() {
        let mut pm = manager();
        let feed = pm.register(FakeMedia::feed());
        let reel = pm.register(FakeMedia::reel());

        let feed = pm.get(feed).unwrap();
        assert!(feed.muted.get() && feed.inline.get());
        assert!(!feed.looping.get());

        let reel = pm.get(reel).unwrap();
        assert!(reel.muted.get() && reel.inline.get());
        assert!(reel.looping.get());
        assert_eq!(pm.len(), 2);
    }

    #[test]
    fn visibility_plays_and_pauses_idempotently() {
        let mut pm = manager();
        let id = pm.register(FakeMedia::feed());

        pm.observe(id, 0.6);
        pm.observe(id, 0.6);
        let media = pm.get(id).unwrap();
        assert!(!media.is_paused());
        assert_eq!(media.plays.get(), 1);

        pm.observe(id, 0.3);
        pm.observe(id, 0.3);
        assert!(media.is_paused());
        assert_eq!(media.pauses.get(), 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        let pm = manager();
        assert!(pm.should_play(0.5));
        assert!(!pm.should_play(0.49));
    }

    #[test]
    fn rejected_autoplay_is_absorbed() {
        let mut pm = manager();
        let media = FakeMedia::feed();
        media.reject_play.set(true);
        let id = pm.register(media);

        pm.observe(id, 1.0);
        let media = pm.get(id).unwrap();
        assert!(media.is_paused());
        assert_eq!(media.plays.get(), 1);
    }

    #[test]
    fn click_toggles_regardless_of_visibility() {
        let mut pm = manager();
        let id = pm.register(FakeMedia::feed());
        pm.toggle(id);
        assert!(!pm.get(id).unwrap().is_paused());
        pm.toggle(id);
        assert!(pm.get(id).unwrap().is_paused());
    }

    #[test]
    fn reels_restart_when_ended_feed_media_stay_paused() {
        let mut pm = manager();
        let reel = pm.register(FakeMedia::reel());
        let feed = pm.register(FakeMedia::feed());

        let r = pm.get(reel).unwrap();
        r.position.set(14.2);
        pm.handle_ended(reel);
        assert_eq!(r.position.get(), 0.0);
        assert!(!r.is_paused());

        let f = pm.get(feed).unwrap();
        f.position.set(9.0);
        pm.handle_ended(feed);
        assert_eq!(f.position.get(), 9.0);
        assert!(f.is_paused());
        assert_eq!(f.plays.get(), 0);
    }

    #[test]
    fn mute_toggle_flips_all_together() {
        let mut pm = manager();
        let ids: Vec<_> = (0..3).map(|_| pm.register(FakeMedia::feed())).collect();

        assert!(!pm.toggle_mute_all());
        assert!(ids.iter().all(|&id| !pm.get(id).unwrap().is_muted()));

        assert!(pm.toggle_mute_all());
        assert!(ids.iter().all(|&id| pm.get(id).unwrap().is_muted()));
    }

    #[test]
    fn mute_toggle_follows_first_element() {
        let mut pm = manager();
        let first = pm.register(FakeMedia::feed());
        let second = pm.register(FakeMedia::feed());
        pm.get(first).unwrap().set_muted(false);

        assert!(pm.toggle_mute_all());
        assert!(pm.get(first).unwrap().is_muted());
        assert!(pm.get(second).unwrap().is_muted());
    }

    #[test]
    fn mute_toggle_on_empty_set_resolves_to_muted() {
        assert!(manager().toggle_mute_all());
        assert_eq!(mute_label(true), "🔇 Muted");
        assert_eq!(mute_label(false), "🔊 Unmuted");
    }

    #[test]
    fn loading_class_follows_load_lifecycle() {
        let mut pm = manager();
        let id = pm.register(FakeMedia::feed());
        pm.loading_started(id);
        assert!(pm.get(id).unwrap().has_class(LOADING_CLASS));
        pm.ready(id);
        assert!(!pm.get(id).unwrap().has_class(LOADING_CLASS));

        pm.loading_started(id);
        pm.load_failed(id);
        assert!(!pm.get(id).unwrap().has_class(LOADING_CLASS));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let pm = manager();
        let ghost = MediaId::from_index(7);
        pm.observe(ghost, 1.0);
        pm.toggle(ghost);
        pm.handle_ended(ghost);
        assert!(pm.get(ghost).is_none());
    }
}
