use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlElement, HtmlVideoElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
};

use super::{claim, listen, query_document};
use crate::config::WidgetSettings;
use crate::error::{Result, WidgetError};
use crate::widgets::{
    mute_label, MediaHandle, MediaId, MediaOptions, PlaybackManager, MUTE_INDICATOR_CLASS,
    VIDEO_MARKER,
};

const PLAYBACK_ID_ATTR: &str = "data-playback-id";
const MUTE_INDICATOR_STYLE: &str = "position: fixed; top: 50%; left: 50%; \
    transform: translate(-50%, -50%); background: rgba(0, 0, 0, 0.8); color: white; \
    padding: 12px 20px; border-radius: 8px; font-size: 14px; font-weight: 600; \
    z-index: 1000; pointer-events: none;";

/// `<video>` element driven by the playback manager.
#[derive(Clone)]
pub struct VideoElement(HtmlVideoElement);

impl VideoElement {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self(video)
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.0
    }
}

impl MediaHandle for VideoElement {
    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) -> Result<()> {
        let promise = self
            .0
            .play()
            .map_err(|e| WidgetError::PlaybackRejected(WidgetError::from(e).to_string()))?;
        let src = self.source();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(reason) = JsFuture::from(promise).await {
                let err = WidgetError::PlaybackRejected(WidgetError::from(reason).to_string());
                tracing::warn!("video autoplay failed for {src}: {err}");
            }
        });
        Ok(())
    }

    fn pause(&self) {
        let _ = self.0.pause();
    }

    fn is_muted(&self) -> bool {
        self.0.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn set_plays_inline(&self, inline: bool) {
        let _ = if inline {
            self.0.set_attribute("playsinline", "")
        } else {
            self.0.remove_attribute("playsinline")
        };
    }

    fn set_looping(&self, looping: bool) {
        self.0.set_loop(looping);
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.0.set_autoplay(autoplay);
    }

    fn set_controls(&self, controls: bool) {
        self.0.set_controls(controls);
    }

    fn set_poster(&self, poster: &str) {
        self.0.set_poster(poster);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.set_class_name(class_name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, present: bool) {
        let _ = self.0.class_list().toggle_with_force(class, present);
    }

    fn rewind(&self) {
        self.0.set_current_time(0.0);
    }

    fn source(&self) -> String {
        let current = self.0.current_src();
        if current.is_empty() {
            self.0.src()
        } else {
            current
        }
    }
}

/// Owns the playback manager and the visibility observer feeding it.
#[derive(Clone)]
pub struct PlaybackBinding {
    manager: Rc<RefCell<PlaybackManager<VideoElement>>>,
    observer: IntersectionObserver,
}

impl PlaybackBinding {
    pub fn len(&self) -> usize {
        self.manager.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.manager.borrow().is_empty()
    }

    /// Hand a video over to the manager: attributes, load-state classes,
    /// click-to-toggle, completion handling and visibility observation.
    pub fn register(&self, video: HtmlVideoElement) -> Result<Option<MediaId>> {
        if !claim(&video)? {
            return Ok(None);
        }
        let id = self
            .manager
            .borrow_mut()
            .register(VideoElement::new(video.clone()));
        video.set_attribute(PLAYBACK_ID_ATTR, &id.index().to_string())?;

        let bind = |event: &str, action: fn(&PlaybackManager<VideoElement>, MediaId)| {
            let manager = self.manager.clone();
            listen(&video, event, move |_| action(&manager.borrow(), id))
        };
        bind("loadstart", PlaybackManager::loading_started)?;
        bind("canplay", PlaybackManager::ready)?;
        bind("error", PlaybackManager::load_failed)?;
        bind("ended", PlaybackManager::handle_ended)?;
        bind("click", PlaybackManager::toggle)?;

        self.observer.observe(&video);
        Ok(Some(id))
    }

    pub fn toggle_mute_all(&self) -> bool {
        self.manager.borrow().toggle_mute_all()
    }
}

/// Build the playback manager, take over every `video` already in the
/// document and bind the `m` mute shortcut.
pub fn mount_playback(document: &Document, settings: &WidgetSettings) -> Result<PlaybackBinding> {
    let manager = Rc::new(RefCell::new(PlaybackManager::new(
        settings.visibility_threshold,
    )));

    let on_visibility = {
        let manager = manager.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let manager = manager.borrow();
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if let Some(id) = playback_id(&entry.target()) {
                    manager.observe(id, entry.intersection_ratio());
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };
    let init = IntersectionObserverInit::new();
    init.set_threshold(&settings.visibility_threshold.into());
    init.set_root_margin(&settings.visibility_root_margin);
    let observer =
        IntersectionObserver::new_with_options(on_visibility.as_ref().unchecked_ref(), &init)?;
    on_visibility.forget();

    let binding = PlaybackBinding { manager, observer };
    for element in query_document(document, VIDEO_MARKER)? {
        if let Ok(video) = element.dyn_into::<HtmlVideoElement>() {
            if let Err(err) = binding.register(video) {
                tracing::warn!("video not registered: {err}");
            }
        }
    }

    {
        let binding = binding.clone();
        let doc = document.clone();
        let linger_ms = settings.mute_indicator_ms;
        listen(document, "keydown", move |event| {
            let event: KeyboardEvent = event.unchecked_into();
            if event.default_prevented() || event.is_composing() || is_editable_target(&event) {
                return;
            }
            if matches!(event.key().as_str(), "m" | "M") {
                let muted = binding.toggle_mute_all();
                if let Err(err) = show_mute_indicator(&doc, muted, linger_ms) {
                    tracing::warn!("mute indicator: {err}");
                }
            }
        })?;
    }

    tracing::debug!("playback manager attached to {} videos", binding.len());
    Ok(binding)
}

/// Build a configured `<video>` from code. Register it with a
/// [`PlaybackBinding`] once it is in the document.
pub fn create_video(
    document: &Document,
    src: &str,
    options: &MediaOptions,
) -> Result<HtmlVideoElement> {
    let video: HtmlVideoElement = document
        .create_element(VIDEO_MARKER)?
        .dyn_into()
        .map_err(|_| WidgetError::Dom("created element is not a video".to_string()))?;
    video.set_src(src);
    options.apply(&VideoElement::new(video.clone()));
    Ok(video)
}

/// Show the transient mute state overlay, replacing any previous one.
pub fn show_mute_indicator(document: &Document, muted: bool, linger_ms: u32) -> Result<()> {
    if let Some(existing) = document.query_selector(&format!(".{MUTE_INDICATOR_CLASS}"))? {
        existing.remove();
    }
    let indicator: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| WidgetError::Dom("indicator is not an html element".to_string()))?;
    indicator.set_class_name(MUTE_INDICATOR_CLASS);
    indicator.style().set_css_text(MUTE_INDICATOR_STYLE);
    indicator.set_text_content(Some(mute_label(muted)));
    document
        .body()
        .ok_or(WidgetError::MissingElement("body"))?
        .append_child(&indicator)?;

    Timeout::new(linger_ms, move || indicator.remove()).forget();
    Ok(())
}

fn playback_id(target: &Element) -> Option<MediaId> {
    target
        .get_attribute(PLAYBACK_ID_ATTR)?
        .parse::<usize>()
        .ok()
        .map(MediaId::from_index)
}

/// Shortcuts stay out of the way while the user is typing.
fn is_editable_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}
