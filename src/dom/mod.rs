//! Browser binding for the widgets: finds the markup, implements the surface
//! traits over `web-sys` and wires the event listeners.
//!
//! Listeners and timers are leaked with `forget` and live for the page
//! session.

mod carousel;
mod reels;
mod video;

pub use carousel::mount_carousels;
pub use reels::mount_reels;
pub use video::{create_video, mount_playback, show_mute_indicator, PlaybackBinding, VideoElement};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, AddEventListenerOptions, Document, Element, Event, EventTarget};

use crate::config::{WidgetSettings, SETTINGS_ELEMENT_ID};
use crate::diagnostics::{log_perf, now_ms};
use crate::error::{Result, WidgetError};

/// Marks elements a widget has already taken over.
pub(crate) const ATTACHED_ATTR: &str = "data-widget-attached";

/// What [`mount_all`] managed to attach.
pub struct MountedWidgets {
    pub carousels: usize,
    pub reels: bool,
    pub playback: Option<PlaybackBinding>,
}

/// Attach every widget whose markup is present in the current document.
///
/// Missing markup is not an error: that widget is simply skipped.
pub fn mount_all(settings: &WidgetSettings) -> MountedWidgets {
    let started = now_ms();
    let Some(document) = window().and_then(|w| w.document()) else {
        tracing::debug!("no document; widgets not mounted");
        return MountedWidgets {
            carousels: 0,
            reels: false,
            playback: None,
        };
    };

    let carousels = mount_carousels(&document, settings);
    let reels = report("reels", mount_reels(&document, settings)).is_some();
    let playback = report("playback", mount_playback(&document, settings));

    log_perf(
        "mount_all",
        started,
        &format!(
            "carousels={carousels} reels={reels} videos={}",
            playback.as_ref().map(|p| p.len()).unwrap_or(0)
        ),
    );
    MountedWidgets {
        carousels,
        reels,
        playback,
    }
}

/// Read the optional settings override embedded in the page.
pub fn load_settings() -> WidgetSettings {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SETTINGS_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return WidgetSettings::default();
    };
    match WidgetSettings::from_json(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("{err}; using defaults");
            WidgetSettings::default()
        }
    }
}

pub(crate) fn report<T>(scope: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_absent_markup() => {
            tracing::debug!("{scope} not attached: {err}");
            None
        }
        Err(err) => {
            tracing::warn!("{scope} not attached: {err}");
            None
        }
    }
}

pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Like [`listen`], with an explicit `passive` flag. Handlers that call
/// `prevent_default` must be registered non-passive.
pub(crate) fn listen_passive<F>(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: F,
) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &options,
    )?;
    cb.forget();
    Ok(())
}

pub(crate) fn query_all(scope: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = scope.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn query_document(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Whether the event fired on or inside an element matching `selector`.
pub(crate) fn target_within(event: &Event, selector: &str) -> bool {
    event_element(event)
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

pub(crate) fn claim(element: &Element) -> Result<bool> {
    if element.has_attribute(ATTACHED_ATTR) {
        return Ok(false);
    }
    element.set_attribute(ATTACHED_ATTR, "")?;
    Ok(true)
}

pub(crate) fn missing(marker: &'static str) -> WidgetError {
    WidgetError::MissingElement(marker)
}
