use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, TouchEvent, WheelEvent};

use super::{claim, listen, listen_passive, missing, query_all, target_within};
use crate::config::WidgetSettings;
use crate::error::{Result, WidgetError};
use crate::widgets::{
    reel_key_step, wheel_step, DragTracker, ReelIndex, ReelSurface, ScrollOutcome, Step,
    ACTIVE_CLASS, REELS_ROOT, REEL_ITEM,
};

struct DomReels {
    items: Vec<Element>,
}

impl ReelSurface for DomReels {
    fn set_reel_active(&self, index: usize, active: bool) {
        if let Some(item) = self.items.get(index) {
            let _ = item.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

#[derive(Clone)]
struct ReelsHandle {
    reels: Rc<RefCell<ReelIndex<DomReels>>>,
    lock_ms: u32,
}

impl ReelsHandle {
    /// Every input source ends up here. A started transition schedules its
    /// own unlock; the timer is never cancelled.
    fn scroll(&self, step: Step) {
        let outcome = self.reels.borrow_mut().handle_scroll(step);
        if let ScrollOutcome::Moved { .. } = outcome {
            let reels = self.reels.clone();
            Timeout::new(self.lock_ms, move || reels.borrow_mut().release_lock()).forget();
        }
    }
}

/// Attach the reels scroller to the first `.reels-container` in the document.
pub fn mount_reels(document: &Document, settings: &WidgetSettings) -> Result<()> {
    let root = document
        .query_selector(REELS_ROOT)?
        .ok_or_else(|| missing(REELS_ROOT))?;
    let items = query_all(&root, REEL_ITEM)?;
    if items.is_empty() {
        return Err(WidgetError::EmptySequence(REEL_ITEM));
    }
    if !claim(&root)? {
        return Ok(());
    }

    let count = items.len();
    let handle = ReelsHandle {
        reels: Rc::new(RefCell::new(ReelIndex::new(DomReels { items }, count)?)),
        lock_ms: settings.transition_lock_ms,
    };

    {
        let handle = handle.clone();
        listen_passive(document, "wheel", false, move |event| {
            if !target_within(&event, REELS_ROOT) {
                return;
            }
            event.prevent_default();
            let event: WheelEvent = event.unchecked_into();
            if let Some(step) = wheel_step(event.delta_y()) {
                handle.scroll(step);
            }
        })?;
    }

    let touch = Rc::new(RefCell::new(DragTracker::new()));
    {
        let touch = touch.clone();
        listen_passive(document, "touchstart", true, move |event| {
            if !target_within(&event, REELS_ROOT) {
                return;
            }
            let event: TouchEvent = event.unchecked_into();
            if let Some(t) = event.touches().item(0) {
                touch.borrow_mut().press(t.client_y() as f64);
            }
        })?;
    }
    listen_passive(document, "touchmove", false, move |event| {
        if target_within(&event, REELS_ROOT) {
            event.prevent_default();
        }
    })?;
    {
        let handle = handle.clone();
        let threshold = settings.swipe_threshold;
        listen_passive(document, "touchend", true, move |event| {
            if !touch.borrow().is_pressed() {
                return;
            }
            if !target_within(&event, REELS_ROOT) {
                touch.borrow_mut().cancel();
                return;
            }
            let event: TouchEvent = event.unchecked_into();
            let end = event.changed_touches().item(0).map(|t| t.client_y() as f64);
            let gesture = match end {
                Some(end) => touch.borrow_mut().release(end),
                None => {
                    touch.borrow_mut().cancel();
                    None
                }
            };
            if let Some(step) = gesture.and_then(|g| g.resolve(threshold)) {
                handle.scroll(step);
            }
        })?;
    }

    listen(document, "keydown", move |event| {
        if !target_within(&event, REELS_ROOT) {
            return;
        }
        let key = event.unchecked_ref::<KeyboardEvent>().key();
        if let Some(step) = reel_key_step(&key) {
            event.prevent_default();
            handle.scroll(step);
        }
    })?;

    tracing::debug!("reels attached with {count} items");
    Ok(())
}
