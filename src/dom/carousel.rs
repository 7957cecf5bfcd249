use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

use super::{claim, listen, missing, query_all, query_document};
use crate::config::WidgetSettings;
use crate::error::{Result, WidgetError};
use crate::widgets::{
    carousel_key_step, CarouselSurface, DragTracker, IndicatorPlan, SlideIndex, ACTIVE_CLASS,
    CAROUSEL_DOT, CAROUSEL_DOTS_CLASS, CAROUSEL_ROOT, CAROUSEL_SLIDE, CAROUSEL_TRACK,
};

struct DomCarousel {
    track: HtmlElement,
    dots: Vec<Element>,
}

impl CarouselSurface for DomCarousel {
    fn set_track_offset(&self, percent: i64) {
        let _ = self
            .track
            .style()
            .set_property("transform", &format!("translateX({percent}%)"));
    }

    fn set_dot_active(&self, index: usize, active: bool) {
        if let Some(dot) = self.dots.get(index) {
            let _ = dot.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }
}

type SharedCarousel = Rc<RefCell<SlideIndex<DomCarousel>>>;

/// Attach a carousel to every `.carousel-container` in the document and
/// return how many were attached.
pub fn mount_carousels(document: &Document, settings: &WidgetSettings) -> usize {
    let roots = match query_document(document, CAROUSEL_ROOT) {
        Ok(roots) => roots,
        Err(err) => {
            tracing::warn!("carousel lookup failed: {err}");
            return 0;
        }
    };
    roots
        .into_iter()
        .filter_map(|root| super::report("carousel", mount_carousel(document, root, settings)))
        .filter(|attached| *attached)
        .count()
}

fn mount_carousel(document: &Document, root: Element, settings: &WidgetSettings) -> Result<bool> {
    let track = root
        .query_selector(CAROUSEL_TRACK)?
        .ok_or_else(|| missing(CAROUSEL_TRACK))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| missing(CAROUSEL_TRACK))?;
    let slides = query_all(&root, CAROUSEL_SLIDE)?.len();
    if slides == 0 {
        return Err(WidgetError::EmptySequence(CAROUSEL_SLIDE));
    }
    if !claim(&root)? {
        return Ok(false);
    }

    let existing = query_all(&root, CAROUSEL_DOT)?;
    let plan = IndicatorPlan::for_counts(slides, existing.len());
    if plan.is_mismatched() {
        tracing::warn!(
            "carousel has {} dots for {slides} slides; reusing them by position",
            existing.len()
        );
    }
    let dots = match plan {
        IndicatorPlan::Generate(count) => build_dots(document, &root, count)?,
        IndicatorPlan::Reuse { .. } => existing,
    };

    let carousel: SharedCarousel = Rc::new(RefCell::new(SlideIndex::new(
        DomCarousel {
            track,
            dots: dots.clone(),
        },
        slides,
    )?));
    bind_gestures(&root, &carousel, settings.swipe_threshold)?;
    bind_dots(&dots, &carousel)?;
    bind_keys(document, &root, &carousel)?;

    tracing::debug!("carousel attached with {slides} slides");
    Ok(true)
}

fn build_dots(document: &Document, root: &Element, count: usize) -> Result<Vec<Element>> {
    let container = document.create_element("div")?;
    container.set_class_name(CAROUSEL_DOTS_CLASS);
    let mut dots = Vec::with_capacity(count);
    for index in 0..count {
        let dot = document.create_element("div")?;
        dot.set_class_name(CAROUSEL_DOT.trim_start_matches('.'));
        dot.set_attribute("data-index", &index.to_string())?;
        container.append_child(&dot)?;
        dots.push(dot);
    }
    root.append_child(&container)?;
    Ok(dots)
}

fn bind_gestures(root: &Element, carousel: &SharedCarousel, threshold: f64) -> Result<()> {
    let touch = Rc::new(RefCell::new(DragTracker::new()));
    {
        let touch = touch.clone();
        listen(root, "touchstart", move |event| {
            let event: TouchEvent = event.unchecked_into();
            if let Some(t) = event.touches().item(0) {
                touch.borrow_mut().press(t.client_x() as f64);
            }
        })?;
    }
    {
        let carousel = carousel.clone();
        listen(root, "touchend", move |event| {
            let event: TouchEvent = event.unchecked_into();
            let Some(t) = event.changed_touches().item(0) else {
                touch.borrow_mut().cancel();
                return;
            };
            if let Some(gesture) = touch.borrow_mut().release(t.client_x() as f64) {
                carousel.borrow_mut().swipe(gesture, threshold);
            }
        })?;
    }

    let drag = Rc::new(RefCell::new(DragTracker::new()));
    {
        let drag = drag.clone();
        listen(root, "mousedown", move |event| {
            let event: MouseEvent = event.unchecked_into();
            drag.borrow_mut().press(event.client_x() as f64);
        })?;
    }
    {
        let drag = drag.clone();
        let carousel = carousel.clone();
        listen(root, "mouseup", move |event| {
            let event: MouseEvent = event.unchecked_into();
            if let Some(gesture) = drag.borrow_mut().release(event.client_x() as f64) {
                carousel.borrow_mut().swipe(gesture, threshold);
            }
        })?;
    }
    listen(root, "mouseleave", move |_| drag.borrow_mut().cancel())?;
    Ok(())
}

fn bind_dots(dots: &[Element], carousel: &SharedCarousel) -> Result<()> {
    for (index, dot) in dots.iter().enumerate() {
        let carousel = carousel.clone();
        listen(dot, "click", move |_| carousel.borrow_mut().go_to(index))?;
    }
    Ok(())
}

fn bind_keys(document: &Document, root: &Element, carousel: &SharedCarousel) -> Result<()> {
    let root = root.clone();
    let carousel = carousel.clone();
    let doc = document.clone();
    listen(document, "keydown", move |event| {
        let focused = doc
            .active_element()
            .is_some_and(|el| root.contains(Some(el.as_ref())));
        let targeted =
            super::event_element(&event).is_some_and(|el| root.contains(Some(el.as_ref())));
        if !focused && !targeted {
            return;
        }
        let event: KeyboardEvent = event.unchecked_into();
        if let Some(step) = carousel_key_step(&event.key()) {
            carousel.borrow_mut().step(step);
        }
    })
}
