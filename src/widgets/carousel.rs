use crate::error::{Result, WidgetError};

use super::{GestureVector, Step};

pub const CAROUSEL_ROOT: &str = ".carousel-container";
pub const CAROUSEL_TRACK: &str = ".carousel-track";
pub const CAROUSEL_SLIDE: &str = ".carousel-slide";
pub const CAROUSEL_DOT: &str = ".carousel-dot";
pub const CAROUSEL_DOTS_CLASS: &str = "carousel-dots";

/// Where a carousel's visual updates land.
pub trait CarouselSurface {
    /// Translate the slide track horizontally by `percent` of its width.
    fn set_track_offset(&self, percent: i64);
    fn set_dot_active(&self, index: usize, active: bool);
}

/// How indicator dots are obtained for a carousel being attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPlan {
    /// No dots in markup: build one per slide.
    Generate(usize),
    /// Reuse the dots already rendered, matched to slides by position.
    Reuse { dots: usize, slides: usize },
}

impl IndicatorPlan {
    pub fn for_counts(slides: usize, existing_dots: usize) -> Self {
        if existing_dots == 0 {
            Self::Generate(slides)
        } else {
            Self::Reuse {
                dots: existing_dots,
                slides,
            }
        }
    }

    pub fn is_mismatched(&self) -> bool {
        matches!(self, Self::Reuse { dots, slides } if dots != slides)
    }
}

/// Horizontal track offset (in percent) that puts `index` in view.
pub fn slide_offset_percent(index: usize) -> i64 {
    -(index as i64) * 100
}

/// Circular index over a fixed set of slides.
pub struct SlideIndex<S: CarouselSurface> {
    surface: S,
    len: usize,
    current: usize,
}

impl<S: CarouselSurface> SlideIndex<S> {
    /// Attach to `len` slides. Dot 0 is marked active; the track is left
    /// where the markup put it.
    pub fn new(surface: S, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(WidgetError::EmptySequence(CAROUSEL_SLIDE));
        }
        let carousel = Self {
            surface,
            len,
            current: 0,
        };
        carousel.sync_dots();
        Ok(carousel)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.current = index;
        self.surface.set_track_offset(slide_offset_percent(index));
        self.sync_dots();
    }

    pub fn next(&mut self) {
        self.go_to((self.current + 1) % self.len);
    }

    pub fn prev(&mut self) {
        let target = if self.current == 0 {
            self.len - 1
        } else {
            self.current - 1
        };
        self.go_to(target);
    }

    pub fn step(&mut self, step: Step) {
        match step {
            Step::Forward => self.next(),
            Step::Backward => self.prev(),
        }
    }

    /// Apply a finished swipe or drag. Returns the step taken, if any.
    pub fn swipe(&mut self, gesture: GestureVector, threshold: f64) -> Option<Step> {
        let step = gesture.resolve(threshold)?;
        self.step(step);
        Some(step)
    }

    fn sync_dots(&self) {
        for index in 0..self.len {
            self.surface.set_dot_active(index, index == self.current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct RecordingSurface {
        offset: RefCell<Option<i64>>,
        active: RefCell<BTreeSet<usize>>,
    }

    impl CarouselSurface for RecordingSurface {
        fn set_track_offset(&self, percent: i64) {
            *self.offset.borrow_mut() = Some(percent);
        }

        fn set_dot_active(&self, index: usize, active: bool) {
            let mut dots = self.active.borrow_mut();
            if active {
                dots.insert(index);
            } else {
                dots.remove(&index);
            }
        }
    }

    fn carousel(len: usize) -> SlideIndex<RecordingSurface> {
        SlideIndex::new(RecordingSurface::default(), len).unwrap()
    }

    fn active_dots(c: &SlideIndex<RecordingSurface>) -> Vec<usize> {
        c.surface().active.borrow().iter().copied().collect()
    }

    #[test]
    fn empty_carousel_does_not_attach() {
        let err = SlideIndex::new(RecordingSurface::default(), 0).err().unwrap();
        assert_eq!(err, WidgetError::EmptySequence(CAROUSEL_SLIDE));
    }

    #[test]
    fn attach_marks_first_dot_without_moving_track() {
        let c = carousel(3);
        assert_eq!(c.current(), 0);
        assert_eq!(active_dots(&c), vec![0]);
        assert_eq!(*c.surface().offset.borrow(), None);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for len in 1..=7 {
            for start in 0..len {
                let mut c = carousel(len);
                c.go_to(start);
                for _ in 0..len {
                    c.next();
                }
                assert_eq!(c.current(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut c = carousel(3);
        c.prev();
        assert_eq!(c.current(), 2);
        c.next();
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn out_of_range_go_to_is_ignored() {
        let mut c = carousel(4);
        c.go_to(1);
        c.go_to(4);
        c.go_to(usize::MAX);
        assert_eq!(c.current(), 1);
        assert_eq!(active_dots(&c), vec![1]);
        assert_eq!(*c.surface().offset.borrow(), Some(-100));
    }

    #[test]
    fn dot_click_on_four_slides() {
        let mut c = carousel(4);
        c.go_to(2);
        assert_eq!(c.current(), 2);
        assert_eq!(*c.surface().offset.borrow(), Some(-200));
        assert_eq!(active_dots(&c), vec![2]);
    }

    #[test]
    fn swipe_left_advances_and_short_swipe_is_ignored() {
        let mut c = carousel(3);
        assert_eq!(c.swipe(GestureVector::new(300.0, 100.0), 50.0), Some(Step::Forward));
        assert_eq!(c.current(), 1);
        assert_eq!(c.swipe(GestureVector::new(100.0, 140.0), 50.0), None);
        assert_eq!(c.current(), 1);
        assert_eq!(c.swipe(GestureVector::new(100.0, 300.0), 50.0), Some(Step::Backward));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut c = carousel(1);
        c.next();
        c.prev();
        assert_eq!(c.current(), 0);
        assert_eq!(*c.surface().offset.borrow(), Some(0));
    }

    #[test]
    fn indicator_plan() {
        assert_eq!(IndicatorPlan::for_counts(4, 0), IndicatorPlan::Generate(4));
        let reuse = IndicatorPlan::for_counts(4, 4);
        assert_eq!(reuse, IndicatorPlan::Reuse { dots: 4, slides: 4 });
        assert!(!reuse.is_mismatched());
        assert!(IndicatorPlan::for_counts(4, 3).is_mismatched());
    }
}
