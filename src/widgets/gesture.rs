/// One navigation step along a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

impl Step {
    pub fn delta(self) -> isize {
        match self {
            Step::Forward => 1,
            Step::Backward => -1,
        }
    }
}

/// Start/end coordinates of a single swipe or drag along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureVector {
    pub start: f64,
    pub end: f64,
}

impl GestureVector {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Travel must strictly exceed `threshold`. Moving toward lower
    /// coordinates (left, or up) advances.
    pub fn resolve(self, threshold: f64) -> Option<Step> {
        let diff = self.start - self.end;
        if diff.abs() <= threshold {
            return None;
        }
        if diff > 0.0 {
            Some(Step::Forward)
        } else {
            Some(Step::Backward)
        }
    }
}

/// Press/release tracker for pointer drags and touches.
///
/// A release only yields a gesture when a press is pending, and
/// [`DragTracker::cancel`] drops the pending press (pointer left the region).
#[derive(Debug, Clone, Copy, Default)]
pub struct DragTracker {
    origin: Option<f64>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, at: f64) {
        self.origin = Some(at);
    }

    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    pub fn release(&mut self, at: f64) -> Option<GestureVector> {
        self.origin.take().map(|start| GestureVector::new(start, at))
    }
}

/// Arrow keys on a horizontal carousel.
pub fn carousel_key_step(key: &str) -> Option<Step> {
    match key {
        "ArrowRight" => Some(Step::Forward),
        "ArrowLeft" => Some(Step::Backward),
        _ => None,
    }
}

/// Keys that page through the reels feed.
pub fn reel_key_step(key: &str) -> Option<Step> {
    match key {
        "ArrowDown" | "PageDown" => Some(Step::Forward),
        "ArrowUp" | "PageUp" => Some(Step::Backward),
        _ => None,
    }
}

/// Wheel motion pages by the sign of the vertical delta.
pub fn wheel_step(delta_y: f64) -> Option<Step> {
    if delta_y > 0.0 {
        Some(Step::Forward)
    } else if delta_y < 0.0 {
        Some(Step::Backward)
    } else {
        None
    }
}
