use crate::error::{Result, WidgetError};

use super::Step;

pub const REELS_ROOT: &str = ".reels-container";
pub const REEL_ITEM: &str = ".reel";

/// Where reel activation lands.
pub trait ReelSurface {
    fn set_reel_active(&self, index: usize, active: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Transition started; the caller must schedule [`ReelIndex::release_lock`].
    Moved { from: usize, to: usize },
    /// A previous transition still holds the lock.
    Locked,
    /// Already at the first or last reel.
    OutOfRange,
}

/// Clamped index over full-viewport reels, gated by a transition lock.
///
/// The lock is released by a fixed-delay timer, not by the end of the visual
/// transition.
pub struct ReelIndex<S: ReelSurface> {
    surface: S,
    len: usize,
    current: usize,
    locked: bool,
}

impl<S: ReelSurface> ReelIndex<S> {
    pub fn new(surface: S, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(WidgetError::EmptySequence(REEL_ITEM));
        }
        let reels = Self {
            surface,
            len,
            current: 0,
            locked: false,
        };
        reels.show(0);
        Ok(reels)
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

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn handle_scroll(&mut self, step: Step) -> ScrollOutcome {
        if self.locked {
            return ScrollOutcome::Locked;
        }
        let Some(target) = self
            .current
            .checked_add_signed(step.delta())
            .filter(|&i| i < self.len)
        else {
            return ScrollOutcome::OutOfRange;
        };

        let from = self.current;
        self.locked = true;
        self.current = target;
        self.show(target);
        tracing::debug!("reel {from} -> {target}");
        ScrollOutcome::Moved { from, to: target }
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    fn show(&self, index: usize) {
        for i in 0..self.len {
            self.surface.set_reel_active(i, i == index);
        }
    }
}
