//! Target-independent widget state machines.
//!
//! Each widget owns its index/playback state and reports visual changes
//! through a surface trait, so the page binding stays a thin adapter.

mod carousel;
mod gesture;
mod playback;
mod reels;

pub use carousel::*;
pub use gesture::*;
pub use playback::*;
pub use reels::*;

/// Class toggled on the active slide dot and the active reel.
pub const ACTIVE_CLASS: &str = "active";
