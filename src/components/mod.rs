//! The components module renders the demo feed the widgets attach to.

mod feed;
mod posts;
mod reels;

pub use feed::*;
pub use posts::*;
pub use reels::*;
