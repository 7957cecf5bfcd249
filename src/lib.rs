//! Feed widgets: an image carousel, a vertically paged reels scroller and a
//! video playback manager, bound to pre-rendered markup in the browser.
//!
//! The state machines in [`widgets`] are target independent and talk to the
//! page through small traits. The [`dom`] module (wasm32 only) implements
//! those traits over `web-sys` and wires the browser events.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use config::WidgetSettings;
pub use error::WidgetError;
