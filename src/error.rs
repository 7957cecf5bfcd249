use thiserror::Error;

/// Failures a widget can run into while attaching to or driving the page.
///
/// None of these cross a widget boundary: they are logged where they happen
/// and the widget carries on (or stays detached).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("structural element `{0}` not found")]
    MissingElement(&'static str),

    #[error("`{0}` contains no items")]
    EmptySequence(&'static str),

    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("media failed to load: {0}")]
    MediaLoad(String),

    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("invalid widget settings: {0}")]
    Config(String),
}

impl WidgetError {
    /// Missing markup is expected on pages that don't host a widget.
    pub fn is_absent_markup(&self) -> bool {
        matches!(self, Self::MissingElement(_) | Self::EmptySequence(_))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WidgetError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Dom(message)
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
