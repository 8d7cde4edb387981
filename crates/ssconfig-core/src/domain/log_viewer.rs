//! Appearance settings for the log viewer window.
//!
//! The presentation layer owns the window itself; this sub-document only
//! stores what it needs to restore the window between runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::wire::null_as_default;

const DEFAULT_FONT_NAME: &str = "Consolas";
const DEFAULT_FONT_SIZE: f32 = 8.0;
const DEFAULT_BG_COLOR: &str = "black";
const DEFAULT_TEXT_COLOR: &str = "white";
const DEFAULT_WIDTH: i32 = 600;
const DEFAULT_HEIGHT: i32 = 400;

/// Persisted log viewer preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogViewerConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub font_name: String,
    /// Non-finite sizes are written as `null`; that decodes to `0.0` and is
    /// reset by [`check_config`](Self::check_config).
    #[serde(deserialize_with = "null_as_default")]
    pub font_size: f32,
    /// Background colour name or `#rrggbb`.
    #[serde(deserialize_with = "null_as_default")]
    pub bg_color: String,
    /// Foreground colour name or `#rrggbb`.
    #[serde(deserialize_with = "null_as_default")]
    pub text_color: String,
    pub top_most: bool,
    pub wrap_text: bool,
    pub toolbar_shown: bool,
    pub width: i32,
    pub height: i32,
    pub maximized: bool,
}

impl Default for LogViewerConfig {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            bg_color: DEFAULT_BG_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            top_most: false,
            wrap_text: false,
            toolbar_shown: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            maximized: true,
        }
    }
}

impl LogViewerConfig {
    /// Resets any value the window cannot be restored from.
    ///
    /// Idempotent; toggles are never touched.
    pub fn check_config(&mut self) {
        if self.font_name.trim().is_empty() {
            debug!("log viewer: blank font name, using default");
            self.font_name = DEFAULT_FONT_NAME.to_string();
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            debug!(font_size = self.font_size, "log viewer: invalid font size, using default");
            self.font_size = DEFAULT_FONT_SIZE;
        }
        if self.bg_color.trim().is_empty() {
            self.bg_color = DEFAULT_BG_COLOR.to_string();
        }
        if self.text_color.trim().is_empty() {
            self.text_color = DEFAULT_TEXT_COLOR.to_string();
        }
        if self.width <= 0 || self.height <= 0 {
            debug!(
                width = self.width,
                height = self.height,
                "log viewer: invalid window size, using default"
            );
            self.width = DEFAULT_WIDTH;
            self.height = DEFAULT_HEIGHT;
        }
    }
}
