//! Output configuration types

const DEFAULT_TITLE: &str = "Tasks";

/// Configuration for rendering.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Colour console output.
    pub use_color: bool,
    /// Document title for OPML and HTML.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
