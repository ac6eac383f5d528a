//! Application state
//!
//! The page-wide state object, owned by the controller and passed to event
//! handlers instead of living in ambient globals. Derived UI flags (download
//! name, "try online" availability) are recomputed from here on demand.

use serde::{Deserialize, Serialize};

use crate::models::{ConvertOptions, OutputMode};

/// Default output font size in points
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// A loaded MusicXML source
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreSource {
    /// File name as dropped, possibly with a path prefix
    pub file_name: String,
    /// Raw MusicXML text
    pub text: String,
}

impl ScoreSource {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    /// File name with any directory prefix and final extension stripped
    pub fn base_name(&self) -> &str {
        let name = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name);
        match name.rfind('.') {
            // A leading dot is a hidden-file marker, not an extension
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }
}

/// Complete converter page state
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AppState {
    /// The source being converted, if one was loaded
    pub source: Option<ScoreSource>,

    /// Current output target format
    pub mode: OutputMode,

    /// Per-mode converter options
    pub options: ConvertOptions,

    /// Semitone count applied before conversion; 0 leaves the source alone
    pub transpose: i32,

    /// Output display font size in points
    pub font_size: u32,

    /// Last successfully generated output text
    pub output: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: None,
            mode: OutputMode::Guido,
            options: ConvertOptions::default(),
            transpose: 0,
            font_size: DEFAULT_FONT_SIZE,
            output: String::new(),
        }
    }
}

impl AppState {
    /// Source text, empty when nothing is loaded
    pub fn source_text(&self) -> &str {
        self.source.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }

    /// The "try online" hand-off needs both a source and a rendered output
    pub fn can_try_online(&self) -> bool {
        !self.source_text().is_empty() && !self.output.is_empty()
    }

    /// Download name: source base name plus the mode suffix
    pub fn output_file_name(&self) -> Option<String> {
        self.source
            .as_ref()
            .map(|s| format!("{}{}", s.base_name(), self.mode.extension()))
    }
}
