//! Models module for the MusicXML converter
//!
//! Data types for the converter page: the output mode enumeration, the
//! per-mode converter options, and the application state with its derived
//! UI flags.

pub mod mode;
pub mod options;
pub mod state;

// Re-export commonly used types
pub use mode::{OutputMode, UnknownModeError};
pub use options::{BrailleEncoding, ConvertOptions};
pub use state::{AppState, ScoreSource};
