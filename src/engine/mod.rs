//! Converter engine boundary
//!
//! The conversion work (MusicXML parsing, transposition, code generation)
//! lives in an external precompiled module. This module pins down the call
//! surface the page relies on: version strings, transposition, and one
//! converter per output mode. `wasm` binds the real module; `scripted` is
//! the stand-in the test suite drives.

pub mod scripted;
pub mod wasm;

use thiserror::Error;

use crate::models::{ConvertOptions, OutputMode};

/// Errors surfaced by the engine boundary
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The compiled module failed to load or initialize
    #[error("engine initialization failed: {0}")]
    Init(String),

    /// The transposition call raised
    #[error("transposition by {semitones} failed: {message}")]
    Transpose { semitones: i32, message: String },

    /// A converter call raised
    #[error("{mode} conversion failed: {message}")]
    Conversion { mode: OutputMode, message: String },
}

/// The engine call surface consumed by the page
pub trait ConverterEngine {
    /// Engine library version string
    fn version(&self) -> String;

    /// Version string of the converter behind `mode`
    fn converter_version(&self, mode: OutputMode) -> String;

    /// Transpose MusicXML by a semitone count
    ///
    /// Callers skip this entirely for a count of 0; the source text must
    /// reach the converter unmodified in that case.
    fn transpose(&self, xml: &str, semitones: i32) -> Result<String, EngineError>;

    /// Convert MusicXML to the target format, forwarding the mode's option
    fn convert(
        &self,
        xml: &str,
        mode: OutputMode,
        options: &ConvertOptions,
    ) -> Result<String, EngineError>;
}
