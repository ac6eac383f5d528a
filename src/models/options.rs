//! Per-mode converter options
//!
//! Each converter takes a single option forwarded from its panel on the
//! page. The option set is kept whole in the state so switching modes does
//! not lose what the user picked for the other panels.

use serde::{Deserialize, Serialize};

/// Braille output encoding
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BrailleEncoding {
    Utf8,
    Utf16,
}

impl BrailleEncoding {
    /// Control value for the encoding select
    pub fn as_str(&self) -> &'static str {
        match self {
            BrailleEncoding::Utf8 => "utf8",
            BrailleEncoding::Utf16 => "utf16",
        }
    }
}

/// Options forwarded to the converters, one per mode
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Guido: generate explicit bars
    pub guido_bars: bool,
    /// LilyPond: absolute octave entry instead of relative
    pub lilypond_absolute_octaves: bool,
    /// Braille: output encoding
    pub braille_encoding: BrailleEncoding,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            guido_bars: false,
            lilypond_absolute_octaves: false,
            braille_encoding: BrailleEncoding::Utf8,
        }
    }
}
