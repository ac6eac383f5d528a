//! Output mode enumeration
//!
//! The converter targets exactly three output formats. Mode values arrive
//! from the page as control strings; anything unrecognized is a reported
//! configuration error, never a silent fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The selected output target format
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Guido Music Notation (".gmn")
    Guido,
    /// LilyPond typesetting source (".ly")
    LilyPond,
    /// Braille music (".brl")
    Braille,
}

/// Raised when a mode control carries a value outside the three known ones
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown output mode '{0}'")]
pub struct UnknownModeError(pub String);

impl OutputMode {
    /// All modes, in display order
    pub const ALL: [OutputMode; 3] = [OutputMode::Guido, OutputMode::LilyPond, OutputMode::Braille];

    /// Control value for this mode, the inverse of `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Guido => "guido",
            OutputMode::LilyPond => "lilypond",
            OutputMode::Braille => "braille",
        }
    }

    /// File suffix for downloaded output
    pub fn extension(&self) -> &'static str {
        match self {
            OutputMode::Guido => ".gmn",
            OutputMode::LilyPond => ".ly",
            OutputMode::Braille => ".brl",
        }
    }

    /// Element id of the options panel shown for this mode
    pub fn panel_id(&self) -> &'static str {
        match self {
            OutputMode::Guido => "guido-options",
            OutputMode::LilyPond => "lilypond-options",
            OutputMode::Braille => "braille-options",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Guido => write!(f, "Guido"),
            OutputMode::LilyPond => write!(f, "LilyPond"),
            OutputMode::Braille => write!(f, "braille"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guido" => Ok(OutputMode::Guido),
            "lilypond" => Ok(OutputMode::LilyPond),
            "braille" => Ok(OutputMode::Braille),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_per_mode() {
        assert_eq!(OutputMode::Guido.extension(), ".gmn");
        assert_eq!(OutputMode::LilyPond.extension(), ".ly");
        assert_eq!(OutputMode::Braille.extension(), ".brl");
    }

    #[test]
    fn test_parse_round_trip() {
        for mode in OutputMode::ALL {
            assert_eq!(mode.as_str().parse::<OutputMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let err = "midi".parse::<OutputMode>().unwrap_err();
        assert_eq!(err, UnknownModeError("midi".to_string()));
        assert!("".parse::<OutputMode>().is_err());
        // Control values are exact, not case-insensitive
        assert!("Guido".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_serialized_form_matches_control_values() {
        // State snapshots and the select control must agree on the spelling
        for mode in OutputMode::ALL {
            assert_eq!(
                serde_json::to_value(mode).unwrap(),
                serde_json::Value::String(mode.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_one_options_panel_per_mode() {
        for selected in OutputMode::ALL {
            let visible = OutputMode::ALL
                .iter()
                .filter(|mode| **mode == selected)
                .count();
            assert_eq!(visible, 1);
        }

        // Panel ids are distinct, so showing one can never show another
        let mut ids: Vec<_> = OutputMode::ALL.iter().map(|m| m.panel_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
