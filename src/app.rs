//! Converter page controller
//!
//! Owns the application state, the engine handle, and the logger, and is
//! handed to every event handler. Control mutations rerun the conversion
//! when a source is loaded; the single error path logs the failure with the
//! offending file name and leaves the previous output untouched so the view
//! can flip to the log panel.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::engine::{ConverterEngine, EngineError};
use crate::logging::Logger;
use crate::models::{AppState, ConvertOptions, OutputMode, ScoreSource, UnknownModeError};

/// Outputs at or above this many bytes do not fit in a share URL
pub const SHARE_URL_LIMIT: usize = 2_000;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),

    #[error("no source loaded")]
    NoSource,
}

/// How to hand the generated text to the online editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Short enough to ride in the URL query
    Inline { content: String },
    /// Parked in local storage under its digest; only the key travels
    Stored { key: String, content: String },
}

/// Storage key for shared content: SHA-256 of the text, hex-encoded
pub fn content_key(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct XmlConverter {
    state: AppState,
    engine: Box<dyn ConverterEngine>,
    logger: Logger,
}

impl XmlConverter {
    pub fn new(engine: Box<dyn ConverterEngine>, logger: Logger) -> Self {
        Self {
            state: AppState::default(),
            engine,
            logger,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// One line naming the engine and each converter version
    pub fn version_banner(&self) -> String {
        format!(
            "engine {} (guido {}, lilypond {}, braille {})",
            self.engine.version(),
            self.engine.converter_version(OutputMode::Guido),
            self.engine.converter_version(OutputMode::LilyPond),
            self.engine.converter_version(OutputMode::Braille),
        )
    }

    /// Replace the loaded source and convert it
    pub fn load_source(&mut self, file_name: &str, text: String) -> Result<(), AppError> {
        self.logger
            .info(&format!("loading '{}' ({} bytes)", file_name, text.len()));
        self.state.source = Some(ScoreSource::new(file_name, text));
        self.convert()
    }

    pub fn set_mode(&mut self, mode: OutputMode) -> Result<(), AppError> {
        self.state.mode = mode;
        self.refresh()
    }

    pub fn set_options(&mut self, options: ConvertOptions) -> Result<(), AppError> {
        self.state.options = options;
        self.refresh()
    }

    pub fn set_transpose(&mut self, semitones: i32) -> Result<(), AppError> {
        self.state.transpose = semitones;
        self.refresh()
    }

    /// Font size only affects the display, never the conversion
    pub fn set_font_size(&mut self, points: u32) {
        self.state.font_size = points;
    }

    /// Rerun the conversion if a source is loaded; a no-op otherwise
    fn refresh(&mut self) -> Result<(), AppError> {
        if self.state.source.is_some() {
            self.convert()
        } else {
            Ok(())
        }
    }

    /// Convert the loaded source with the current mode and options
    pub fn convert(&mut self) -> Result<(), AppError> {
        let source = self.state.source.as_ref().ok_or(AppError::NoSource)?;
        let file_name = source.file_name.clone();
        let text = source.text.clone();

        match self.run_conversion(&text) {
            Ok(output) => {
                self.logger.info(&format!(
                    "{} generated from '{}' ({} bytes)",
                    self.state.mode,
                    file_name,
                    output.len()
                ));
                self.state.output = output;
                Ok(())
            }
            Err(err) => {
                self.logger
                    .error(&format!("conversion of '{}' failed: {}", file_name, err));
                Err(err.into())
            }
        }
    }

    fn run_conversion(&self, text: &str) -> Result<String, EngineError> {
        let transposed;
        let input = if self.state.transpose != 0 {
            transposed = self.engine.transpose(text, self.state.transpose)?;
            transposed.as_str()
        } else {
            text
        };
        self.engine
            .convert(input, self.state.mode, &self.state.options)
    }

    pub fn can_try_online(&self) -> bool {
        self.state.can_try_online()
    }

    pub fn output_file_name(&self) -> Option<String> {
        self.state.output_file_name()
    }

    /// Decide how the current output reaches the online editor
    pub fn share_action(&self) -> Option<ShareAction> {
        if !self.can_try_online() {
            return None;
        }
        let content = self.state.output.clone();
        if content.len() < SHARE_URL_LIMIT {
            Some(ShareAction::Inline { content })
        } else {
            let key = content_key(&content);
            Some(ShareAction::Stored { key, content })
        }
    }
}
