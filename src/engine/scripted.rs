//! Scripted engine used by the test suite
//!
//! Behaves like the real module but runs natively: converter calls return
//! canned text derived from their input, failures can be injected per call
//! kind, and every call is recorded for assertions. Handles are cheap
//! clones over shared internals, so a test can keep one while the
//! controller owns another.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{ConverterEngine, EngineError};
use crate::models::{ConvertOptions, OutputMode};

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Transpose { xml: String, semitones: i32 },
    Convert { xml: String, mode: OutputMode },
}

#[derive(Default)]
struct Inner {
    fail_transpose: RefCell<Option<String>>,
    fail_convert: RefCell<Option<String>>,
    calls: RefCell<Vec<EngineCall>>,
}

/// Canned engine for native tests
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    inner: Rc<Inner>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `transpose` calls fail, or clear with `None`
    pub fn set_fail_transpose(&self, message: Option<&str>) {
        *self.inner.fail_transpose.borrow_mut() = message.map(str::to_string);
    }

    /// Make the next `convert` calls fail, or clear with `None`
    pub fn set_fail_convert(&self, message: Option<&str>) {
        *self.inner.fail_convert.borrow_mut() = message.map(str::to_string);
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.calls.borrow().clone()
    }

    /// The canned output `convert` produces for an input
    pub fn expected_output(xml: &str, mode: OutputMode, options: &ConvertOptions) -> String {
        let option = match mode {
            OutputMode::Guido => options.guido_bars.to_string(),
            OutputMode::LilyPond => options.lilypond_absolute_octaves.to_string(),
            OutputMode::Braille => options.braille_encoding.as_str().to_string(),
        };
        format!("{}({}, {})", mode.as_str(), xml, option)
    }

    /// The canned output `transpose` produces for an input
    pub fn expected_transposed(xml: &str, semitones: i32) -> String {
        format!("transposed({}, {})", xml, semitones)
    }
}

impl ConverterEngine for ScriptedEngine {
    fn version(&self) -> String {
        "scripted 0.0".to_string()
    }

    fn converter_version(&self, _mode: OutputMode) -> String {
        "0.0".to_string()
    }

    fn transpose(&self, xml: &str, semitones: i32) -> Result<String, EngineError> {
        self.inner.calls.borrow_mut().push(EngineCall::Transpose {
            xml: xml.to_string(),
            semitones,
        });
        if let Some(message) = self.inner.fail_transpose.borrow().as_ref() {
            return Err(EngineError::Transpose {
                semitones,
                message: message.clone(),
            });
        }
        Ok(Self::expected_transposed(xml, semitones))
    }

    fn convert(
        &self,
        xml: &str,
        mode: OutputMode,
        options: &ConvertOptions,
    ) -> Result<String, EngineError> {
        self.inner.calls.borrow_mut().push(EngineCall::Convert {
            xml: xml.to_string(),
            mode,
        });
        if let Some(message) = self.inner.fail_convert.borrow().as_ref() {
            return Err(EngineError::Conversion {
                mode,
                message: message.clone(),
            });
        }
        Ok(Self::expected_output(xml, mode, options))
    }
}
