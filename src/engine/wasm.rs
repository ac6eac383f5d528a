//! Bindings to the external compiled engine module
//!
//! The engine ships as a precompiled module whose loader script installs a
//! factory on the page. The factory resolves to a module instance once the
//! compiled code is ready; converter calls on the instance are synchronous
//! and raise on failure, so they are bound with `catch`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::engine::{ConverterEngine, EngineError};
use crate::models::{BrailleEncoding, ConvertOptions, OutputMode};

#[wasm_bindgen]
extern "C" {
    /// Instance handle of the loaded engine module
    pub type EngineModule;

    /// Factory installed by the engine loader script
    #[wasm_bindgen(js_name = createMusicEngine)]
    fn create_music_engine() -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = getVersionString)]
    fn get_version_string(this: &EngineModule) -> String;

    #[wasm_bindgen(method, js_name = musicxml2guidoVersion)]
    fn musicxml2guido_version(this: &EngineModule) -> String;

    #[wasm_bindgen(method, js_name = musicxml2lilypondVersion)]
    fn musicxml2lilypond_version(this: &EngineModule) -> String;

    #[wasm_bindgen(method, js_name = musicxml2brailleVersion)]
    fn musicxml2braille_version(this: &EngineModule) -> String;

    #[wasm_bindgen(method, catch, js_name = xmlTranspose)]
    fn xml_transpose(this: &EngineModule, xml: &str, semitones: i32) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = xml2guido)]
    fn xml2guido(this: &EngineModule, xml: &str, generate_bars: bool) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = xml2lilypond)]
    fn xml2lilypond(
        this: &EngineModule,
        xml: &str,
        absolute_octaves: bool,
    ) -> Result<String, JsValue>;

    #[wasm_bindgen(method, catch, js_name = xml2braille)]
    fn xml2braille(this: &EngineModule, xml: &str, use_utf16: bool) -> Result<String, JsValue>;
}

/// Extract a readable message from a thrown JavaScript value
fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// The real engine, reached through the bindings above
pub struct WasmEngine {
    module: EngineModule,
}

impl WasmEngine {
    /// Await the loader factory and wrap the resolved module instance
    pub async fn load() -> Result<Self, EngineError> {
        let module = JsFuture::from(create_music_engine())
            .await
            .map_err(|e| EngineError::Init(js_error_message(&e)))?;
        Ok(Self {
            module: module.unchecked_into(),
        })
    }
}

impl ConverterEngine for WasmEngine {
    fn version(&self) -> String {
        self.module.get_version_string()
    }

    fn converter_version(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Guido => self.module.musicxml2guido_version(),
            OutputMode::LilyPond => self.module.musicxml2lilypond_version(),
            OutputMode::Braille => self.module.musicxml2braille_version(),
        }
    }

    fn transpose(&self, xml: &str, semitones: i32) -> Result<String, EngineError> {
        self.module
            .xml_transpose(xml, semitones)
            .map_err(|e| EngineError::Transpose {
                semitones,
                message: js_error_message(&e),
            })
    }

    fn convert(
        &self,
        xml: &str,
        mode: OutputMode,
        options: &ConvertOptions,
    ) -> Result<String, EngineError> {
        let result = match mode {
            OutputMode::Guido => self.module.xml2guido(xml, options.guido_bars),
            OutputMode::LilyPond => self
                .module
                .xml2lilypond(xml, options.lilypond_absolute_octaves),
            OutputMode::Braille => self
                .module
                .xml2braille(xml, options.braille_encoding == BrailleEncoding::Utf16),
        };
        result.map_err(|e| EngineError::Conversion {
            mode,
            message: js_error_message(&e),
        })
    }
}
