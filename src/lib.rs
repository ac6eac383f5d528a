//! MusicXML Converter WASM Module
//!
//! Browser front-end for converting MusicXML scores to Guido notation,
//! LilyPond source, or braille music. The conversion engine itself is an
//! external precompiled module; this crate owns the page state, the event
//! wiring, and the log mirroring around it.

pub mod app;
pub mod engine;
pub mod logging;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use app::{ShareAction, XmlConverter};
pub use models::{AppState, BrailleEncoding, ConvertOptions, OutputMode, ScoreSource};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("MusicXML converter WASM module initialized");

    wasm_bindgen_futures::spawn_local(ui::boot());
}
