//! Page wiring
//!
//! Resolves the page elements once at boot, owns the controller, and
//! installs the drag/drop and form-control listeners. Listener and file
//! reader handles live in the `App` struct so they stay registered for the
//! page lifetime.

pub mod download;
pub mod dropzone;
pub mod share;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::file::callbacks::FileReader;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, DragEvent, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
};

use crate::app::{AppError, XmlConverter};
use crate::engine::wasm::WasmEngine;
use crate::engine::ConverterEngine;
use crate::logging::{ConsoleSink, Logger, PanelSink};
use crate::models::state::DEFAULT_FONT_SIZE;
use crate::models::{BrailleEncoding, ConvertOptions, OutputMode};

use dropzone::DropPayload;

// Element ids the page provides
const ID_MODE: &str = "output-mode";
const ID_GUIDO_BARS: &str = "guido-bars";
const ID_LILYPOND_ABSOLUTE: &str = "lilypond-absolute";
const ID_BRAILLE_ENCODING: &str = "braille-encoding";
const ID_TRANSPOSE: &str = "transpose";
const ID_FONT_SIZE: &str = "font-size";
const ID_CODE: &str = "code";
const ID_LOGS: &str = "logs";
const ID_CODE_VIEW: &str = "code-view";
const ID_LOG_VIEW: &str = "log-view";
const ID_SCORE_NAME: &str = "score-name";
const ID_VERSION: &str = "version";
const ID_DOWNLOAD: &str = "download";
const ID_TRY_ONLINE: &str = "try-online";

/// Name given to a plain-text drop that did not come from a file
const PASTED_SCORE_NAME: &str = "untitled.xml";

/// Entry point spawned from module start: load the engine, then wire the page
pub async fn boot() {
    let engine = match WasmEngine::load().await {
        Ok(engine) => engine,
        Err(err) => {
            web_sys::console::error_1(&err.to_string().into());
            return;
        }
    };
    if let Err(err) = start_app(Box::new(engine)) {
        web_sys::console::error_1(&err);
    }
}

fn start_app(engine: Box<dyn ConverterEngine>) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let app = App::new(document, engine)?;
    app.install_listeners();
    app.render_initial();

    // Page-lifetime object; the listener handles it owns must never drop
    std::mem::forget(app);
    Ok(())
}

/// Resolve an element by id to the expected concrete kind
fn require<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has the wrong kind", id)))
}

pub struct App {
    document: Document,
    converter: RefCell<XmlConverter>,

    code_el: HtmlElement,
    code_view: HtmlElement,
    log_view: HtmlElement,
    score_name_el: HtmlElement,
    version_el: HtmlElement,
    option_panels: Vec<(OutputMode, HtmlElement)>,

    mode_select: HtmlSelectElement,
    guido_bars: HtmlInputElement,
    lilypond_absolute: HtmlInputElement,
    braille_encoding: HtmlSelectElement,
    transpose_input: HtmlInputElement,
    font_size_input: HtmlInputElement,
    download_button: HtmlButtonElement,
    try_online_button: HtmlButtonElement,

    listeners: RefCell<Vec<EventListener>>,
    readers: RefCell<Vec<FileReader>>,
}

impl App {
    pub fn new(document: Document, engine: Box<dyn ConverterEngine>) -> Result<Rc<Self>, JsValue> {
        let logs_el: HtmlElement = require(&document, ID_LOGS)?;

        let mut logger = Logger::new();
        logger.attach(Rc::new(ConsoleSink));
        logger.attach(Rc::new(PanelSink::new(logs_el)));
        let converter = XmlConverter::new(engine, logger);

        let mut option_panels = Vec::new();
        for mode in OutputMode::ALL {
            option_panels.push((mode, require::<HtmlElement>(&document, mode.panel_id())?));
        }

        let app = Rc::new(Self {
            code_el: require(&document, ID_CODE)?,
            code_view: require(&document, ID_CODE_VIEW)?,
            log_view: require(&document, ID_LOG_VIEW)?,
            score_name_el: require(&document, ID_SCORE_NAME)?,
            version_el: require(&document, ID_VERSION)?,
            option_panels,
            mode_select: require(&document, ID_MODE)?,
            guido_bars: require(&document, ID_GUIDO_BARS)?,
            lilypond_absolute: require(&document, ID_LILYPOND_ABSOLUTE)?,
            braille_encoding: require(&document, ID_BRAILLE_ENCODING)?,
            transpose_input: require(&document, ID_TRANSPOSE)?,
            font_size_input: require(&document, ID_FONT_SIZE)?,
            download_button: require(&document, ID_DOWNLOAD)?,
            try_online_button: require(&document, ID_TRY_ONLINE)?,
            converter: RefCell::new(converter),
            document,
            listeners: RefCell::new(Vec::new()),
            readers: RefCell::new(Vec::new()),
        });

        app.sync_state_from_controls();
        Ok(app)
    }

    /// Take the control values present in the page as the starting state
    fn sync_state_from_controls(&self) {
        let mut converter = self.converter.borrow_mut();
        match self.mode_select.value().parse::<OutputMode>() {
            Ok(mode) => {
                let _ = converter.set_mode(mode);
            }
            Err(err) => converter.logger().error(&err.to_string()),
        }
        let _ = converter.set_options(self.read_options());
        let _ = converter.set_transpose(self.read_transpose());
        converter.set_font_size(self.read_font_size());
    }

    fn read_options(&self) -> ConvertOptions {
        ConvertOptions {
            guido_bars: self.guido_bars.checked(),
            lilypond_absolute_octaves: self.lilypond_absolute.checked(),
            braille_encoding: if self.braille_encoding.value() == "utf16" {
                BrailleEncoding::Utf16
            } else {
                BrailleEncoding::Utf8
            },
        }
    }

    fn read_transpose(&self) -> i32 {
        self.transpose_input.value().trim().parse().unwrap_or(0)
    }

    fn read_font_size(&self) -> u32 {
        self.font_size_input
            .value()
            .trim()
            .parse()
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// First paint: versions, panels for the current mode, derived flags
    pub fn render_initial(&self) {
        let converter = self.converter.borrow();
        let banner = converter.version_banner();
        self.version_el.set_text_content(Some(&banner));
        converter.logger().info(&banner);

        let mode = converter.state().mode;
        let font_size = converter.state().font_size;
        drop(converter);

        self.update_option_panels(mode);
        self.apply_font_size(font_size);
        self.show_code_view();
        self.sync_derived();
    }

    pub fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let app = Rc::clone(self);
        listeners.push(EventListener::new(&self.mode_select, "change", move |_| {
            app.on_mode_change();
        }));

        let option_targets: [&web_sys::EventTarget; 3] = [
            self.guido_bars.as_ref(),
            self.lilypond_absolute.as_ref(),
            self.braille_encoding.as_ref(),
        ];
        for target in option_targets {
            let app = Rc::clone(self);
            listeners.push(EventListener::new(target, "change", move |_| {
                app.on_options_change();
            }));
        }

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.transpose_input,
            "change",
            move |_| {
                app.on_transpose_change();
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.font_size_input,
            "change",
            move |_| {
                app.on_font_size_change();
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.download_button,
            "click",
            move |_| {
                app.on_download();
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(
            &self.try_online_button,
            "click",
            move |_| {
                app.on_try_online();
            },
        ));

        // The whole page is the drop target; dragover must be cancelled for
        // the drop event to fire at all
        listeners.push(EventListener::new_with_options(
            &self.document,
            "dragover",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event| {
                event.prevent_default();
            },
        ));

        let app = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.document,
            "drop",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event| {
                if let Some(event) = event.dyn_ref::<DragEvent>() {
                    app.on_drop(event);
                }
            },
        ));

        *self.listeners.borrow_mut() = listeners;
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    fn on_mode_change(self: &Rc<Self>) {
        match self.mode_select.value().parse::<OutputMode>() {
            Ok(mode) => {
                let result = self.converter.borrow_mut().set_mode(mode);
                self.update_option_panels(mode);
                self.finish_conversion(result);
            }
            Err(err) => {
                self.converter.borrow().logger().error(&err.to_string());
                self.show_log_view();
            }
        }
    }

    fn on_options_change(self: &Rc<Self>) {
        let options = self.read_options();
        let result = self.converter.borrow_mut().set_options(options);
        self.finish_conversion(result);
    }

    fn on_transpose_change(self: &Rc<Self>) {
        let result = self.converter.borrow_mut().set_transpose(self.read_transpose());
        self.finish_conversion(result);
    }

    fn on_font_size_change(&self) {
        let points = self.read_font_size();
        self.converter.borrow_mut().set_font_size(points);
        self.apply_font_size(points);
    }

    fn on_download(&self) {
        let converter = self.converter.borrow();
        let file_name = converter.output_file_name();
        let output = converter.state().output.clone();
        drop(converter);

        let Some(file_name) = file_name else { return };
        if output.is_empty() {
            return;
        }
        if let Err(err) = download::trigger_download(&self.document, &file_name, &output) {
            self.converter
                .borrow()
                .logger()
                .error(&format!("download failed: {:?}", err));
        }
    }

    fn on_try_online(&self) {
        let action = self.converter.borrow().share_action();
        let Some(action) = action else { return };

        if let Err(err) = share::open_in_editor(action) {
            self.converter
                .borrow()
                .logger()
                .error(&format!("editor hand-off failed: {:?}", err));
            self.show_log_view();
        }
    }

    fn on_drop(self: &Rc<Self>, event: &DragEvent) {
        event.prevent_default();
        let Some(data) = event.data_transfer() else {
            return;
        };

        let text = data.get_data("text").unwrap_or_default();
        let files: Vec<web_sys::File> = data
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();

        match dropzone::classify(text, files) {
            DropPayload::Text(text) => self.load_text(PASTED_SCORE_NAME, text),
            DropPayload::Files(files) => {
                for file in files {
                    self.read_file(file);
                }
            }
            DropPayload::Empty => {}
        }
    }

    // ========================================================================
    // Conversion plumbing
    // ========================================================================

    /// Read a dropped file, then convert it from the completion callback
    fn read_file(self: &Rc<Self>, file: web_sys::File) {
        let name = file.name();
        let file = gloo::file::File::from(file);
        let app = Rc::clone(self);
        let reader = gloo::file::callbacks::read_as_text(&file, move |result| {
            match result {
                Ok(text) => app.load_text(&name, text),
                Err(err) => {
                    app.converter
                        .borrow()
                        .logger()
                        .error(&format!("reading '{}' failed: {}", name, err));
                    app.show_log_view();
                }
            }
        });
        self.readers.borrow_mut().push(reader);
    }

    fn load_text(self: &Rc<Self>, file_name: &str, text: String) {
        let result = self.converter.borrow_mut().load_source(file_name, text);
        self.finish_conversion(result);
    }

    /// Apply a conversion outcome to the page
    fn finish_conversion(&self, result: Result<(), AppError>) {
        match result {
            Ok(()) => {
                let converter = self.converter.borrow();
                self.code_el
                    .set_text_content(Some(&converter.state().output));
                drop(converter);
                self.show_code_view();
            }
            Err(_) => {
                // Already logged by the controller; the code panel keeps
                // whatever it was showing
                self.show_log_view();
            }
        }
        self.sync_derived();
    }

    fn sync_derived(&self) {
        let converter = self.converter.borrow();
        self.try_online_button
            .set_disabled(!converter.can_try_online());
        let name = converter
            .state()
            .source
            .as_ref()
            .map(|s| s.file_name.clone());
        self.score_name_el.set_text_content(name.as_deref());
    }

    // ========================================================================
    // View helpers
    // ========================================================================

    fn update_option_panels(&self, mode: OutputMode) {
        for (candidate, panel) in &self.option_panels {
            set_visible(panel, *candidate == mode);
        }
    }

    fn apply_font_size(&self, points: u32) {
        let _ = self
            .code_el
            .style()
            .set_property("font-size", &format!("{}pt", points));
    }

    fn show_code_view(&self) {
        set_visible(&self.code_view, true);
        set_visible(&self.log_view, false);
    }

    fn show_log_view(&self) {
        set_visible(&self.code_view, false);
        set_visible(&self.log_view, true);
    }
}

fn set_visible(element: &HtmlElement, visible: bool) {
    let value = if visible { "" } else { "none" };
    let _ = element.style().set_property("display", value);
}
