//! On-page log panel sink
//!
//! Mirrors log lines into a `<pre>` element so conversion diagnostics are
//! visible without opening the developer console. Keeps its own text buffer
//! and rewrites the element content whole, which is cheap at log-panel
//! sizes.

use std::cell::RefCell;

use web_sys::HtmlElement;

use crate::logging::{LogSink, Severity};

pub struct PanelSink {
    element: HtmlElement,
    buffer: RefCell<String>,
}

impl PanelSink {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            buffer: RefCell::new(String::new()),
        }
    }

    /// Drop accumulated lines and blank the panel
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
        self.element.set_text_content(Some(""));
    }
}

impl LogSink for PanelSink {
    fn write(&self, severity: Severity, message: &str) {
        // Debug chatter stays in the console
        if severity == Severity::Debug {
            return;
        }

        let mut buffer = self.buffer.borrow_mut();
        match severity {
            Severity::Warn | Severity::Error => {
                buffer.push_str(&format!("{}: {}\n", severity, message));
            }
            _ => {
                buffer.push_str(message);
                buffer.push('\n');
            }
        }
        self.element.set_text_content(Some(&buffer));
    }
}
