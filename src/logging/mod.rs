//! Logging sinks
//!
//! Library output reaches the user two ways: the browser console and an
//! on-page log panel. Both are sinks behind one trait, attached to a
//! fan-out `Logger` that is built at boot and injected where needed, so
//! nothing here touches a global.

pub mod panel;

use std::fmt;
use std::rc::Rc;

pub use panel::PanelSink;

/// Message severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => write!(f, "debug"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A destination for log lines
pub trait LogSink {
    fn write(&self, severity: Severity, message: &str);
}

/// Fan-out over the attached sinks
#[derive(Default)]
pub struct Logger {
    sinks: Vec<Rc<dyn LogSink>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, sink: Rc<dyn LogSink>) {
        self.sinks.push(sink);
    }

    pub fn log(&self, severity: Severity, message: &str) {
        for sink in &self.sinks {
            sink.write(severity, message);
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

/// Browser console sink
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => web_sys::console::debug_1(&message.into()),
            Severity::Info => web_sys::console::log_1(&message.into()),
            Severity::Warn => web_sys::console::warn_1(&message.into()),
            Severity::Error => web_sys::console::error_1(&message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSink {
        lines: RefCell<Vec<(Severity, String)>>,
    }

    impl LogSink for RecordingSink {
        fn write(&self, severity: Severity, message: &str) {
            self.lines
                .borrow_mut()
                .push((severity, message.to_string()));
        }
    }

    #[test]
    fn test_logger_fans_out_to_every_sink() {
        let first = Rc::new(RecordingSink {
            lines: RefCell::new(Vec::new()),
        });
        let second = Rc::new(RecordingSink {
            lines: RefCell::new(Vec::new()),
        });

        let mut logger = Logger::new();
        logger.attach(first.clone());
        logger.attach(second.clone());

        logger.warn("low disk");
        logger.error("boom");

        for sink in [&first, &second] {
            let lines = sink.lines.borrow();
            assert_eq!(
                *lines,
                vec![
                    (Severity::Warn, "low disk".to_string()),
                    (Severity::Error, "boom".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }
}
