// Controller flow against the scripted engine: conversion, transposition,
// mode switching, and the error path.

use std::cell::RefCell;
use std::rc::Rc;

use converter_wasm::engine::scripted::{EngineCall, ScriptedEngine};
use converter_wasm::logging::{LogSink, Logger, Severity};
use converter_wasm::{ConvertOptions, OutputMode, XmlConverter};

#[derive(Default)]
struct RecordingSink {
    lines: RefCell<Vec<(Severity, String)>>,
}

impl RecordingSink {
    fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn write(&self, severity: Severity, message: &str) {
        self.lines
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}

fn converter_with_sink() -> (XmlConverter, ScriptedEngine, Rc<RecordingSink>) {
    let engine = ScriptedEngine::new();
    let sink = Rc::new(RecordingSink::default());
    let mut logger = Logger::new();
    logger.attach(sink.clone());
    let converter = XmlConverter::new(Box::new(engine.clone()), logger);
    (converter, engine, sink)
}

#[test]
fn test_load_source_converts_immediately() {
    let (mut app, engine, _) = converter_with_sink();

    app.load_source("score.xml", "<score/>".to_string())
        .expect("conversion should succeed");

    assert_eq!(
        app.state().output,
        ScriptedEngine::expected_output("<score/>", OutputMode::Guido, &ConvertOptions::default())
    );
    assert_eq!(engine.calls().len(), 1);
}

#[test]
fn test_zero_transpose_skips_the_engine() {
    let (mut app, engine, _) = converter_with_sink();

    app.set_transpose(0).unwrap();
    app.load_source("score.xml", "<score/>".to_string()).unwrap();

    // No transpose call, and the converter saw the source verbatim
    assert_eq!(
        engine.calls(),
        vec![EngineCall::Convert {
            xml: "<score/>".to_string(),
            mode: OutputMode::Guido,
        }]
    );
}

#[test]
fn test_transpose_feeds_the_converter() {
    let (mut app, engine, _) = converter_with_sink();

    app.set_transpose(-3).unwrap();
    app.load_source("score.xml", "<score/>".to_string()).unwrap();

    let transposed = ScriptedEngine::expected_transposed("<score/>", -3);
    assert_eq!(
        engine.calls(),
        vec![
            EngineCall::Transpose {
                xml: "<score/>".to_string(),
                semitones: -3,
            },
            EngineCall::Convert {
                xml: transposed.clone(),
                mode: OutputMode::Guido,
            },
        ]
    );
    assert_eq!(
        app.state().output,
        ScriptedEngine::expected_output(&transposed, OutputMode::Guido, &ConvertOptions::default())
    );
}

#[test]
fn test_mode_switch_reconverts() {
    let (mut app, engine, _) = converter_with_sink();

    app.load_source("score.xml", "<score/>".to_string()).unwrap();
    app.set_mode(OutputMode::Braille).unwrap();

    let modes: Vec<_> = engine
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            EngineCall::Convert { mode, .. } => Some(mode),
            _ => None,
        })
        .collect();
    assert_eq!(modes, vec![OutputMode::Guido, OutputMode::Braille]);
    assert!(app.state().output.starts_with("braille("));
    assert_eq!(app.output_file_name().as_deref(), Some("score.brl"));
}

#[test]
fn test_each_loaded_file_gets_its_own_conversion() {
    let (mut app, engine, _) = converter_with_sink();

    for name in ["a.xml", "b.xml", "c.xml"] {
        app.load_source(name, format!("<{}/>", name)).unwrap();
    }

    let conversions = engine
        .calls()
        .iter()
        .filter(|call| matches!(call, EngineCall::Convert { .. }))
        .count();
    assert_eq!(conversions, 3);
    assert_eq!(app.output_file_name().as_deref(), Some("c.gmn"));
}

#[test]
fn test_failed_conversion_keeps_previous_output_and_logs_the_file() {
    let (mut app, engine, sink) = converter_with_sink();

    app.load_source("good.xml", "<good/>".to_string()).unwrap();
    let previous = app.state().output.clone();
    assert!(!previous.is_empty());

    engine.set_fail_convert(Some("no part list"));
    let result = app.load_source("broken.xml", "<broken/>".to_string());

    assert!(result.is_err());
    assert_eq!(app.state().output, previous);

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("broken.xml"));
    assert!(errors[0].contains("no part list"));
}

#[test]
fn test_failed_transposition_takes_the_same_error_path() {
    let (mut app, engine, sink) = converter_with_sink();

    engine.set_fail_transpose(Some("out of range"));
    app.set_transpose(12).unwrap();
    let result = app.load_source("score.xml", "<score/>".to_string());

    assert!(result.is_err());
    assert_eq!(app.state().output, "");
    assert!(sink.errors()[0].contains("score.xml"));

    // No converter call after the transpose raised
    assert_eq!(
        engine.calls(),
        vec![EngineCall::Transpose {
            xml: "<score/>".to_string(),
            semitones: 12,
        }]
    );
}

#[test]
fn test_option_change_is_forwarded() {
    let (mut app, _, _) = converter_with_sink();

    app.load_source("score.xml", "<score/>".to_string()).unwrap();
    app.set_options(ConvertOptions {
        guido_bars: true,
        ..ConvertOptions::default()
    })
    .unwrap();

    assert_eq!(
        app.state().output,
        ScriptedEngine::expected_output(
            "<score/>",
            OutputMode::Guido,
            &ConvertOptions {
                guido_bars: true,
                ..ConvertOptions::default()
            }
        )
    );
}

#[test]
fn test_version_banner_names_every_converter() {
    let (app, _, _) = converter_with_sink();
    let banner = app.version_banner();
    for needle in ["scripted 0.0", "guido 0.0", "lilypond 0.0", "braille 0.0"] {
        assert!(banner.contains(needle), "banner missing '{}': {}", needle, banner);
    }
}
