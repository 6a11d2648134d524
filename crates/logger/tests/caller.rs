//! Records name the application call site, not a location inside the logger

use ares_logger::{
    Encoding, Field, FileLogger, Logger, LoggerConfig, LoggerExt, MemorySink, Value, info, infow,
};
use std::sync::Arc;

fn json_logger() -> (FileLogger, MemorySink) {
    let sink = MemorySink::new();
    let config = LoggerConfig::new("app.log", "debug", 1, 1, 1).with_encoding(Encoding::Json);
    (FileLogger::with_sink(&config, Arc::new(sink.clone())), sink)
}

fn callers(sink: &MemorySink) -> Vec<String> {
    sink.lines()
        .iter()
        .map(|line| {
            let value: Value = serde_json::from_str(line).unwrap();
            value["caller"].as_str().unwrap().to_string()
        })
        .collect()
}

fn here(line: u32) -> String {
    format!("tests/caller.rs:{line}")
}

#[test]
fn test_direct_calls() {
    let (logger, sink) = json_logger();

    logger.info("plain");
    let plain = line!() - 1;
    logger.warnf(format_args!("formatted {}", 1));
    let formatted = line!() - 1;
    logger.errorw("keyed", &[Field::new("k", 1)]);
    let keyed = line!() - 1;

    assert_eq!(callers(&sink), vec![here(plain), here(formatted), here(keyed)]);
}

#[test]
fn test_calls_through_trait_objects() {
    let (logger, sink) = json_logger();
    let shared: Arc<dyn Logger> = Arc::new(logger);
    let child = shared.with_fields(vec![Field::new("component", "db")]);

    shared.debug("via arc");
    let via_arc = line!() - 1;
    child.info("via child");
    let via_child = line!() - 1;

    assert_eq!(callers(&sink), vec![here(via_arc), here(via_child)]);
}

#[test]
fn test_calls_through_macros() {
    let (logger, sink) = json_logger();

    info!(logger: logger, "formatted macro {}", 1);
    let formatted = line!() - 1;
    infow!(logger: logger, "keyed macro", "k" => 1);
    let keyed = line!() - 1;

    assert_eq!(callers(&sink), vec![here(formatted), here(keyed)]);
}

#[test]
fn test_console_caller_column() {
    let sink = MemorySink::new();
    let config = LoggerConfig::new("app.log", "info", 1, 1, 1);
    let logger = FileLogger::with_sink(&config, Arc::new(sink.clone()));

    logger.info("console");
    let line = line!() - 1;

    let output = sink.lines();
    let columns: Vec<_> = output[0].split('\t').collect();
    assert_eq!(columns[2], here(line));
}
