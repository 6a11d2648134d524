//! Tests for the compatibility bridges

#![cfg(all(feature = "log-compat", feature = "tracing-compat"))]

use ares_logger::compat::{TracingBridge, init_log_bridge};
use ares_logger::{Encoding, FileLogger, Logger, LoggerConfig, MemorySink, Value};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;

fn json_logger(level: &str) -> (Arc<dyn Logger>, MemorySink) {
    let sink = MemorySink::new();
    let config = LoggerConfig::new("app.log", level, 1, 1, 1).with_encoding(Encoding::Json);
    let logger: Arc<dyn Logger> = Arc::new(FileLogger::with_sink(&config, Arc::new(sink.clone())));
    (logger, sink)
}

fn parse(sink: &MemorySink) -> Vec<Value> {
    sink.lines()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_log_bridge() {
    let (logger, sink) = json_logger("info");
    init_log_bridge(logger).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::info!("from log {}", 1);
    log::debug!("filtered");
    log::warn!(attempt = 2; "retrying");

    let records = parse(&sink);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msg"], "from log 1");
    assert_eq!(records[0]["level"], "INFO");
    assert!(records[0]["caller"].as_str().unwrap().starts_with("tests/compat_test.rs:"));
    assert_eq!(records[1]["attempt"], 2);

    // Only one `log` logger per process
    let (again, _) = json_logger("info");
    assert!(init_log_bridge(again).is_err());
}

#[test]
fn test_tracing_bridge() {
    let (logger, sink) = json_logger("info");
    let subscriber = tracing_subscriber::registry().with(TracingBridge::new(logger));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(user = "alice", admin = true, visits = 3, "signed in");
        tracing::debug!("filtered");

        let span = tracing::info_span!("request");
        let _guard = span.enter();
        tracing::warn!(ratio = 0.5, "slow");

        // Diagnostics from the logger itself are not forwarded
        tracing::error!(target: "ares_logger::file", "internal");
        tracing::error!(target: "ares_logger_file::writer", "internal");
        // A crate that merely shares the name prefix is forwarded
        tracing::info!(target: "ares_logger_demo", "from demo");
    });

    let records = parse(&sink);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["msg"], "signed in");
    assert_eq!(records[0]["user"], "alice");
    assert_eq!(records[0]["admin"], true);
    assert_eq!(records[0]["visits"], 3);
    assert_eq!(records[1]["msg"], "request: slow");
    assert_eq!(records[1]["ratio"], 0.5);
    assert_eq!(records[1]["level"], "WARN");
    assert_eq!(records[2]["msg"], "from demo");
}
