//! Basic tests for the logger

use ares_logger::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use std::thread;

fn memory_logger(config: &LoggerConfig) -> (FileLogger, MemorySink) {
    let sink = MemorySink::new();
    (FileLogger::with_sink(config, Arc::new(sink.clone())), sink)
}

fn log_every_level(logger: &dyn Logger) {
    logger.debug("debug message");
    logger.info("info message");
    logger.warn("warn message");
    logger.error("error message");
    logger.dpanic("dpanic message");
}

#[test]
fn test_threshold_filters_lower_levels() {
    let (logger, sink) = memory_logger(&LoggerConfig::new("app.log", "WARN", 1, 1, 1));
    log_every_level(&logger);

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\tWARN\t"));
    assert!(lines[1].contains("\tERROR\t"));
    assert!(lines[2].contains("\tDPANIC\t"));
    assert!(!sink.contains("debug message"));
    assert!(!sink.contains("info message"));
}

#[test]
fn test_every_threshold_matches_ordering() {
    for threshold in Level::ALL {
        let config = LoggerConfig::new("app.log", threshold.as_str(), 1, 1, 1);
        let (logger, sink) = memory_logger(&config);
        log_every_level(&logger);

        let expected = Level::ALL[..5].iter().filter(|level| **level >= threshold).count();
        assert_eq!(sink.lines().len(), expected, "threshold {threshold}");
    }
}

#[test]
fn test_unknown_level_name_behaves_as_info() {
    let (logger, sink) = memory_logger(&LoggerConfig::new("app.log", "Verbose", 1, 1, 1));
    assert_eq!(logger.level(), Level::Info);

    logger.debug("hidden");
    logger.info("shown");
    assert_eq!(sink.lines().len(), 1);
}

#[test]
fn test_console_and_json_pass_the_same_records() {
    let base = LoggerConfig::new("app.log", "warn", 1, 1, 1);
    let (console, console_sink) = memory_logger(&base.clone().with_encoding(Encoding::Console));
    let (json, json_sink) = memory_logger(&base.with_encoding(Encoding::Json));

    for logger in [&console as &dyn Logger, &json] {
        log_every_level(logger);
        logger.infow("keyed info", &[Field::new("k", 1)]);
        logger.errorw("keyed error", &[Field::new("k", 2)]);
    }

    let console_lines = console_sink.lines();
    let json_lines = json_sink.lines();
    assert_eq!(console_lines.len(), json_lines.len());

    for (console_line, json_line) in console_lines.iter().zip(&json_lines) {
        let value: Value = serde_json::from_str(json_line).unwrap();
        let message = value["msg"].as_str().unwrap();
        let level = value["level"].as_str().unwrap();
        assert!(console_line.contains(message));
        assert!(console_line.contains(&format!("\t{level}\t")));
    }
}

#[test]
fn test_json_keyed_call() {
    let config = LoggerConfig::new("app.log", "info", 1, 1, 1).with_encoding(Encoding::Json);
    let (logger, sink) = memory_logger(&config);

    logger.infow("log is ready", &[Field::new("a", 1), Field::new("b", 2)]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(r#""a":1"#));
    assert!(lines[0].contains(r#""b":2"#));

    let value: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["msg"], "log is ready");
    assert_eq!(value["level"], "INFO");
    assert!(value["ts"].is_string());
}

#[test]
fn test_custom_message_key() {
    let config = LoggerConfig::new("app.log", "info", 1, 1, 1)
        .with_encoding(Encoding::Json)
        .with_message_key("message");
    let (logger, sink) = memory_logger(&config);

    logger.infow("signed in", &[Field::new("user", "alice")]);

    let value: Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert_eq!(value["message"], "signed in");
    assert_eq!(value["user"], "alice");
    assert!(value.get("msg").is_none());
}

#[test]
fn test_alternating_pairs() {
    let config = LoggerConfig::new("app.log", "info", 1, 1, 1).with_encoding(Encoding::Json);
    let (logger, sink) = memory_logger(&config);

    let fields = Field::pairs([
        Value::from("a"),
        Value::from(1),
        Value::from(2),
        Value::from("two"),
        Value::from("dangling"),
    ]);
    logger.warnw("odd input", &fields);

    let value: Value = serde_json::from_str(&sink.lines()[0]).unwrap();
    assert_eq!(value["a"], 1);
    assert_eq!(value[IGNORED_KEY], "dangling");
    assert_eq!(value[INVALID_KEY][0]["position"], 2);
    assert_eq!(value[INVALID_KEY][0]["key"], 2);
    assert_eq!(value[INVALID_KEY][0]["value"], "two");
}

#[test]
fn test_plain_formatted_and_sprint() {
    let (logger, sink) = memory_logger(&LoggerConfig::new("app.log", "info", 1, 1, 1));
    let attempt = 3;

    logger.info(Sprint(&[&"retry", &attempt, &"of", &5]));
    logger.infof(format_args!("retry {attempt} of {}", 5));
    info!(logger: logger, "retry {attempt} of {}", 5);

    let messages: Vec<_> = sink
        .lines()
        .iter()
        .map(|line| line.rsplit('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["retry 3 of 5"; 3]);
}

#[test]
fn test_keyed_macro() {
    let config = LoggerConfig::new("app.log", "debug", 1, 1, 1).with_encoding(Encoding::Json);
    let (logger, sink) = memory_logger(&config);
    let shared: Arc<dyn Logger> = Arc::new(logger);

    debugw!(logger: shared, "cache miss", "key" => "user:7", "ttl" => 30,);
    errorw!(logger: shared, "no fields");

    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    let first: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["key"], "user:7");
    assert_eq!(first["ttl"], 30);
    let second: Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["msg"], "no fields");
}

#[test]
fn test_noop_logger() {
    let logger = Arc::new(NoOpLogger);

    for level in Level::ALL {
        assert!(!logger.is_enabled(level));
    }

    // Test that it doesn't panic when used
    logger.error("This should not appear");
    logger.dpanic("Nor this");
    logger.with_fields(vec![Field::new("k", "v")]).info("Nor this");
    logger.flush();
}

#[test]
fn test_writes_to_rotating_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let logger = FileLogger::new(LoggerConfig::new(&path, "INFO", 1, 3, 1)).unwrap();

    logger.info("ready");
    logger.debug("hidden");
    logger.flush();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("INFO"));
    assert!(lines[0].contains("ready"));
    assert!(!contents.contains("hidden"));
}

#[test]
fn test_missing_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("app.log");
    let logger = FileLogger::new(LoggerConfig::new(&path, "info", 1, 1, 1)).unwrap();

    logger.info("hello");
    assert!(fs::read_to_string(&path).unwrap().contains("hello"));
}

#[test]
fn test_unopenable_destination_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "file").unwrap();

    let result = FileLogger::new(LoggerConfig::new(blocker.join("app.log"), "info", 1, 1, 1));
    assert!(matches!(result, Err(Error::File(_))));
}

#[test]
fn test_rotation_through_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = LoggerConfig::new(&path, "info", 1, 2, 0).with_compress(false);
    let logger = FileLogger::new(config).unwrap();

    let payload = "x".repeat(4096);
    for index in 0..800 {
        logger.infow("bulk", &[Field::new("index", index), Field::new("payload", payload.as_str())]);
    }
    // Dropping the last handle joins the housekeeping thread
    drop(logger);

    let backups = fs::read_dir(dir.path())
        .unwrap()
        .filter(|entry| entry.as_ref().unwrap().path() != path)
        .count();
    assert_eq!(backups, 2);
    assert!(fs::metadata(&path).unwrap().len() <= 1024 * 1024);
}

#[test]
fn test_concurrent_logging_keeps_lines_whole() {
    let config = LoggerConfig::new("app.log", "info", 1, 1, 1).with_encoding(Encoding::Json);
    let (logger, sink) = memory_logger(&config);
    let logger: Arc<dyn Logger> = Arc::new(logger);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for index in 0..250 {
                    logger.infow("tick", &[Field::new("worker", worker), Field::new("index", index)]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 8 * 250);
    for line in lines {
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["msg"], "tick");
    }
}

#[test]
fn test_config_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("service.log");
    let config_path = dir.path().join("logger.toml");
    fs::write(
        &config_path,
        format!(
            "destination = {:?}\nlevel = \"ERROR\"\nencoding = \"json\"\nmessage_key = \"message\"\n",
            log_path.display().to_string()
        ),
    )
    .unwrap();

    let logger = FileLogger::new(LoggerConfig::from_toml_file(&config_path).unwrap()).unwrap();
    logger.warn("skipped");
    logger.error("kept");

    let contents = fs::read_to_string(&log_path).unwrap();
    let value: Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(value["message"], "kept");
    assert_eq!(value["level"], "ERROR");
}
