//! `log` macros routed into a logger
#![cfg(feature = "log-compat")]

use proven_logger_rotating::capture::CaptureWriter;
use proven_logger_rotating::compat::init_log_bridge;
use proven_logger_rotating::{Error, Level, LogWriter, Logger};

#[test]
fn test_log_macros_reach_the_logger() {
    let capture = CaptureWriter::new();
    let logger = Logger::default();
    logger.set_writer(LogWriter::new(capture.clone()));

    init_log_bridge(logger.clone()).unwrap();
    assert!(matches!(
        init_log_bridge(logger.clone()),
        Err(Error::SetLogger(_))
    ));

    log::info!(target: "app", "user {} signed in", 7);
    log::debug!(target: "app", "hidden at info");
    logger.set_level(Level::Debug);
    log::debug!(target: "app", "shown at debug");
    log::error!(target: "proven_logger_rotating::rotation", "never bridged");

    let lines = capture.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("INFO "));
    assert!(lines[0].contains(" user 7 signed in file:"));
    assert!(lines[0].contains("log_bridge.rs:"));
    assert!(lines[0].ends_with(" func:log_bridge"));
    assert!(lines[1].starts_with("DEBUG "));
}
