//! Console mirroring and the `LOG_TO_CONSOLE` toggle

use proven_logger_rotating::capture::CaptureWriter;
use proven_logger_rotating::{
    LOG_TO_CONSOLE, Logger, LoggerConfig, RotationPolicy, SinkRouter, console_from_env,
};
use serial_test::serial;
use std::fs;

fn set_console_env(value: Option<&str>) {
    // Tests touching the environment run under #[serial]
    unsafe {
        match value {
            Some(v) => std::env::set_var(LOG_TO_CONSOLE, v),
            None => std::env::remove_var(LOG_TO_CONSOLE),
        }
    }
}

#[test]
#[serial]
fn test_toggle_requires_non_empty_value() {
    set_console_env(None);
    assert!(!console_from_env());

    set_console_env(Some(""));
    assert!(!console_from_env());

    set_console_env(Some("1"));
    assert!(console_from_env());

    set_console_env(Some("false"));
    assert!(console_from_env());

    set_console_env(None);
}

#[test]
#[serial]
fn test_router_and_config_follow_the_environment() {
    set_console_env(Some("yes"));
    assert!(SinkRouter::from_env("app.log", RotationPolicy::default()).log_to_console());
    assert!(LoggerConfig::default().router().log_to_console());
    assert_eq!(LoggerConfig::from_env().log_to_console, Some(true));

    let forced_off = LoggerConfig::builder().log_to_console(false).build();
    assert!(!forced_off.router().log_to_console());

    set_console_env(None);
    assert!(!SinkRouter::from_env("app.log", RotationPolicy::default()).log_to_console());
    assert!(!LoggerConfig::default().router().log_to_console());
    assert_eq!(LoggerConfig::from_env().log_to_console, Some(false));
}

#[test]
fn test_mirrored_line_is_identical_on_both_sinks() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("mirror.log");
    let console = CaptureWriter::new();

    let router = SinkRouter::new(&path, RotationPolicy::default()).with_console(true);
    let logger = Logger::default();
    logger.set_writer(router.build_writer_with_console(console.clone()));

    logger.error(format_args!("mirrored {}", 1));

    let file = fs::read_to_string(&path).unwrap();
    assert_eq!(file.lines().count(), 1);
    assert_eq!(file, console.contents());
}

#[test]
fn test_file_only_leaves_console_untouched() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("quiet.log");
    let console = CaptureWriter::new();

    let router = SinkRouter::new(&path, RotationPolicy::default());
    let logger = Logger::default();
    logger.set_writer(router.build_writer_with_console(console.clone()));

    logger.info(format_args!("file only"));

    assert!(fs::read_to_string(&path).unwrap().contains(" file only file:"));
    assert!(console.contents().is_empty());
}
