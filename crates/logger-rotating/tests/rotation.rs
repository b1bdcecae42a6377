//! Rotation driven through a logger

use flate2::read::GzDecoder;
use proven_logger_rotating::{Logger, LoggerConfig, RotationPolicy};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

#[test]
fn test_logger_rotates_into_compressed_backup() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("busy.log");
    let config = LoggerConfig::builder()
        .filename(&path)
        .rotation(RotationPolicy::default().with_max_size_mb(1))
        .log_to_console(false)
        .build();

    let logger = Logger::new(config);
    logger.init().unwrap();

    let filler = "x".repeat(200);
    for i in 0..4_000 {
        logger.info(format_args!("{i:05} {filler}"));
    }

    let active = fs::read_to_string(&path).unwrap();
    let longest = active.lines().map(str::len).max().unwrap_or(0) + 1;
    assert!(active.len() <= 1024 * 1024 + longest);
    assert!(active.lines().all(|l| l.starts_with("INFO ")));

    let backups: Vec<_> = fs::read_dir(temp.path().join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != "busy.log")
        .collect();
    assert_eq!(backups.len(), 1, "{backups:?}");
    assert!(backups[0].starts_with("busy.log."));
    assert!(backups[0].ends_with(".gz"));

    let mut restored = String::new();
    GzDecoder::new(fs::File::open(temp.path().join("nested").join(&backups[0])).unwrap())
        .read_to_string(&mut restored)
        .unwrap();
    assert!(restored.lines().next().unwrap().contains(" 00000 "));
    assert_eq!(
        restored.lines().count() + active.lines().count(),
        4_000,
        "no line lost or split across the rotation"
    );
}

#[test]
fn test_init_rejects_zero_size() {
    let temp = TempDir::new().unwrap();
    let config = LoggerConfig::builder()
        .filename(temp.path().join("never.log"))
        .rotation(RotationPolicy::default().with_max_size_mb(0))
        .build();

    let logger = Logger::new(config);
    assert!(logger.init().is_err());
    assert!(!temp.path().join("never.log").exists());
}
