use std::{fs, thread::sleep, time::Duration};

use dashboard_layout::settings::Settings;
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn writes_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dashboard.log");
    let settings = Settings {
        debug_logging: true,
        log_file: Some(path.to_string_lossy().into_owned()),
        ..Settings::default()
    };

    dashboard_layout::logging::init(settings.debug_logging, settings.log_path());
    tracing::info!(widget_id = "recent-orders", "layout loaded");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("layout loaded"));
    assert!(contents.contains("recent-orders"));
}

#[test]
#[serial]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dashboard.log");

    dashboard_layout::logging::init(false, None);
    tracing::info!("layout loaded");

    sleep(Duration::from_millis(100));

    assert!(!path.exists(), "log file should not be created");
}
