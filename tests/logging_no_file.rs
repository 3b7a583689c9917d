use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    starry_home::logging::init(false, None);
    tracing::info!("starfield test line");

    sleep(Duration::from_millis(100));

    assert!(!path.exists(), "log file should not be created");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
