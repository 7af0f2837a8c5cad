//! End-to-end behavior of the counter against real files

use chrono::NaiveDateTime;
use std::fs;
use std::rc::Rc;
use storage_playground::{
    App, AppConfig, LogSink, ManualClock, PersistentCounter, SystemClock, COUNTER_FILE_NAME,
};
use tempfile::tempdir;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_fresh_storage_two_taps() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join(COUNTER_FILE_NAME);

    let mut counter = PersistentCounter::open(&path, LogSink::disabled());
    assert_eq!(counter.count(), 0);

    assert_eq!(counter.increment().unwrap(), 1);
    assert_eq!(counter.increment().unwrap(), 2);

    assert_eq!(fs::read_to_string(&path).unwrap(), "2");
    assert_eq!(counter.current_display_text(), "Button tapped 2 times");
}

#[test]
fn test_n_taps_match_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(COUNTER_FILE_NAME);
    let mut counter = PersistentCounter::open(&path, LogSink::disabled());

    for _ in 0..25 {
        counter.increment().unwrap();
    }

    assert_eq!(counter.count(), 25);
    assert_eq!(fs::read_to_string(&path).unwrap(), "25");
}

#[test]
fn test_value_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(COUNTER_FILE_NAME);

    {
        let mut counter = PersistentCounter::open(&path, LogSink::disabled());
        for _ in 0..7 {
            counter.increment().unwrap();
        }
    }

    let counter = PersistentCounter::open(&path, LogSink::disabled());
    assert_eq!(counter.count(), 7);
    assert_eq!(counter.current_display_text(), "Button tapped 7 times");
}

#[test]
fn test_corrupt_storage_starts_over() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(COUNTER_FILE_NAME);
    fs::write(&path, "not-a-number").unwrap();

    let mut counter = PersistentCounter::open(&path, LogSink::disabled());
    assert_eq!(counter.count(), 0);

    counter.increment().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1");
}

#[test]
fn test_log_has_read_then_writes() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("console.log");
    let mut counter = PersistentCounter::with_clock(
        dir.path().join(COUNTER_FILE_NAME),
        LogSink::new(Some(log_path)),
        Box::new(SystemClock),
    );
    counter.increment().unwrap();
    counter.increment().unwrap();

    let text = counter.log().read_all().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    let expected = ["READ = 0", "WRITE = 1", "WRITE = 2"];
    for (line, suffix) in lines.iter().zip(expected) {
        let (stamp, rest) = line.split_once(" - ").unwrap();
        assert!(
            NaiveDateTime::parse_from_str(stamp, "%Y/%m/%d %H:%M:%S").is_ok(),
            "bad timestamp in {:?}",
            line
        );
        assert_eq!(rest, suffix);
    }
}

#[test]
fn test_log_accumulates_across_sessions() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        storage_path: dir.path().join(COUNTER_FILE_NAME),
        log_path: Some(dir.path().join("console.log")),
    };

    {
        let clock = ManualClock::default();
        let mut app = App::with_clock(&config, Box::new(clock));
        app.on_increment_requested().unwrap();
    }

    let mut app = App::with_clock(&config, Box::new(ManualClock::default()));
    app.on_increment_requested().unwrap();

    assert_eq!(
        app.show_logs().unwrap(),
        "2024/01/01 00:00:00 - READ = 0\n\
         2024/01/01 00:00:00 - WRITE = 1\n\
         2024/01/01 00:00:00 - READ = 1\n\
         2024/01/01 00:00:00 - WRITE = 2\n"
    );
    assert_eq!(app.display_text(), "Button tapped 2 times");
}

#[test]
fn test_log_timestamps_follow_clock() {
    let dir = tempdir().unwrap();
    let clock = Rc::new(ManualClock::default());
    let mut counter = PersistentCounter::with_clock(
        dir.path().join(COUNTER_FILE_NAME),
        LogSink::new(Some(dir.path().join("console.log"))),
        Box::new(clock.clone()),
    );

    clock.advance_secs(90);
    counter.increment().unwrap();
    clock.advance_secs(3_600);
    counter.increment().unwrap();

    assert_eq!(
        counter.log().read_all().unwrap(),
        "2024/01/01 00:00:00 - READ = 0\n\
         2024/01/01 00:01:30 - WRITE = 1\n\
         2024/01/01 01:01:30 - WRITE = 2\n"
    );
}
