//! Tests for log file setup and emitted events.

use super::*;
use crate::engine::{Command, ControllerSettings, PlaybackController};
use crate::layout::TerminalLayout;
use crate::model::{LayoutMetrics, Script, Viewport};
use serial_test::serial;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Writer that appends into a shared buffer.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf-8 log output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(level: &str, f: F) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn prepare_creates_log_directory_if_missing() {
    // GIVEN a log path inside a directory that does not exist
    let test_dir = std::env::temp_dir().join("tprompt_test_logs_create");
    let _ = fs::remove_dir_all(&test_dir);
    let log_file = test_dir.join("test.log");

    // WHEN preparing the target
    let target = prepare_log_target(&log_file).expect("target should resolve");

    // THEN the directory exists and the parts are split
    assert!(test_dir.exists(), "Log directory should be created: {:?}", test_dir);
    assert_eq!(target.directory, test_dir);
    assert_eq!(target.file_name, "test.log");

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn prepare_resolves_bare_file_name_to_current_dir() {
    let target = prepare_log_target(Path::new("tprompt.log")).unwrap();
    assert_eq!(target.directory, PathBuf::from("."));
}

#[test]
fn prepare_rejects_root_path() {
    let result = prepare_log_target(Path::new("/"));
    assert!(
        matches!(result, Err(LoggingError::InvalidPath(_))),
        "Root has no file name, got: {:?}",
        result
    );
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_even_if_subscriber_is_set() {
    let test_dir = std::env::temp_dir().join("tprompt_test_logs_init");
    let _ = fs::remove_dir_all(&test_dir);

    // May fail with SubscriberAlreadySet, which is fine.
    let _ = init(&test_dir.join("app.log"));

    assert!(test_dir.exists(), "Log directory should exist: {:?}", test_dir);
    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn phase_transitions_are_logged_at_debug() {
    // GIVEN a controller with no countdown
    let mut controller = PlaybackController::new(
        TerminalLayout::default(),
        Script::new("one two three"),
        LayoutMetrics::new(Viewport::new(40, 10)),
        ControllerSettings {
            countdown_seconds: 0,
            ..ControllerSettings::default()
        },
    )
    .unwrap();

    // WHEN starting playback with debug logging captured
    let output = capture("debug", || {
        controller.dispatch(Command::Start).unwrap();
    });

    // THEN the transition is in the log without colour codes
    assert!(output.contains("Phase transition"), "got: {output}");
    assert!(output.contains("from=idle"), "got: {output}");
    assert!(output.contains("to=playing"), "got: {output}");
    assert!(!output.contains('\u{1b}'), "log output must not contain ANSI escapes");
}

#[test]
fn debug_events_are_hidden_at_info() {
    let mut controller = PlaybackController::new(
        TerminalLayout::default(),
        Script::new("text"),
        LayoutMetrics::default(),
        ControllerSettings::default(),
    )
    .unwrap();

    let output = capture(DEFAULT_FILTER, || {
        controller.dispatch(Command::Start).unwrap();
    });

    assert!(!output.contains("Phase transition"), "got: {output}");
}
