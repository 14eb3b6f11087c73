//! Tests for verbose output and the log file sink.

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    use logger::{enable_verbose, is_verbose_enabled, verbose};

    verbose!("This should not appear");

    enable_verbose();
    assert!(is_verbose_enabled());
    verbose!("This should appear: verbose test {}", 42);
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_captures_tagged_messages() {
    use logger::{
        close_file_logging, enable_verbose, error, info, init_file_logging, set_level, verbose,
        warn, Level,
    };
    use std::fs;

    let dir = std::env::temp_dir().join(format!("archdiagram-logger-{}", std::process::id()));
    let log_path = dir.join("nested").join("render.log");
    let _ = fs::remove_dir_all(&dir);

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("rendered 8 nodes");
    warn!("engine missing");
    error!("render failed");

    enable_verbose();
    verbose!("progress line that stays on the console");

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] rendered 8 nodes"));
    assert!(contents.contains("[WARN] engine missing"));
    assert!(contents.contains("[ERROR] render failed"));
    assert!(!contents.contains("progress line"));

    let _ = fs::remove_dir_all(&dir);
}
