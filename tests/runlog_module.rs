use stageline::runlog::RunLogger;
use std::fs;
use tempfile::tempdir;

#[test]
fn entries_carry_utc_timestamps_with_z_suffix() {
    let mut logger = RunLogger::quiet();
    logger.append("Calling ability accept_payload via MCP=COMMON");

    let entry = &logger.entries()[0];
    let (stamp, message) = entry.split_once(" - ").expect("stamp separator");
    assert_eq!(message, "Calling ability accept_payload via MCP=COMMON");
    assert!(stamp.ends_with('Z'));
    // Fixed-width date/time prefix: YYYY-MM-DDTHH:MM:SS
    assert_eq!(&stamp[4..5], "-");
    assert_eq!(&stamp[7..8], "-");
    assert_eq!(&stamp[10..11], "T");
    assert_eq!(&stamp[13..14], ":");
}

#[test]
fn append_order_is_preserved() {
    let mut logger = RunLogger::quiet();
    for n in 0..5 {
        logger.append(&format!("entry {n}"));
    }
    let suffixes: Vec<String> = logger
        .entries()
        .iter()
        .map(|entry| entry.split_once(" - ").expect("separator").1.to_string())
        .collect();
    assert_eq!(suffixes, ["entry 0", "entry 1", "entry 2", "entry 3", "entry 4"]);
}

#[test]
fn flush_writes_one_line_per_entry_and_overwrites() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("agent_run_log.txt");
    fs::write(&path, "old run\nold entries\nleft behind").expect("seed");

    let mut logger = RunLogger::quiet();
    logger.append("fresh entry");
    logger.flush(&path).expect("flush");

    let written = fs::read_to_string(&path).expect("read");
    assert_eq!(written.lines().count(), 1);
    assert!(written.ends_with(" - fresh entry"));
}

#[test]
fn empty_logger_flushes_an_empty_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.log");
    let logger = RunLogger::quiet();
    assert!(logger.is_empty());
    logger.flush(&path).expect("flush");
    assert_eq!(fs::read_to_string(&path).expect("read"), "");
}
