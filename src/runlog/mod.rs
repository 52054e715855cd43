use crate::shared::fs_atomic::atomic_write_file;
use chrono::{SecondsFormat, Utc};
use std::path::Path;

/// Append-only run log: each entry is stamped with the current UTC time
/// and kept in order. Entries echo to stdout as they are appended so a
/// run is observable live; `flush` persists the full sequence.
#[derive(Debug, Clone)]
pub struct RunLogger {
    entries: Vec<String>,
    echo: bool,
}

impl RunLogger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            echo: true,
        }
    }

    /// Logger without the stdout echo, for tests and `--quiet` runs.
    pub fn quiet() -> Self {
        Self {
            entries: Vec::new(),
            echo: false,
        }
    }

    pub fn append(&mut self, message: &str) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let entry = format!("{timestamp} - {message}");
        if self.echo {
            println!("{entry}");
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the full ordered sequence, one entry per line, overwriting
    /// any prior content at `path`.
    pub fn flush(&self, path: &Path) -> std::io::Result<()> {
        atomic_write_file(path, self.entries.join("\n").as_bytes())
    }
}

impl Default for RunLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn entries_are_timestamped_and_ordered() {
        let mut logger = RunLogger::quiet();
        logger.append("first");
        logger.append("second");
        assert_eq!(logger.len(), 2);
        assert!(logger.entries()[0].ends_with(" - first"));
        assert!(logger.entries()[1].ends_with(" - second"));
        // ISO-8601 UTC with trailing Z: "2024-01-01T00:00:00.000000Z - ..."
        let stamp = logger.entries()[0].split(" - ").next().expect("stamp");
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], "T");
    }

    #[test]
    fn flush_overwrites_with_newline_joined_entries() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("run.log");
        fs::write(&path, "stale contents").expect("seed file");

        let mut logger = RunLogger::quiet();
        logger.append("alpha");
        logger.append("beta");
        logger.flush(&path).expect("flush");

        let written = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - alpha"));
        assert!(lines[1].ends_with(" - beta"));
    }
}
