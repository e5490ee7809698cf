//! Append-only calculation history file
//!
//! One line per successful operation: `[<ctime timestamp>] <entry>`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use deskutils_core::{read_lossy, Result};
use tracing::debug;

/// Default history file name
pub const DEFAULT_HISTORY_FILE: &str = "calc_history.txt";

/// Format a timestamp the way C `ctime` does, e.g. `Thu Jun  5 18:00:00 2025`
pub fn ctime(at: &NaiveDateTime) -> String {
    at.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Full history line for an entry
pub fn history_line(entry: &str, at: &NaiveDateTime) -> String {
    format!("[{}] {}", ctime(at), entry)
}

/// Handle on the history log
#[derive(Debug, Clone)]
pub struct History {
    path: PathBuf,
}

impl History {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line, creating the file if needed
    pub fn append(&self, entry: &str, at: &NaiveDateTime) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", history_line(entry, at))?;
        debug!("Logged to {}: {}", self.path.display(), entry);
        Ok(())
    }

    /// Truncate the log
    pub fn clear(&self) -> Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// All lines in the log
    ///
    /// # Errors
    /// - `Io` when the file does not exist or cannot be read
    pub fn read(&self) -> Result<Vec<String>> {
        let content = read_lossy(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(18, 0, 7)
            .unwrap()
    }

    #[test]
    fn test_ctime_format() {
        assert_eq!(ctime(&at(5)), "Thu Jun  5 18:00:07 2025");
        assert_eq!(ctime(&at(26)), "Thu Jun 26 18:00:07 2025");
    }

    #[test]
    fn test_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::new(dir.path().join(DEFAULT_HISTORY_FILE));

        history.append("Addition: 1.00 + 2.00 = 3.00", &at(26)).unwrap();
        history.append("Power: 2.00 ^ 3.00 = 8.00", &at(26)).unwrap();

        let lines = history.read().unwrap();
        assert_eq!(
            lines,
            vec![
                "[Thu Jun 26 18:00:07 2025] Addition: 1.00 + 2.00 = 3.00",
                "[Thu Jun 26 18:00:07 2025] Power: 2.00 ^ 3.00 = 8.00",
            ]
        );
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::new(dir.path().join(DEFAULT_HISTORY_FILE));
        history.append("Addition: 1.00 + 2.00 = 3.00", &at(1)).unwrap();

        history.clear().unwrap();
        assert!(history.read().unwrap().is_empty());
    }

    #[test]
    fn test_read_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::new(dir.path().join(DEFAULT_HISTORY_FILE));
        std::fs::write(history.path(), b"[Thu Jun 26 18:00:07 2025] caf\xE9\n").unwrap();
        history.append("Addition: 1.00 + 2.00 = 3.00", &at(26)).unwrap();

        let lines = history.read().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[Thu Jun 26 18:00:07 2025] caf\u{FFFD}");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::new(dir.path().join("missing.txt"));
        assert!(history.read().is_err());
    }
}
