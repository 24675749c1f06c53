use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- tareas recovery log
     Task lists that could not be saved normally are appended here.
     Copy a block back into tasks.json to restore it.
     Safe to delete once you no longer need it. -->

---
";

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("recovery.log")
}

/// A document that failed to save, with why
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub error: String,
    pub body: String,
}

impl RecoveryEntry {
    pub fn now(error: impl Into<String>, body: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            error: error.into(),
            body: body.into(),
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {} write failed\n\nError: {}\n\n```json\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.error,
        );
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n\n---\n");
        out
    }
}

/// Append an entry to the recovery log. Failures are logged, not returned:
/// this runs on a path that is already handling an error.
pub fn log_recovery(data_dir: &Path, entry: &RecoveryEntry) {
    if let Err(e) = log_recovery_inner(data_dir, entry) {
        tracing::warn!(error = %e, "could not write to recovery log");
    }
}

fn log_recovery_inner(data_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let path = recovery_log_path(data_dir);
    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn log_recovery_writes_header_once() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), &RecoveryEntry::now("disk full", "[]"));
        log_recovery(
            tmp.path(),
            &RecoveryEntry::now("disk full", r#"[{"text":"Buy milk"}]"#),
        );

        let log = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert_eq!(log.matches("tareas recovery log").count(), 1);
        assert_eq!(log.matches("write failed").count(), 2);
        assert!(log.contains("Error: disk full"));
        assert!(log.contains(r#"[{"text":"Buy milk"}]"#));
    }
}
