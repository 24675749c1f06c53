use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock on the data directory, held for the duration of one
/// document write so a running TUI and a CLI call never interleave.
///
/// The lock file is never removed, so every waiter locks the same inode.
/// The flock is released when the handle drops.
pub struct FileLock {
    _file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another tareas process is writing")]
    Timeout { path: PathBuf },
}

impl FileLock {
    /// Acquire the lock, polling until `timeout` elapses
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = data_dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    return Ok(FileLock { _file: file });
                }
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => return Err(LockError::Timeout { path: lock_path }),
            }
        }
    }

    /// Acquire with the default 2 second timeout
    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, Duration::from_secs(2))
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_is_reacquirable_after_drop() {
        let tmp = TempDir::new().unwrap();
        let lock = FileLock::acquire_default(tmp.path()).unwrap();
        drop(lock);
        assert!(FileLock::acquire_default(tmp.path()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn lock_file_is_kept_and_waiters_share_its_inode() {
        use std::os::unix::fs::MetadataExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".lock");
        let first = FileLock::acquire_default(tmp.path()).unwrap();
        let inode = std::fs::metadata(&path).unwrap().ino();
        drop(first);
        assert!(path.exists());

        let second = FileLock::acquire_default(tmp.path()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().ino(), inode);
        // Held lock still excludes a third taker on the same file
        assert!(matches!(
            FileLock::acquire(tmp.path(), Duration::from_millis(30)),
            Err(LockError::Timeout { .. })
        ));
        drop(second);
    }

    #[cfg(unix)]
    #[test]
    fn contended_lock_times_out() {
        let tmp = TempDir::new().unwrap();
        let _held = FileLock::acquire_default(tmp.path()).unwrap();
        let second = FileLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(matches!(second, Err(LockError::Timeout { .. })));
    }
}
