use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::io::recovery::{RecoveryEntry, log_recovery};
use crate::io::storage::Storage;

/// A write that did not reach storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// Enqueue order of the failed write
    pub seq: u64,
    pub error: String,
}

enum Job {
    Write { seq: u64, key: String, body: String },
    Flush(Sender<()>),
}

/// Single-writer queue: one background thread applies writes to the
/// storage strictly in the order they were enqueued.
pub struct WriteQueue {
    jobs: Option<Sender<Job>>,
    failures: Receiver<WriteFailure>,
    next_seq: u64,
    last_ok: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl WriteQueue {
    pub fn spawn(storage: Box<dyn Storage>) -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel();
        let (fail_tx, fail_rx) = mpsc::channel();
        let last_ok = Arc::new(AtomicU64::new(0));
        let thread_last_ok = Arc::clone(&last_ok);

        let handle = std::thread::Builder::new()
            .name("tareas-writer".into())
            .spawn(move || run_writer(storage, job_rx, fail_tx, thread_last_ok))?;

        Ok(WriteQueue {
            jobs: Some(job_tx),
            failures: fail_rx,
            next_seq: 1,
            last_ok,
            handle: Some(handle),
        })
    }

    /// Enqueue a full replacement of `key`. Returns the write's sequence number.
    pub fn enqueue(&mut self, key: &str, body: String) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        let job = Job::Write {
            seq,
            key: key.to_string(),
            body,
        };
        if let Some(tx) = &self.jobs
            && tx.send(job).is_err()
        {
            tracing::warn!(seq, "writer thread is gone; write dropped");
        }
        seq
    }

    /// Block until every write enqueued so far has been applied
    pub fn sync(&self) {
        if let Some(tx) = &self.jobs {
            let (done_tx, done_rx) = mpsc::channel();
            if tx.send(Job::Flush(done_tx)).is_ok() {
                let _ = done_rx.recv();
            }
        }
    }

    /// `sync`, then return the failures that are still current.
    pub fn flush(&self) -> Vec<WriteFailure> {
        self.sync();
        self.take_failures()
    }

    /// Failures reported so far, without waiting. A failure followed by a
    /// later successful write is stale and dropped.
    pub fn take_failures(&self) -> Vec<WriteFailure> {
        let last_ok = self.last_ok.load(Ordering::SeqCst);
        self.failures
            .try_iter()
            .filter(|f| f.seq > last_ok)
            .collect()
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        // Closing the channel lets the thread drain pending writes and exit
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_writer(
    mut storage: Box<dyn Storage>,
    jobs: Receiver<Job>,
    failures: Sender<WriteFailure>,
    last_ok: Arc<AtomicU64>,
) {
    for job in jobs {
        match job {
            Job::Write { seq, key, body } => match storage.set(&key, &body) {
                Ok(()) => {
                    last_ok.store(seq, Ordering::SeqCst);
                    tracing::debug!(seq, key = %key, bytes = body.len(), "write applied");
                }
                Err(e) => {
                    tracing::warn!(seq, key = %key, error = %e, "write failed");
                    if let Some(dir) = storage.location(&key).as_deref().and_then(Path::parent) {
                        log_recovery(dir, &RecoveryEntry::now(e.to_string(), body));
                    }
                    let _ = failures.send(WriteFailure {
                        seq,
                        error: e.to_string(),
                    });
                }
            },
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    #[test]
    fn writes_land_in_enqueue_order() {
        let storage = MemoryStorage::new();
        let mut queue = WriteQueue::spawn(Box::new(storage.clone())).unwrap();
        for i in 0..50 {
            queue.enqueue("tasks", format!("[{}]", i));
        }
        assert!(queue.flush().is_empty());
        assert_eq!(storage.snapshot("tasks").as_deref(), Some("[49]"));
    }

    #[test]
    fn drop_drains_pending_writes() {
        let storage = MemoryStorage::new();
        {
            let mut queue = WriteQueue::spawn(Box::new(storage.clone())).unwrap();
            queue.enqueue("tasks", "[\"a\"]".into());
            queue.enqueue("tasks", "[\"b\"]".into());
        }
        assert_eq!(storage.snapshot("tasks").as_deref(), Some("[\"b\"]"));
    }

    #[test]
    fn failure_is_reported_until_a_later_write_succeeds() {
        let storage = MemoryStorage::new();
        let mut queue = WriteQueue::spawn(Box::new(storage.clone())).unwrap();

        storage.set_failing(true);
        let seq = queue.enqueue("tasks", "[1]".into());
        let failures = queue.flush();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].seq, seq);

        // Second failure, then success: the stale failure is dropped
        queue.enqueue("tasks", "[2]".into());
        storage.set_failing(false);
        queue.enqueue("tasks", "[3]".into());
        assert!(queue.flush().is_empty());
        assert_eq!(storage.snapshot("tasks").as_deref(), Some("[3]"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_file_write_goes_to_recovery_log() {
        let tmp = TempDir::new().unwrap();
        // A directory where the document should be makes the rename fail
        std::fs::create_dir_all(tmp.path().join("tasks.json")).unwrap();
        let mut queue = WriteQueue::spawn(Box::new(FileStorage::new(tmp.path()))).unwrap();
        queue.enqueue("tasks", "[\"keep me\"]".into());
        assert_eq!(queue.flush().len(), 1);

        let log = std::fs::read_to_string(tmp.path().join("recovery.log")).unwrap();
        assert!(log.contains("[\"keep me\"]"));
    }
}
