use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::io::storage::{Storage, StorageError};
use crate::io::writer::{WriteFailure, WriteQueue};
use crate::model::category::Category;
use crate::model::task::{Task, TaskId};

/// The single key the task document is stored under
pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored task list at {location} is not valid: {source}")]
    Corrupt {
        location: String,
        source: serde_json::Error,
    },
    #[error("could not serialize task list: {0}")]
    Serialize(serde_json::Error),
    #[error("could not start the writer thread: {0}")]
    Writer(std::io::Error),
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task text must not be empty")]
    EmptyText,
    #[error("save failed: {0}")]
    WriteFailed(String),
}

/// On-disk shape. Documents written before tasks had ids lack `id`.
#[derive(Deserialize)]
struct StoredTask {
    #[serde(default)]
    id: Option<TaskId>,
    text: String,
    category: String,
    color: String,
    #[serde(default)]
    completed: bool,
}

/// Owns the task sequence. Every mutation updates memory and enqueues a
/// full rewrite of the stored document.
pub struct TaskStore {
    tasks: Vec<Task>,
    writer: WriteQueue,
    location: Option<PathBuf>,
}

impl TaskStore {
    /// Load the task document from `storage` (absent → empty) and take
    /// ownership of the storage for all later writes.
    pub fn load<S: Storage + 'static>(storage: S) -> Result<Self, StoreError> {
        let location = storage.location(TASKS_KEY);
        let (tasks, assigned_ids) = match storage.get(TASKS_KEY)? {
            Some(text) if !text.trim().is_empty() => {
                parse_document(&text).map_err(|source| StoreError::Corrupt {
                    location: location
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| format!("key \"{}\"", TASKS_KEY)),
                    source,
                })?
            }
            _ => (Vec::new(), false),
        };
        tracing::debug!(count = tasks.len(), "task list loaded");

        let writer = WriteQueue::spawn(Box::new(storage)).map_err(StoreError::Writer)?;
        let mut store = TaskStore {
            tasks,
            writer,
            location,
        };
        if assigned_ids {
            // Persist generated ids so references stay stable across launches
            tracing::debug!("assigned ids to legacy tasks");
            store.save()?;
        }
        Ok(store)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Identity of the task at `index` in the full (unfiltered) sequence
    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.tasks.get(index).map(|t| t.id)
    }

    /// Path of the stored document, when the storage is file-backed
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a task to the end of the list
    pub fn append(&mut self, task: Task) -> Result<TaskId, StoreError> {
        if task.text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let id = task.id;
        self.tasks.push(task);
        tracing::debug!(%id, "task appended");
        self.save()?;
        Ok(id)
    }

    /// Create and append a pending task
    pub fn add(&mut self, text: impl Into<String>, category: &Category) -> Result<TaskId, StoreError> {
        self.append(Task::new(text, category))
    }

    /// Replace text and category of a task. Completion is left alone.
    pub fn replace(&mut self, id: TaskId, text: String, category: &Category) -> Result<(), StoreError> {
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = self.find_mut(id)?;
        task.text = text;
        task.set_category(category);
        tracing::debug!(%id, "task replaced");
        self.save()
    }

    /// Replace only the text, keeping the stored category and color as-is
    pub fn replace_text(&mut self, id: TaskId, text: String) -> Result<(), StoreError> {
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = self.find_mut(id)?;
        task.text = text;
        tracing::debug!(%id, "task text replaced");
        self.save()
    }

    pub fn replace_at(&mut self, index: usize, text: String, category: &Category) -> Result<(), StoreError> {
        let id = self.id_at_checked(index)?;
        self.replace(id, text, category)
    }

    /// Remove a task, returning it
    pub fn remove(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.short()))?;
        let task = self.tasks.remove(index);
        tracing::debug!(%id, "task removed");
        self.save()?;
        Ok(task)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Task, StoreError> {
        let id = self.id_at_checked(index)?;
        self.remove(id)
    }

    /// Flip completion. Returns the new value.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        tracing::debug!(%id, completed, "task toggled");
        self.save()?;
        Ok(completed)
    }

    pub fn toggle_at(&mut self, index: usize) -> Result<bool, StoreError> {
        let id = self.id_at_checked(index)?;
        self.toggle(id)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Serialize the whole list and enqueue it, replacing prior content
    pub fn save(&mut self) -> Result<(), StoreError> {
        let body = serde_json::to_string(&self.tasks).map_err(StoreError::Serialize)?;
        self.writer.enqueue(TASKS_KEY, body);
        Ok(())
    }

    /// Re-enqueue the current list after a failed write
    pub fn retry_save(&mut self) -> Result<(), StoreError> {
        tracing::debug!(count = self.tasks.len(), "retrying save");
        self.save()
    }

    /// Wait for pending writes, leaving failures for `take_write_failures`
    pub fn sync(&self) {
        self.writer.sync();
    }

    /// Wait until every enqueued write has been applied
    pub fn flush(&self) -> Result<(), StoreError> {
        match self.writer.flush().into_iter().next() {
            Some(failure) => Err(StoreError::WriteFailed(failure.error)),
            None => Ok(()),
        }
    }

    /// Write failures reported since the last call, without waiting
    pub fn take_write_failures(&self) -> Vec<WriteFailure> {
        self.writer.take_failures()
    }

    fn find_mut(&mut self, id: TaskId) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.short()))
    }

    fn id_at_checked(&self, index: usize) -> Result<TaskId, StoreError> {
        self.id_at(index)
            .ok_or_else(|| StoreError::NotFound(format!("#{}", index + 1)))
    }
}

/// Parse the stored document. The flag is set when any task needed an id.
fn parse_document(text: &str) -> Result<(Vec<Task>, bool), serde_json::Error> {
    let stored: Vec<StoredTask> = serde_json::from_str(text)?;
    let mut assigned = false;
    let tasks = stored
        .into_iter()
        .map(|s| Task {
            id: s.id.unwrap_or_else(|| {
                assigned = true;
                TaskId::new()
            }),
            text: s.text,
            category: s.category,
            color: s.color,
            completed: s.completed,
        })
        .collect();
    Ok((tasks, assigned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::{FileStorage, MemoryStorage};
    use crate::model::category::CATEGORIES;
    use tempfile::TempDir;

    fn stored(storage: &MemoryStorage) -> Vec<Task> {
        serde_json::from_str(&storage.snapshot(TASKS_KEY).unwrap()).unwrap()
    }

    fn store_with(texts: &[&str]) -> (TaskStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(storage.clone()).unwrap();
        for text in texts {
            store.add(*text, &Category::default()).unwrap();
        }
        store.flush().unwrap();
        (store, storage)
    }

    #[test]
    fn load_absent_is_empty() {
        let storage = MemoryStorage::new();
        let store = TaskStore::load(storage.clone()).unwrap();
        assert!(store.is_empty());
        store.flush().unwrap();
        // Loading alone writes nothing
        assert!(storage.snapshot(TASKS_KEY).is_none());
    }

    #[test]
    fn load_blank_document_is_empty() {
        let store = TaskStore::load(MemoryStorage::with_entry(TASKS_KEY, "")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_corrupt_document_fails() {
        let result = TaskStore::load(MemoryStorage::with_entry(TASKS_KEY, "{not json"));
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn load_legacy_document_assigns_and_persists_ids() {
        let storage = MemoryStorage::with_entry(
            TASKS_KEY,
            r##"[{"text":"Buy milk","category":"Personal","color":"#FFDDC1","completed":false}]"##,
        );
        let store = TaskStore::load(storage.clone()).unwrap();
        store.flush().unwrap();
        let saved = stored(&storage);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, store.tasks()[0].id);
        assert_eq!(saved[0].text, "Buy milk");
    }

    #[test]
    fn append_grows_by_one_and_is_pending() {
        for text in ["x", "Buy milk", " ", "ñandú 🎉"] {
            let (mut store, storage) = store_with(&["a", "b"]);
            let before = store.len();
            let id = store.add(text, &CATEGORIES[2]).unwrap();
            store.flush().unwrap();

            let saved = stored(&storage);
            assert_eq!(saved.len(), before + 1);
            let task = saved.iter().find(|t| t.id == id).unwrap();
            assert!(!task.completed);
            assert_eq!(task.category, "Estudio");
            assert_eq!(task.color, "#c1c1c1");
        }
    }

    #[test]
    fn append_empty_text_is_rejected() {
        let (mut store, storage) = store_with(&["a"]);
        assert!(matches!(
            store.add("", &Category::default()),
            Err(StoreError::EmptyText)
        ));
        store.flush().unwrap();
        assert_eq!(stored(&storage).len(), 1);
    }

    #[test]
    fn toggle_twice_restores() {
        let (mut store, storage) = store_with(&["a", "b", "c"]);
        let id = store.id_at(1).unwrap();
        let before = store.tasks().to_vec();

        assert!(store.toggle(id).unwrap());
        assert!(!store.toggle(id).unwrap());
        store.flush().unwrap();

        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(stored(&storage), before);
    }

    #[test]
    fn toggle_at_uses_full_sequence() {
        let (mut store, _storage) = store_with(&["a", "b"]);
        assert!(store.toggle_at(1).unwrap());
        assert!(store.tasks()[1].completed);
        assert!(!store.tasks()[0].completed);
        assert!(matches!(store.toggle_at(2), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn remove_takes_out_exactly_that_task() {
        let (mut store, storage) = store_with(&["a", "b", "c"]);
        let id = store.id_at(1).unwrap();
        let removed = store.remove(id).unwrap();
        store.flush().unwrap();

        assert_eq!(removed.text, "b");
        let saved = stored(&storage);
        let texts: Vec<&str> = saved.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert!(saved.iter().all(|t| t.id != id));
    }

    #[test]
    fn remove_unknown_is_not_found_and_keeps_list() {
        let (mut store, _storage) = store_with(&["a"]);
        assert!(matches!(store.remove(TaskId::new()), Err(StoreError::NotFound(_))));
        assert!(matches!(store.remove_at(5), Err(StoreError::NotFound(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_keeps_completion_and_length() {
        let (mut store, storage) = store_with(&["a", "b"]);
        let id = store.id_at(0).unwrap();
        store.toggle(id).unwrap();
        store
            .replace(id, "a2".into(), &CATEGORIES[1])
            .unwrap();
        store.flush().unwrap();

        let saved = stored(&storage);
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].text, "a2");
        assert_eq!(saved[0].category, "Trabajo");
        assert_eq!(saved[0].color, "#D1FAE5");
        assert!(saved[0].completed);
        assert_eq!(saved[1].text, "b");
    }

    #[test]
    fn replace_with_empty_text_is_rejected() {
        let (mut store, _storage) = store_with(&["a"]);
        let id = store.id_at(0).unwrap();
        assert!(matches!(
            store.replace(id, String::new(), &Category::default()),
            Err(StoreError::EmptyText)
        ));
        assert_eq!(store.tasks()[0].text, "a");
        store.replace_at(0, "z".into(), &Category::default()).unwrap();
        assert_eq!(store.tasks()[0].text, "z");
    }

    #[test]
    fn replace_text_keeps_stale_category() {
        let (mut store, storage) = store_with(&[]);
        let mut task = Task::new("Read", &Category::default());
        task.category = "Ocio".into();
        task.color = "#123456".into();
        let id = store.append(task).unwrap();

        store.replace_text(id, "Read more".into()).unwrap();
        store.flush().unwrap();

        let saved = stored(&storage);
        assert_eq!(saved[0].text, "Read more");
        assert_eq!(saved[0].category, "Ocio");
        assert_eq!(saved[0].color, "#123456");
        assert!(matches!(
            store.replace_text(id, String::new()),
            Err(StoreError::EmptyText)
        ));
    }

    #[test]
    fn write_failure_is_surfaced_and_retry_persists() {
        let (mut store, storage) = store_with(&["a"]);
        storage.set_failing(true);
        store.add("b", &Category::default()).unwrap();
        assert!(matches!(store.flush(), Err(StoreError::WriteFailed(_))));
        // Memory keeps the mutation
        assert_eq!(store.len(), 2);
        assert_eq!(stored(&storage).len(), 1);

        storage.set_failing(false);
        store.save().unwrap();
        store.flush().unwrap();
        assert_eq!(stored(&storage).len(), 2);
    }

    #[test]
    fn file_backed_store_survives_reload() {
        let tmp = TempDir::new().unwrap();
        {
            let mut store = TaskStore::load(FileStorage::new(tmp.path())).unwrap();
            store.add("Buy milk", &Category::default()).unwrap();
            store.add("Read", &CATEGORIES[2]).unwrap();
            store.toggle_at(0).unwrap();
            store.flush().unwrap();
            assert_eq!(store.location(), Some(tmp.path().join("tasks.json").as_path()));
        }
        let store = TaskStore::load(FileStorage::new(tmp.path())).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.tasks()[0].completed);
        assert_eq!(store.tasks()[1].category, "Estudio");
    }

    #[test]
    fn corrupt_file_names_its_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("tasks.json"), "[{").unwrap();
        let err = TaskStore::load(FileStorage::new(tmp.path())).err().unwrap();
        assert!(err.to_string().contains("tasks.json"));
        // The corrupt file is left untouched
        assert_eq!(std::fs::read_to_string(tmp.path().join("tasks.json")).unwrap(), "[{");
    }
}
