use crate::model::category::{CATEGORIES, Category};
use crate::model::task::{Task, TaskId};
use crate::ops::store::{StoreError, TaskStore};

/// The form's in-progress values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub text: String,
    pub category: Category,
    /// Stored category name that is no longer in the registry. Kept until
    /// the user picks a category, so a text-only edit leaves it alone.
    pub stale_category: Option<String>,
}

impl Draft {
    /// Seed from an existing task. An unknown category name is kept as
    /// `stale_category` and the picker starts on the default category.
    pub fn from_task(task: &Task) -> Self {
        let known = Category::find(&task.category);
        Draft {
            text: task.text.clone(),
            category: known.unwrap_or_default(),
            stale_category: known.is_none().then(|| task.category.clone()),
        }
    }
}

/// Create/edit form, shared by both flows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Editor {
    #[default]
    Closed,
    Create(Draft),
    Edit { id: TaskId, draft: Draft },
}

/// What a confirm did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Created(TaskId),
    Updated(TaskId),
    /// Empty text; the form stays open and nothing is stored
    Rejected,
    /// The form was closed
    Idle,
}

impl Editor {
    pub fn open_create(&mut self) {
        *self = Editor::Create(Draft::default());
    }

    pub fn open_edit(&mut self, store: &TaskStore, id: TaskId) -> Result<(), StoreError> {
        let task = store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.short()))?;
        *self = Editor::Edit {
            id,
            draft: Draft::from_task(task),
        };
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Editor::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Editor::Edit { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Editor::Closed => None,
            Editor::Create(draft) | Editor::Edit { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            Editor::Closed => None,
            Editor::Create(draft) | Editor::Edit { draft, .. } => Some(draft),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.text = text.into();
        }
    }

    pub fn select_category(&mut self, category: Category) {
        if let Some(draft) = self.draft_mut() {
            draft.category = category;
            draft.stale_category = None;
        }
    }

    pub fn next_category(&mut self) {
        self.step_category(1);
    }

    pub fn prev_category(&mut self) {
        self.step_category(CATEGORIES.len() - 1);
    }

    fn step_category(&mut self, step: usize) {
        if let Some(draft) = self.draft_mut() {
            // The first step off a stale category lands on the picker's start
            if draft.stale_category.take().is_none() {
                let i = Category::index_of(draft.category.name);
                draft.category = CATEGORIES[(i + step) % CATEGORIES.len()];
            }
        }
    }

    /// Discard the draft and close
    pub fn cancel(&mut self) {
        *self = Editor::Closed;
    }

    /// Apply the draft to the store. Empty text is rejected silently and the
    /// form stays open; any other store error closes the form.
    pub fn confirm(&mut self, store: &mut TaskStore) -> Result<EditorOutcome, StoreError> {
        let outcome = match self {
            Editor::Closed => return Ok(EditorOutcome::Idle),
            Editor::Create(draft) => {
                if draft.text.is_empty() {
                    return Ok(EditorOutcome::Rejected);
                }
                store.add(draft.text.clone(), &draft.category).map(EditorOutcome::Created)
            }
            Editor::Edit { id, draft } => {
                if draft.text.is_empty() {
                    return Ok(EditorOutcome::Rejected);
                }
                let id = *id;
                let replaced = if draft.stale_category.is_some() {
                    store.replace_text(id, draft.text.clone())
                } else {
                    store.replace(id, draft.text.clone(), &draft.category)
                };
                replaced.map(|()| EditorOutcome::Updated(id))
            }
        };
        *self = Editor::Closed;
        outcome
    }
}
