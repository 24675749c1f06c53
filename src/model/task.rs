use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// Stable identity of a task, independent of its position in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }

    /// First 8 hex digits, used for display and prefix matching
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether `prefix` (case-insensitive, dashes ignored) matches this id
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let wanted: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        !wanted.is_empty() && self.0.simple().to_string().starts_with(&wanted)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        TaskId::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
///
/// `color` is a copy of the category color taken when the category was
/// assigned; it is not re-derived if the registry changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub category: String,
    pub color: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a pending task tagged with `category`
    pub fn new(text: impl Into<String>, category: &Category) -> Self {
        Task {
            id: TaskId::new(),
            text: text.into(),
            category: category.name.to_string(),
            color: category.color.to_string(),
            completed: false,
        }
    }

    /// Re-tag this task, taking a fresh snapshot of the category color
    pub fn set_category(&mut self, category: &Category) {
        self.category = category.name.to_string();
        self.color = category.color.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::CATEGORIES;

    #[test]
    fn new_task_is_pending_with_category_color() {
        let task = Task::new("Buy milk", &CATEGORIES[1]);
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.category, "Trabajo");
        assert_eq!(task.color, "#D1FAE5");
        assert!(!task.completed);
    }

    #[test]
    fn serialized_field_names() {
        let task = Task::new("Buy milk", &CATEGORIES[0]);
        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "text", "category", "color", "completed"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj["completed"], serde_json::Value::Bool(false));
    }

    #[test]
    fn id_prefix_matching() {
        let id = TaskId::new();
        let short = id.short();
        assert_eq!(short.len(), 8);
        assert!(id.matches_prefix(&short));
        assert!(id.matches_prefix(&short.to_uppercase()));
        assert!(!id.matches_prefix(""));
        assert!(!id.matches_prefix("zzzz"));
    }

    #[test]
    fn set_category_refreshes_color() {
        let mut task = Task::new("x", &CATEGORIES[0]);
        task.set_category(&CATEGORIES[2]);
        assert_eq!(task.category, "Estudio");
        assert_eq!(task.color, "#c1c1c1");
    }
}
