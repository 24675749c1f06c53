use serde::Serialize;

use crate::model::category::Category;
use crate::model::task::Task;
use crate::ops::filter::FilterCounts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based position within the listed view
    pub position: usize,
    pub id: String,
    pub text: String,
    pub category: String,
    pub color: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub filter: String,
    pub counts: FilterCounts,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub name: &'static str,
    pub color: &'static str,
}

/// Result of a write command
#[derive(Serialize)]
pub struct ChangeJson {
    pub action: &'static str,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub fn task_to_json(position: usize, task: &Task) -> TaskJson {
    TaskJson {
        position,
        id: task.id.to_string(),
        text: task.text.clone(),
        category: task.category.clone(),
        color: task.color.clone(),
        completed: task.completed,
    }
}

pub fn category_to_json(category: &Category) -> CategoryJson {
    CategoryJson {
        name: category.name,
        color: category.color,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One task per line: `  1. [x] Buy milk (Personal)  1a2b3c4d`
pub fn format_task_line(position: usize, task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    format!(
        "{:>3}. [{}] {} ({})  {}",
        position,
        check,
        task.text,
        task.category,
        task.id.short()
    )
}

/// Filter summary line, e.g. `All (3)  Pending (2)  Completed (1)`
pub fn format_counts(counts: &FilterCounts) -> String {
    format!(
        "All ({})  Pending ({})  Completed ({})",
        counts.all, counts.pending, counts.completed
    )
}
