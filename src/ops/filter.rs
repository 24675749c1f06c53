use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::task::Task;

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Pending,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Pending, FilterMode::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Pending => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Pending,
            FilterMode::Pending => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Completed,
            FilterMode::Pending => FilterMode::All,
            FilterMode::Completed => FilterMode::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Pending => "Pending",
            FilterMode::Completed => "Completed",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterMode::All => "all",
            FilterMode::Pending => "pending",
            FilterMode::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "pending" => Ok(FilterMode::Pending),
            "completed" | "done" => Ok(FilterMode::Completed),
            _ => Err(format!(
                "invalid filter: {} (expected all, pending, completed)",
                s
            )),
        }
    }
}

/// The tasks shown under `mode`, in list order
pub fn visible(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|t| mode.matches(t)).collect()
}

/// Task counts per filter, for the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn get(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.all,
            FilterMode::Pending => self.pending,
            FilterMode::Completed => self.completed,
        }
    }
}

pub fn counts(tasks: &[Task]) -> FilterCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    FilterCounts {
        all: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}
