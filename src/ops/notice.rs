use std::fmt;

/// A one-shot message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A task went from pending to completed
    TaskCompleted,
    /// A save did not reach storage
    SaveFailed(String),
}

impl Notice {
    /// Only a pending → completed transition is announced
    pub fn for_toggle(now_completed: bool) -> Option<Notice> {
        now_completed.then_some(Notice::TaskCompleted)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::TaskCompleted => "Congratulations!",
            Notice::SaveFailed(_) => "Save failed",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TaskCompleted => write!(f, "You completed the task."),
            Notice::SaveFailed(err) => write!(f, "{}", err),
        }
    }
}
