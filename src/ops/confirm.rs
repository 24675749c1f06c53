use std::io::{self, BufRead, Write};

use crate::model::task::{Task, TaskId};
use crate::ops::store::{StoreError, TaskStore};

/// A delete waiting on the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: TaskId,
    pub text: String,
}

impl DeleteRequest {
    pub fn for_task(task: &Task) -> Self {
        DeleteRequest {
            id: task.id,
            text: task.text.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("Delete \"{}\"?", self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Confirm,
}

/// Cancel is a no-op; confirm removes the task and persists.
pub fn resolve_delete(
    store: &mut TaskStore,
    request: &DeleteRequest,
    choice: ConfirmChoice,
) -> Result<Option<Task>, StoreError> {
    match choice {
        ConfirmChoice::Cancel => Ok(None),
        ConfirmChoice::Confirm => store.remove(request.id).map(Some),
    }
}

/// Asks the user to confirm a destructive action, outside the TUI
pub trait Confirmer {
    fn confirm(&mut self, request: &DeleteRequest) -> ConfirmChoice;
}

/// Always confirms (`--yes`)
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&mut self, _request: &DeleteRequest) -> ConfirmChoice {
        ConfirmChoice::Confirm
    }
}

/// Prompts on a writer and reads a `y`/`yes` answer from a reader.
/// Anything else, including EOF, cancels.
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConfirmer { input, output }
    }
}

impl LineConfirmer<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        LineConfirmer::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&mut self, request: &DeleteRequest) -> ConfirmChoice {
        if write!(self.output, "{} [y/N] ", request.prompt()).is_err() {
            return ConfirmChoice::Cancel;
        }
        let _ = self.output.flush();
        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return ConfirmChoice::Cancel;
        }
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => ConfirmChoice::Confirm,
            _ => ConfirmChoice::Cancel,
        }
    }
}
