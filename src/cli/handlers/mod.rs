use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::storage::FileStorage;
use crate::model::category::{CATEGORIES, Category};
use crate::model::task::TaskId;
use crate::ops::confirm::{AssumeYes, Confirmer, DeleteRequest, LineConfirmer, resolve_delete};
use crate::ops::filter::{self, FilterMode};
use crate::ops::notice::Notice;
use crate::ops::store::{StoreError, TaskStore};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, data_dir: &Path, json: bool) -> CmdResult {
    match command {
        Commands::List(args) => cmd_list(data_dir, args, json),
        Commands::Add(args) => cmd_add(data_dir, args, json),
        Commands::Edit(args) => cmd_edit(data_dir, args, json),
        Commands::Toggle(args) => cmd_toggle(data_dir, args, json),
        Commands::Delete(args) => {
            let mut confirmer: Box<dyn Confirmer> = if args.yes {
                Box::new(AssumeYes)
            } else {
                Box::new(LineConfirmer::stdio())
            };
            cmd_delete(data_dir, args, json, confirmer.as_mut())
        }
        Commands::Categories => cmd_categories(json),
        Commands::Path => cmd_path(data_dir),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_store(data_dir: &Path) -> Result<TaskStore, StoreError> {
    TaskStore::load(FileStorage::new(data_dir))
}

/// Case-insensitive category lookup with a helpful error
fn parse_category(name: &str) -> Result<Category, String> {
    Category::find_ignore_case(name).ok_or_else(|| {
        format!(
            "unknown category: {} (expected {})",
            name,
            Category::names().join(", ")
        )
    })
}

/// Resolve a task reference: digits are a 1-based position in the list
/// under `filter`; anything else is an id prefix of at least 4 characters.
/// Digits that name no position are tried as an id prefix, since short ids
/// can be all digits.
pub fn resolve_task(store: &TaskStore, reference: &str, filter: FilterMode) -> Result<TaskId, String> {
    if let Ok(position) = reference.parse::<usize>() {
        let visible = filter::visible(store.tasks(), filter);
        if let Some(task) = position.checked_sub(1).and_then(|i| visible.get(i)) {
            return Ok(task.id);
        }
        let no_position = format!(
            "no task at position {} ({} shown under filter {})",
            position,
            visible.len(),
            filter
        );
        if reference.len() < 4 {
            return Err(no_position);
        }
        return find_by_prefix(store, reference).map_err(|err| match err {
            PrefixError::NotFound => no_position,
            PrefixError::Ambiguous => format!("ambiguous task id prefix: {}", reference),
        });
    }

    if reference.len() < 4 {
        return Err(format!("task id prefix too short: {}", reference));
    }
    find_by_prefix(store, reference).map_err(|err| match err {
        PrefixError::NotFound => format!("task not found: {}", reference),
        PrefixError::Ambiguous => format!("ambiguous task id prefix: {}", reference),
    })
}

enum PrefixError {
    NotFound,
    Ambiguous,
}

fn find_by_prefix(store: &TaskStore, prefix: &str) -> Result<TaskId, PrefixError> {
    let mut matches = store
        .tasks()
        .iter()
        .filter(|t| t.id.matches_prefix(prefix));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (Some(_), Some(_)) => Err(PrefixError::Ambiguous),
        (None, _) => Err(PrefixError::NotFound),
    }
}

fn print_change(json: bool, change: ChangeJson, human: String) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&change)?);
    } else {
        println!("{}", human);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, args: ListArgs, json: bool) -> CmdResult {
    let store = load_store(data_dir)?;
    let counts = filter::counts(store.tasks());
    let visible = filter::visible(store.tasks(), args.filter);

    if json {
        let out = TaskListJson {
            filter: args.filter.to_string(),
            counts,
            tasks: visible
                .iter()
                .enumerate()
                .map(|(i, t)| task_to_json(i + 1, t))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", format_counts(&counts));
    if visible.is_empty() {
        println!("(no tasks)");
    }
    for (i, task) in visible.iter().enumerate() {
        println!("{}", format_task_line(i + 1, task));
    }
    Ok(())
}

fn cmd_categories(json: bool) -> CmdResult {
    if json {
        let out: Vec<CategoryJson> = CATEGORIES.iter().map(category_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for category in &CATEGORIES {
            println!("{}  {}", category.color, category.name);
        }
    }
    Ok(())
}

fn cmd_path(data_dir: &Path) -> CmdResult {
    println!("{}", FileStorage::new(data_dir).key_path(crate::ops::store::TASKS_KEY).display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> CmdResult {
    let category = match args.category.as_deref() {
        Some(name) => parse_category(name)?,
        None => Category::default(),
    };
    if args.text.is_empty() {
        return Err("task text must not be empty".into());
    }

    let mut store = load_store(data_dir)?;
    let id = store.add(args.text.clone(), &category)?;
    store.flush()?;

    print_change(
        json,
        ChangeJson {
            action: "added",
            id: id.to_string(),
            completed: Some(false),
            notice: None,
        },
        format!("added {} ({})  {}", args.text, category.name, id.short()),
    )
}

fn cmd_edit(data_dir: &Path, args: EditArgs, json: bool) -> CmdResult {
    if args.text.is_none() && args.category.is_none() {
        return Err("nothing to change: pass --text and/or --category".into());
    }
    let mut store = load_store(data_dir)?;
    let id = resolve_task(&store, &args.target.task, args.target.filter)?;
    let task = store.get(id).ok_or_else(|| StoreError::NotFound(id.short()))?;

    let text = args.text.unwrap_or_else(|| task.text.clone());
    // Without --category the stored category and color stay, even when the
    // name has since left the registry
    let category_name = match args.category.as_deref() {
        Some(name) => {
            let category = parse_category(name)?;
            store.replace(id, text.clone(), &category)?;
            category.name.to_string()
        }
        None => {
            let name = task.category.clone();
            store.replace_text(id, text.clone())?;
            name
        }
    };
    store.flush()?;

    print_change(
        json,
        ChangeJson {
            action: "edited",
            id: id.to_string(),
            completed: None,
            notice: None,
        },
        format!("edited {} ({})", text, category_name),
    )
}

fn cmd_toggle(data_dir: &Path, args: TaskArgs, json: bool) -> CmdResult {
    let mut store = load_store(data_dir)?;
    let id = resolve_task(&store, &args.task, args.filter)?;
    let completed = store.toggle(id)?;
    store.flush()?;

    let notice = Notice::for_toggle(completed);
    let text = store.get(id).map(|t| t.text.clone()).unwrap_or_default();
    let human = match &notice {
        Some(n) => format!("completed {}\n{} {}", text, n.title(), n),
        None => format!("reopened {}", text),
    };
    print_change(
        json,
        ChangeJson {
            action: "toggled",
            id: id.to_string(),
            completed: Some(completed),
            notice: notice.map(|n| format!("{} {}", n.title(), n)),
        },
        human,
    )
}

fn cmd_delete(data_dir: &Path, args: DeleteArgs, json: bool, confirmer: &mut dyn Confirmer) -> CmdResult {
    let mut store = load_store(data_dir)?;
    let id = resolve_task(&store, &args.target.task, args.target.filter)?;
    let task = store.get(id).ok_or_else(|| StoreError::NotFound(id.short()))?;
    let request = DeleteRequest::for_task(task);

    let choice = confirmer.confirm(&request);
    match resolve_delete(&mut store, &request, choice)? {
        Some(task) => {
            store.flush()?;
            print_change(
                json,
                ChangeJson {
                    action: "deleted",
                    id: task.id.to_string(),
                    completed: None,
                    notice: None,
                },
                format!("deleted {}", task.text),
            )
        }
        None => {
            if !json {
                println!("cancelled");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::load(MemoryStorage::new()).unwrap();
        for text in ["a", "b", "c"] {
            store.add(text, &Category::default()).unwrap();
        }
        store.toggle_at(1).unwrap();
        store
    }

    #[test]
    fn resolve_by_position_respects_filter() {
        let store = sample_store();
        let id = resolve_task(&store, "2", FilterMode::All).unwrap();
        assert_eq!(store.get(id).unwrap().text, "b");
        let id = resolve_task(&store, "2", FilterMode::Pending).unwrap();
        assert_eq!(store.get(id).unwrap().text, "c");
        let id = resolve_task(&store, "1", FilterMode::Completed).unwrap();
        assert_eq!(store.get(id).unwrap().text, "b");
    }

    #[test]
    fn resolve_out_of_range_position() {
        let store = sample_store();
        assert!(resolve_task(&store, "0", FilterMode::All).is_err());
        assert!(resolve_task(&store, "4", FilterMode::All).is_err());
        assert!(resolve_task(&store, "2", FilterMode::Completed).is_err());
    }

    #[test]
    fn resolve_by_id_prefix() {
        let store = sample_store();
        let target = store.tasks()[2].id;
        assert_eq!(resolve_task(&store, &target.short(), FilterMode::All), Ok(target));
        assert_eq!(
            resolve_task(&store, &target.to_string(), FilterMode::All),
            Ok(target)
        );
        assert!(resolve_task(&store, "abc", FilterMode::All).is_err());
        assert!(resolve_task(&store, "zzzzzzzz", FilterMode::All).is_err());
    }

    #[test]
    fn all_digit_short_id_resolves_when_not_a_position() {
        use crate::model::task::Task;

        let mut store = TaskStore::load(MemoryStorage::new()).unwrap();
        let mut task = Task::new("digits", &Category::default());
        task.id = serde_json::from_str("\"12345678-aaaa-4aaa-8aaa-aaaaaaaaaaaa\"").unwrap();
        let id = store.append(task).unwrap();

        assert_eq!(resolve_task(&store, "12345678", FilterMode::All), Ok(id));
        assert_eq!(resolve_task(&store, "1234", FilterMode::All), Ok(id));
        // A real position still wins
        assert_eq!(resolve_task(&store, "1", FilterMode::All), Ok(id));
        let err = resolve_task(&store, "9999", FilterMode::All).unwrap_err();
        assert!(err.starts_with("no task at position 9999"));
        let err = resolve_task(&store, "12", FilterMode::All).unwrap_err();
        assert!(err.starts_with("no task at position 12"));
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(parse_category("trabajo").unwrap().name, "Trabajo");
        let err = parse_category("Ocio").unwrap_err();
        assert!(err.contains("Personal, Trabajo, Estudio"));
    }
}
