use serde::{Deserialize, Serialize};

use crate::model::TaskId;
use crate::store::{StoreError, TaskListStore};

/// One store operation, as dispatched by a UI event or read from a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetInput { text: String },
    SubmitInput,
    AddTask {
        text: String,
        #[serde(default)]
        tags: Vec<String>,
    },
    DeleteTask { id: TaskId },
    ToggleComplete { id: TaskId },
    OpenEdit { id: TaskId },
    UpdateDraft { text: String },
    CommitEdit,
    CancelEdit,
    ClearAll,
    MarkAllCompleted,
    AddDraftTag { tag: String },
    RemoveDraftTag { tag: String },
    SetSearchQuery { query: String },
    SetSelectedTag {
        #[serde(default)]
        tag: Option<String>,
    },
    ToggleTheme,
}

/// What happened when a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Created(TaskId),
    /// The store refused the command and is unchanged.
    Ignored(StoreError),
}

impl Outcome {
    pub fn ignored(&self) -> Option<&StoreError> {
        match self {
            Self::Ignored(e) => Some(e),
            _ => None,
        }
    }
}

fn run(store: &mut TaskListStore, cmd: &Command) -> Result<Option<TaskId>, StoreError> {
    match cmd {
        Command::SetInput { text } => store.set_input(text),
        Command::SubmitInput => return store.submit_input().map(Some),
        Command::AddTask { text, tags } => return store.add_task(text, tags).map(Some),
        Command::DeleteTask { id } => store.delete_task(*id),
        Command::ToggleComplete { id } => store.toggle_complete(*id),
        Command::OpenEdit { id } => store.open_edit(*id)?,
        Command::UpdateDraft { text } => store.update_draft(text)?,
        Command::CommitEdit => store.commit_edit()?,
        Command::CancelEdit => store.cancel_edit(),
        Command::ClearAll => store.clear_all(),
        Command::MarkAllCompleted => store.mark_all_completed(),
        Command::AddDraftTag { tag } => store.add_draft_tag(tag)?,
        Command::RemoveDraftTag { tag } => store.remove_draft_tag(tag),
        Command::SetSearchQuery { query } => store.set_search_query(query),
        Command::SetSelectedTag { tag } => store.set_selected_tag(tag.as_deref()),
        Command::ToggleTheme => store.toggle_theme(),
    }
    Ok(None)
}

/// Apply `cmd` to `store`. Store errors are absorbed into [`Outcome::Ignored`]
/// and leave the store as it was.
pub fn apply(store: &mut TaskListStore, cmd: &Command) -> Outcome {
    match run(store, cmd) {
        Ok(Some(id)) => Outcome::Created(id),
        Ok(None) => Outcome::Applied,
        Err(e) => {
            log::debug!("ignored {cmd:?}: {e}");
            Outcome::Ignored(e)
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> serde_json::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}
