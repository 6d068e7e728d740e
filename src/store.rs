use thiserror::Error;

use crate::model::{EditSession, FilterState, Task, TaskId, Theme};
use crate::validate::{build_tag_set, normalize_text};

pub const DEFAULT_TAG: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Input failed a validation precondition. State is unchanged.
    #[error("rejected: {0}")]
    Rejected(String),
    /// The operation's required state does not hold. State is unchanged.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Owns every task plus the transient UI state around them.
///
/// All operations are synchronous and leave the store untouched when they
/// return an error.
#[derive(Debug, Clone)]
pub struct TaskListStore {
    tasks: Vec<Task>,
    next_id: u64,
    input: String,
    tag_draft: Vec<String>,
    edit: Option<EditSession>,
    filter: FilterState,
    theme: Theme,
    default_tag: String,
}

impl Default for TaskListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_TAG, Theme::Light)
    }

    pub fn with_defaults(default_tag: &str, theme: Theme) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            input: String::new(),
            tag_draft: Vec::new(),
            edit: None,
            filter: FilterState::default(),
            theme,
            default_tag: default_tag.to_string(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn tag_draft(&self) -> &[String] {
        &self.tag_draft
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    // ── Task collection ────────────────────────────────────────────────

    /// Append a new task. An empty `tags` slice gets the default tag.
    /// Clears the input buffer and the tag draft on success.
    pub fn add_task<S: AsRef<str>>(&mut self, text: &str, tags: &[S]) -> StoreResult<TaskId> {
        let Some(text) = normalize_text(text) else {
            return Err(StoreError::Rejected("task text must not be empty".into()));
        };
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let tags = build_tag_set(tags, &self.default_tag);
        log::debug!("add task {id}: {text:?} tags={tags:?}");
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            tags,
        });
        self.input.clear();
        self.tag_draft.clear();
        Ok(id)
    }

    /// Create a task from the input buffer and the staged tags.
    pub fn submit_input(&mut self) -> StoreResult<TaskId> {
        let text = self.input.clone();
        let tags = self.tag_draft.clone();
        self.add_task(&text, &tags)
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn delete_task(&mut self, id: TaskId) {
        let Some(pos) = self.position(id) else {
            return;
        };
        self.tasks.remove(pos);
        if self.edit.as_ref().is_some_and(|s| s.target == id) {
            log::debug!("edit target {id} deleted; closing edit session");
            self.edit = None;
        }
        log::debug!("deleted task {id}");
    }

    pub fn toggle_complete(&mut self, id: TaskId) {
        if let Some(pos) = self.position(id) {
            let task = &mut self.tasks[pos];
            task.completed = !task.completed;
        }
    }

    /// Remove every task. Ids keep increasing afterwards.
    pub fn clear_all(&mut self) {
        log::debug!("clearing {} tasks", self.tasks.len());
        self.tasks.clear();
        self.edit = None;
    }

    pub fn mark_all_completed(&mut self) {
        for task in &mut self.tasks {
            task.completed = true;
        }
    }

    // ── Edit session ───────────────────────────────────────────────────

    pub fn open_edit(&mut self, id: TaskId) -> StoreResult<()> {
        if let Some(session) = &self.edit {
            return Err(StoreError::InvalidState(format!(
                "already editing task {}",
                session.target
            )));
        }
        let Some(task) = self.get(id) else {
            return Err(StoreError::InvalidState(format!("task {id} not found")));
        };
        self.edit = Some(EditSession {
            target: id,
            draft: task.text.clone(),
        });
        Ok(())
    }

    pub fn update_draft(&mut self, text: &str) -> StoreResult<()> {
        let Some(session) = self.edit.as_mut() else {
            return Err(StoreError::InvalidState("no edit in progress".into()));
        };
        session.draft = text.to_string();
        Ok(())
    }

    /// Replace the target's text with the trimmed draft and close the session.
    /// An empty draft is rejected and the session stays open.
    pub fn commit_edit(&mut self) -> StoreResult<()> {
        let Some(session) = &self.edit else {
            return Err(StoreError::InvalidState("no edit in progress".into()));
        };
        let Some(text) = normalize_text(&session.draft) else {
            return Err(StoreError::Rejected("task text must not be empty".into()));
        };
        let text = text.to_string();
        let target = session.target;
        let Some(pos) = self.position(target) else {
            return Err(StoreError::InvalidState(format!("task {target} not found")));
        };
        log::debug!("task {target} text -> {text:?}");
        self.tasks[pos].text = text;
        self.edit = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    // ── Tag draft ──────────────────────────────────────────────────────

    pub fn add_draft_tag(&mut self, tag: &str) -> StoreResult<()> {
        let Some(tag) = normalize_text(tag) else {
            return Err(StoreError::Rejected("tag must not be empty".into()));
        };
        if self.tag_draft.iter().any(|t| t == tag) {
            return Err(StoreError::Rejected(format!("tag '{tag}' already staged")));
        }
        self.tag_draft.push(tag.to_string());
        Ok(())
    }

    pub fn remove_draft_tag(&mut self, tag: &str) {
        self.tag_draft.retain(|t| t != tag);
    }

    // ── Filter and display ─────────────────────────────────────────────

    pub fn set_search_query(&mut self, query: &str) {
        self.filter.search_query = query.to_string();
    }

    /// `Some("")` clears the tag filter, same as `None`.
    pub fn set_selected_tag(&mut self, tag: Option<&str>) {
        self.filter.selected_tag = tag.filter(|t| !t.is_empty()).map(str::to_string);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        log::debug!("theme -> {}", self.theme);
    }
}
