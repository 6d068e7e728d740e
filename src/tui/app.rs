use ratatui::widgets::ListState;

use crate::command::{self, Command, Outcome};
use crate::store::TaskListStore;
use crate::ui::TaskItemView;
use crate::view;

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Tag,
    Search,
    Edit,
    Help,
    ConfirmClear,
}

pub struct App<'s> {
    pub store: &'s mut TaskListStore,
    pub cursor: usize,
    pub list_state: ListState,
    pub mode: Mode,
    /// Tag being typed before it is staged on the store.
    pub tag_buf: String,
    /// Reason the last command was ignored, shown until the next key.
    pub error: Option<String>,
}

impl<'s> App<'s> {
    pub fn new(store: &'s mut TaskListStore) -> Self {
        let mut app = App {
            store,
            cursor: 0,
            list_state: ListState::default(),
            mode: Mode::Normal,
            tag_buf: String::new(),
            error: None,
        };
        app.clamp_cursor();
        app
    }

    /// Apply a command to the store and resync view state around it.
    pub fn dispatch(&mut self, cmd: Command) -> Outcome {
        let outcome = command::apply(self.store, &cmd);
        if let Some(e) = outcome.ignored() {
            self.error = Some(e.to_string());
        }
        self.sync_mode();
        self.clamp_cursor();
        outcome
    }

    fn sync_mode(&mut self) {
        let editing = self.store.edit_session().is_some();
        if editing {
            self.mode = Mode::Edit;
        } else if self.mode == Mode::Edit {
            self.mode = Mode::Normal;
        }
    }

    pub fn visible_len(&self) -> usize {
        view::visible_tasks(self.store).len()
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Clamp cursor after the visible list changes.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
            self.list_state.select(None);
        } else {
            if self.cursor >= len {
                self.cursor = len - 1;
            }
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Dispatch one of the selected row's handles, if a row is selected.
    pub fn on_selected(&mut self, handle: impl FnOnce(&TaskItemView) -> Command) {
        let cmd = view::visible_tasks(self.store)
            .get(self.cursor)
            .map(|task| handle(&TaskItemView::new(task, true)));
        if let Some(cmd) = cmd {
            self.dispatch(cmd);
        }
    }

    /// Move the tag filter to the next (or previous) available tag.
    /// Cycling past either end returns to "all tags".
    pub fn cycle_tag_filter(&mut self, forward: bool) {
        let tags: Vec<String> = view::available_tags(self.store)
            .into_iter()
            .map(str::to_string)
            .collect();
        if tags.is_empty() {
            return;
        }
        let current = self
            .store
            .filter()
            .selected_tag
            .as_ref()
            .and_then(|sel| tags.iter().position(|t| t == sel));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(tags.len() - 1),
            (Some(i), true) if i + 1 < tags.len() => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        self.dispatch(Command::SetSelectedTag {
            tag: next.map(|i| tags[i].clone()),
        });
    }

    pub fn stage_tag(&mut self) {
        let tag = std::mem::take(&mut self.tag_buf);
        if let Outcome::Ignored(_) = self.dispatch(Command::AddDraftTag { tag: tag.clone() }) {
            self.tag_buf = tag;
        }
    }

    /// Backspace in the tag field: delete a character, or unstage the last
    /// tag when the field is already empty.
    pub fn tag_backspace(&mut self) {
        if self.tag_buf.pop().is_some() {
            return;
        }
        if let Some(last) = self.store.tag_draft().last().cloned() {
            self.dispatch(Command::RemoveDraftTag { tag: last });
        }
    }

    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;

    fn store_with(texts: &[&str]) -> TaskListStore {
        let mut store = TaskListStore::new();
        for text in texts {
            store.add_task(text, &[] as &[&str]).unwrap();
        }
        store
    }

    #[test]
    fn cursor_clamps_after_delete() {
        let mut store = store_with(&["a", "b"]);
        let mut app = App::new(&mut store);
        app.move_down();
        assert_eq!(app.cursor, 1);
        app.on_selected(|row| row.delete());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.store.tasks().len(), 1);
        app.on_selected(|row| row.delete());
        assert_eq!(app.list_state.selected(), None);
        app.on_selected(|row| row.delete());
        assert!(app.error.is_none());
    }

    #[test]
    fn move_stops_at_ends() {
        let mut store = store_with(&["a", "b"]);
        let mut app = App::new(&mut store);
        app.move_up();
        assert_eq!(app.cursor, 0);
        app.move_down();
        app.move_down();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn edit_mode_follows_session() {
        let mut store = store_with(&["a"]);
        let mut app = App::new(&mut store);
        app.on_selected(|row| row.edit());
        assert_eq!(app.mode, Mode::Edit);
        app.dispatch(Command::UpdateDraft { text: " ".into() });
        app.dispatch(Command::CommitEdit);
        assert_eq!(app.mode, Mode::Edit);
        assert!(app.error.is_some());
        app.dispatch(Command::CancelEdit);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn cycle_tag_filter_wraps_to_all() {
        let mut store = TaskListStore::new();
        store.add_task("a", &["Work"]).unwrap();
        store.add_task("b", &["Home"]).unwrap();
        let mut app = App::new(&mut store);
        app.cycle_tag_filter(true);
        assert_eq!(app.store.filter().selected_tag.as_deref(), Some("Work"));
        app.cycle_tag_filter(true);
        assert_eq!(app.store.filter().selected_tag.as_deref(), Some("Home"));
        app.cycle_tag_filter(true);
        assert!(app.store.filter().selected_tag.is_none());
        app.cycle_tag_filter(false);
        assert_eq!(app.store.filter().selected_tag.as_deref(), Some("Home"));
    }

    #[test]
    fn tag_staging() {
        let mut store = TaskListStore::new();
        let mut app = App::new(&mut store);
        app.tag_buf = "Work".into();
        app.stage_tag();
        assert!(app.tag_buf.is_empty());
        app.tag_buf = "Work".into();
        app.stage_tag();
        assert_eq!(app.tag_buf, "Work");
        assert!(app.error.is_some());

        app.tag_buf.clear();
        app.tag_backspace();
        assert!(app.store.tag_draft().is_empty());
    }

    #[test]
    fn filter_change_clamps_cursor() {
        let mut store = store_with(&["apple", "banana", "cherry"]);
        let mut app = App::new(&mut store);
        app.move_down();
        app.move_down();
        app.dispatch(Command::SetSearchQuery {
            query: "an".into(),
        });
        assert_eq!(app.cursor, 0);
        assert_eq!(view::visible_tasks(app.store)[app.cursor].id, TaskId(2));
    }
}
