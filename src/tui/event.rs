use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::command::Command;

/// Result of handling a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Continue,
}

/// Handle a key press. Every store mutation goes through `App::dispatch`.
pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    app.error = None;
    match app.mode {
        Mode::Normal => return handle_normal(app, key),
        Mode::Input => handle_input(app, key),
        Mode::Tag => handle_tag(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Help => {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                app.enter_mode(Mode::Normal);
            }
        }
        Mode::ConfirmClear => {
            app.enter_mode(Mode::Normal);
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) {
                app.dispatch(Command::ClearAll);
            }
        }
    }
    KeyAction::Continue
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Apply a single-line text edit to `current`. Returns `None` if the key
/// is not a text edit.
fn edit_text(current: &str, key: &KeyEvent) -> Option<String> {
    if is_ctrl(key, 'u') {
        return Some(String::new());
    }
    match key.code {
        KeyCode::Backspace => {
            let mut s = current.to_string();
            s.pop();
            Some(s)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut s = current.to_string();
            s.push(c);
            Some(s)
        }
        _ => None,
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.on_selected(|row| row.toggle()),
        KeyCode::Char('e') | KeyCode::Enter => app.on_selected(|row| row.edit()),
        KeyCode::Char('d') | KeyCode::Delete => app.on_selected(|row| row.delete()),
        KeyCode::Char('a') | KeyCode::Char('i') => app.enter_mode(Mode::Input),
        KeyCode::Char('t') => app.enter_mode(Mode::Tag),
        KeyCode::Char('/') => app.enter_mode(Mode::Search),
        KeyCode::Char('f') => app.cycle_tag_filter(true),
        KeyCode::Char('F') => app.cycle_tag_filter(false),
        KeyCode::Char('0') => {
            app.dispatch(Command::SetSelectedTag { tag: None });
        }
        KeyCode::Char('M') => {
            app.dispatch(Command::MarkAllCompleted);
        }
        KeyCode::Char('C') => {
            if !app.store.tasks().is_empty() {
                app.enter_mode(Mode::ConfirmClear);
            }
        }
        KeyCode::Char('T') => {
            app.dispatch(Command::ToggleTheme);
        }
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.enter_mode(Mode::Normal),
        KeyCode::Tab => app.enter_mode(Mode::Tag),
        KeyCode::Enter => {
            app.dispatch(Command::SubmitInput);
        }
        _ => {
            if let Some(text) = edit_text(app.store.input(), &key) {
                app.dispatch(Command::SetInput { text });
            }
        }
    }
}

fn handle_tag(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 'u') {
        app.tag_buf.clear();
        return;
    }
    match key.code {
        KeyCode::Esc => {
            app.tag_buf.clear();
            app.enter_mode(Mode::Normal);
        }
        KeyCode::Tab => app.enter_mode(Mode::Input),
        KeyCode::Enter => {
            if app.tag_buf.trim().is_empty() {
                app.tag_buf.clear();
                app.enter_mode(Mode::Input);
            } else {
                app.stage_tag();
            }
        }
        KeyCode::Backspace => app.tag_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.tag_buf.push(c)
        }
        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.enter_mode(Mode::Normal),
        KeyCode::Esc => {
            app.dispatch(Command::SetSearchQuery {
                query: String::new(),
            });
            app.enter_mode(Mode::Normal);
        }
        _ => {
            let current = app.store.filter().search_query.clone();
            if let Some(query) = edit_text(&current, &key) {
                app.dispatch(Command::SetSearchQuery { query });
            }
        }
    }
}

fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.dispatch(Command::CancelEdit);
        }
        KeyCode::Enter => {
            app.dispatch(Command::CommitEdit);
        }
        _ => {
            let Some(draft) = app.store.edit_session().map(|s| s.draft.clone()) else {
                return;
            };
            if let Some(text) = edit_text(&draft, &key) {
                app.dispatch(Command::UpdateDraft { text });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskListStore;
    use crate::view;

    fn press(app: &mut App, code: KeyCode) -> KeyAction {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn add_task_with_tags_from_keys() {
        let mut store = TaskListStore::new();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Walk dog");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Errand");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Input);
        press(&mut app, KeyCode::Enter);

        let task = &app.store.tasks()[0];
        assert_eq!(task.text, "Walk dog");
        assert_eq!(task.tags, vec!["Errand"]);
        assert_eq!(app.store.input(), "");
    }

    #[test]
    fn quit_from_normal_only() {
        let mut store = TaskListStore::new();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(app.store.input(), "q");
        press(&mut app, KeyCode::Esc);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyAction::Quit);
    }

    #[test]
    fn edit_via_keys() {
        let mut store = TaskListStore::new();
        store.add_task("Buy milk", &[] as &[&str]).unwrap();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "eggs");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.tasks()[0].text, "Buy eggs");
    }

    #[test]
    fn ctrl_u_clears_draft_and_commit_is_refused() {
        let mut store = TaskListStore::new();
        store.add_task("Keep", &[] as &[&str]).unwrap();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Enter);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Edit);
        assert!(app.error.is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.tasks()[0].text, "Keep");
    }

    #[test]
    fn search_is_live_and_esc_clears() {
        let mut store = TaskListStore::new();
        store.add_task("Buy milk", &[] as &[&str]).unwrap();
        store.add_task("Walk dog", &["Errand"]).unwrap();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "walk");
        assert_eq!(view::visible_tasks(app.store).len(), 1);
        press(&mut app, KeyCode::Esc);
        assert_eq!(view::visible_tasks(app.store).len(), 2);
    }

    #[test]
    fn toggle_mark_all_and_clear() {
        let mut store = TaskListStore::new();
        store.add_task("a", &[] as &[&str]).unwrap();
        store.add_task("b", &[] as &[&str]).unwrap();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);
        press(&mut app, KeyCode::Char('M'));
        assert!(app.store.tasks().iter().all(|t| t.completed));

        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.mode, Mode::ConfirmClear);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.tasks().len(), 2);
        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn theme_and_help() {
        let mut store = TaskListStore::new();
        let mut app = App::new(&mut store);
        press(&mut app, KeyCode::Char('T'));
        assert_eq!(app.store.theme(), crate::model::Theme::Dark);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyAction::Continue);
        assert_eq!(app.mode, Mode::Normal);
    }
}
