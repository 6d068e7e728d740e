use crate::model::Task;
use crate::view::Snapshot;

pub fn format_task_line(task: &Task) -> String {
    format!("[{}] {:>3}  {}  ({})\n", task.icon(), task.id, task.text, task.tags.join(", "))
}

pub fn format_task_list(tasks: &[&Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&format_task_line(task));
    }
    out
}

pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut out = format_task_list(&snapshot.visible_tasks);
    if snapshot.visible_tasks.is_empty() {
        out.push_str("No tasks.\n");
    }
    out.push('\n');
    if !snapshot.available_tags.is_empty() {
        out.push_str(&format!("Tags:   {}\n", snapshot.available_tags.join(", ")));
    }
    if !snapshot.filter.search_query.is_empty() {
        out.push_str(&format!("Search: {}\n", snapshot.filter.search_query));
    }
    if let Some(ref tag) = snapshot.filter.selected_tag {
        out.push_str(&format!("Filter: {tag}\n"));
    }
    if let Some(edit) = snapshot.edit {
        out.push_str(&format!("Editing {}: {}\n", edit.target, edit.draft));
    }
    out.push_str(&format!("Theme:  {}\n", snapshot.theme));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskListStore;

    #[test]
    fn task_line_shows_mark_and_tags() {
        let mut store = TaskListStore::new();
        let id = store.add_task("Walk dog", &["Errand", "Outside"]).unwrap();
        store.toggle_complete(id);
        let line = format_task_line(store.get(id).unwrap());
        assert_eq!(line, "[x]   1  Walk dog  (Errand, Outside)\n");
    }

    #[test]
    fn snapshot_text() {
        let mut store = TaskListStore::new();
        store.add_task("Buy milk", &[] as &[&str]).unwrap();
        store.set_search_query("milk");
        store.toggle_theme();
        let text = format_snapshot(&Snapshot::of(&store));
        assert!(text.starts_with("[ ]   1  Buy milk  (General)\n"));
        assert!(text.contains("Tags:   General\n"));
        assert!(text.contains("Search: milk\n"));
        assert!(text.contains("Theme:  dark\n"));
        assert!(!text.contains("Filter:"));
    }

    #[test]
    fn empty_snapshot() {
        let store = TaskListStore::new();
        let text = format_snapshot(&Snapshot::of(&store));
        assert!(text.starts_with("No tasks.\n"));
        assert!(!text.contains("Tags:"));
    }
}
