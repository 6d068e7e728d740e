//! Read-only views derived from a [`TaskListStore`].
//!
//! Nothing here is cached: every call recomputes from the store.

use serde::Serialize;

use crate::model::{EditSession, FilterState, Task, Theme};
use crate::store::TaskListStore;

/// Case-insensitive substring match. An empty query matches everything.
fn matches_query(task: &Task, query_lower: &str) -> bool {
    query_lower.is_empty() || task.text.to_lowercase().contains(query_lower)
}

fn matches_tag(task: &Task, selected: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(tag) => task.has_tag(tag),
    }
}

/// Tasks passing the current search query and tag filter, in insertion order.
pub fn visible_tasks(store: &TaskListStore) -> Vec<&Task> {
    let filter = store.filter();
    let query = filter.search_query.to_lowercase();
    let selected = filter.selected_tag.as_deref();
    store
        .tasks()
        .iter()
        .filter(|t| matches_query(t, &query) && matches_tag(t, selected))
        .collect()
}

/// Every tag used by any task, deduplicated, in first-seen order.
pub fn available_tags(store: &TaskListStore) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for task in store.tasks() {
        for tag in &task.tags {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// Completed and total counts over the whole collection.
pub fn counts(store: &TaskListStore) -> (usize, usize) {
    let done = store.tasks().iter().filter(|t| t.completed).count();
    (done, store.tasks().len())
}

/// Everything the presentation layer is allowed to see.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub visible_tasks: Vec<&'a Task>,
    pub available_tags: Vec<&'a str>,
    pub filter: &'a FilterState,
    pub edit: Option<&'a EditSession>,
    pub input: &'a str,
    pub tag_draft: &'a [String],
    pub theme: Theme,
}

impl<'a> Snapshot<'a> {
    pub fn of(store: &'a TaskListStore) -> Self {
        Self {
            visible_tasks: visible_tasks(store),
            available_tags: available_tags(store),
            filter: store.filter(),
            edit: store.edit_session(),
            input: store.input(),
            tag_draft: store.tag_draft(),
            theme: store.theme(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TAGS: &[&str] = &[];

    fn texts(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.text.clone()).collect()
    }

    fn sample() -> TaskListStore {
        let mut store = TaskListStore::new();
        store.add_task("Buy milk", NO_TAGS).unwrap();
        store.add_task("Walk dog", &["Errand"]).unwrap();
        store.add_task("File taxes", &["Work", "Errand"]).unwrap();
        store
    }

    #[test]
    fn no_filter_shows_all_in_order() {
        let store = sample();
        assert_eq!(
            texts(&visible_tasks(&store)),
            vec!["Buy milk", "Walk dog", "File taxes"]
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut store = sample();
        store.set_search_query("WALK");
        assert_eq!(texts(&visible_tasks(&store)), vec!["Walk dog"]);
        store.set_search_query("i");
        assert_eq!(
            texts(&visible_tasks(&store)),
            vec!["Buy milk", "File taxes"]
        );
    }

    #[test]
    fn tag_filter_combines_with_search() {
        let mut store = sample();
        store.set_selected_tag(Some("Errand"));
        assert_eq!(
            texts(&visible_tasks(&store)),
            vec!["Walk dog", "File taxes"]
        );
        store.set_search_query("tax");
        assert_eq!(texts(&visible_tasks(&store)), vec!["File taxes"]);
        store.set_selected_tag(Some("General"));
        assert!(visible_tasks(&store).is_empty());
    }

    #[test]
    fn tag_filter_is_exact() {
        let mut store = sample();
        store.set_selected_tag(Some("errand"));
        assert!(visible_tasks(&store).is_empty());
    }

    #[test]
    fn available_tags_first_seen_order() {
        let store = sample();
        assert_eq!(available_tags(&store), vec!["General", "Errand", "Work"]);
    }

    #[test]
    fn available_tags_ignore_filter() {
        let mut store = sample();
        store.set_search_query("nothing matches");
        assert_eq!(available_tags(&store).len(), 3);
        assert!(visible_tasks(&store).is_empty());
    }

    #[test]
    fn counts_track_completion() {
        let mut store = sample();
        assert_eq!(counts(&store), (0, 3));
        let id = store.tasks()[0].id;
        store.toggle_complete(id);
        assert_eq!(counts(&store), (1, 3));
    }

    #[test]
    fn snapshot_serializes() {
        let mut store = sample();
        store.set_search_query("dog");
        let json = serde_json::to_value(Snapshot::of(&store)).unwrap();
        assert_eq!(json["visible_tasks"][0]["text"], "Walk dog");
        assert_eq!(json["filter"]["search_query"], "dog");
        assert_eq!(json["theme"], "light");
        assert!(json["edit"].is_null());
    }
}
