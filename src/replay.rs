use std::io::BufRead;

use anyhow::{Context, Result};

use crate::command::{self, Outcome};
use crate::store::{StoreError, TaskListStore};

/// Tally of a script run.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub applied: usize,
    /// 1-based script line and the reason each ignored command was refused.
    pub ignored: Vec<(usize, StoreError)>,
}

/// Apply a JSON-lines command script to `store`, in order.
///
/// Refused commands are recorded and skipped. A line that does not parse as
/// a command aborts the run.
pub fn replay<R: BufRead>(store: &mut TaskListStore, reader: R) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();
    for (idx, line) in reader.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        let Some(cmd) = command::parse_line(&line)
            .with_context(|| format!("line {lineno}: invalid command"))?
        else {
            continue;
        };
        match command::apply(store, &cmd) {
            Outcome::Ignored(e) => report.ignored.push((lineno, e)),
            Outcome::Applied | Outcome::Created(_) => report.applied += 1,
        }
    }
    log::debug!(
        "replay: {} applied, {} ignored",
        report.applied,
        report.ignored.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view;

    #[test]
    fn replays_in_order() {
        let script = r#"
# two tasks, then search
{"op":"add_task","text":"Buy milk"}
{"op":"add_task","text":"Walk dog","tags":["Errand"]}
{"op":"set_search_query","query":"walk"}
"#;
        let mut store = TaskListStore::new();
        let report = replay(&mut store, script.as_bytes()).unwrap();
        assert_eq!(report.applied, 3);
        assert!(report.ignored.is_empty());
        let visible = view::visible_tasks(&store);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "Walk dog");
    }

    #[test]
    fn records_ignored_lines() {
        let script = "{\"op\":\"add_task\",\"text\":\"  \"}\n{\"op\":\"commit_edit\"}\n{\"op\":\"clear_all\"}\n";
        let mut store = TaskListStore::new();
        let report = replay(&mut store, script.as_bytes()).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.ignored.len(), 2);
        assert_eq!(report.ignored[0].0, 1);
        assert!(matches!(report.ignored[0].1, StoreError::Rejected(_)));
        assert_eq!(report.ignored[1].0, 2);
        assert!(matches!(report.ignored[1].1, StoreError::InvalidState(_)));
    }

    #[test]
    fn malformed_line_is_fatal() {
        let script = "{\"op\":\"clear_all\"}\n\n{\"op\":\"explode\"}\n";
        let mut store = TaskListStore::new();
        let err = replay(&mut store, script.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "unexpected error: {err}");
    }
}
