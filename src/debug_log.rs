use std::fs::{File, OpenOptions};

/// Builder sending records matching `filters` to `file`. Stderr belongs to
/// the terminal UI, so a file is the only sink.
fn builder(file: File, filters: &str) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .parse_filters(filters)
        .format_timestamp_millis();
    builder
}

/// Install the file logger if `TASKLIST_DEBUG` names a file.
/// Filters come from `TASKLIST_LOG` (default `debug`). No-op otherwise.
pub fn init() {
    let Ok(path) = std::env::var("TASKLIST_DEBUG") else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filters = std::env::var("TASKLIST_LOG").unwrap_or_else(|_| "debug".into());
    let _ = builder(file, &filters).try_init();
}
