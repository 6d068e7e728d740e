mod cli;

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use tasklist::config::Config;
use tasklist::store::TaskListStore;
use tasklist::view::Snapshot;
use tasklist::{debug_log, output, replay, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    debug_log::init();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let theme = cli.theme.unwrap_or_else(|| config.theme());
    let mut store = TaskListStore::with_defaults(config.default_tag(), theme);

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            log::info!("starting tui (theme {theme})");
            tui::run(&mut store, config.tick_ms())?;
        }

        Command::Replay {
            file,
            json,
            verbose,
        } => {
            let report = match &file {
                Some(path) => {
                    let f = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    replay::replay(&mut store, BufReader::new(f))?
                }
                None => replay::replay(&mut store, io::stdin().lock())?,
            };
            if verbose {
                for (lineno, e) in &report.ignored {
                    eprintln!("line {lineno}: {e}");
                }
            }
            let snapshot = Snapshot::of(&store);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", output::format_snapshot(&snapshot));
            }
        }
    }

    Ok(())
}
