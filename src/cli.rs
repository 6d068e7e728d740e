use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tasklist::model::Theme;

#[derive(Parser)]
#[command(name = "tasklist", about = "Terminal todo list with tags and search")]
pub struct Cli {
    /// Path to the config file [default: ~/.tasklist/config.toml]
    #[arg(long, env = "TASKLIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Starting theme (light, dark); overrides the config file
    #[arg(long, global = true, value_parser = Theme::parse)]
    pub theme: Option<Theme>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default)
    Tui,

    /// Apply a JSON-lines command script to an empty list and print the result
    Replay {
        /// Script file (omit to read from stdin)
        file: Option<PathBuf>,
        /// Output the final snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Report ignored commands on stderr
        #[arg(short, long)]
        verbose: bool,
    },
}
