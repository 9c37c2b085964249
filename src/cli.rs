use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gh-board")]
#[command(author, version, about = "Browse GitHub Projects as a kanban board in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (defaults to <config dir>/gh-board/config.toml)
    #[arg(long, global = true, env = "GH_BOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List projects across all your organizations (default)
    #[command(visible_alias = "ls")]
    List,

    /// Open one project's board
    #[command(visible_alias = "cards")]
    View {
        /// Project node id, e.g. PVT_kwDOABC123
        project_id: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::List)
    }
}
