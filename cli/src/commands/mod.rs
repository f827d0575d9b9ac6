pub mod completion;
pub mod config;
pub mod menu;
pub mod open;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_CONFIG_FILE: &str = "site.toml";

#[derive(Parser)]
#[command(
    name = "sitectl",
    author,
    version,
    about = "sitectl - manage the company blog site",
    long_about = "Run the site's npm tasks, open content for editing, and manage the typed site \
                  configuration.\n\nWith no command, an interactive menu is shown."
)]
pub struct Cli {
    #[arg(long, global = true, default_value = ".", help = "Site project directory")]
    pub project: PathBuf,

    #[arg(
        long,
        global = true,
        env = "SITECTL_CONFIG",
        help = "Site config file (defaults to <project>/site.toml when present)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Interactive project menu (default)")]
    Menu,

    #[command(about = "Run a project task (npm script)")]
    Run(run::RunArgs),

    #[command(about = "Open site content for editing")]
    Open(open::OpenArgs),

    #[command(subcommand, about = "Show, validate, initialize, and render the site configuration")]
    Config(config::ConfigCommand),

    #[command(about = "Generate shell completions")]
    Completion(completion::CompletionArgs)
}

/// Where the site project lives and which config file applies.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    explicit_config: Option<PathBuf>
}

impl ProjectContext {
    pub fn new(root: PathBuf, explicit_config: Option<PathBuf>) -> Self {
        Self {
            root,
            explicit_config
        }
    }

    /// Path `config init` writes to.
    pub fn config_target(&self) -> PathBuf {
        self.explicit_config
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_CONFIG_FILE))
    }

    /// Config file to load, if any. An explicit path is always used; the
    /// default file only when it exists.
    pub fn config_source(&self) -> Option<PathBuf> {
        match &self.explicit_config {
            Some(path) => Some(path.clone()),
            None => {
                let default = self.root.join(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            }
        }
    }
}
