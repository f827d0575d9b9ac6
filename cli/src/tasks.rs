//! Project tasks - npm scripts and file openers
//!
//! Maps the actions offered by the menu and the `run`/`open` commands to the
//! external commands that perform them.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use errors::TaskError;
use tracing::debug;

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const DEV_SERVER_URL: &str = "http://localhost:4321";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Task {
    Dev,
    Build,
    Preview,
    Format,
    FormatCheck,
    Lint,
    Sync,
    Install
}

impl Task {
    pub fn description(self) -> &'static str {
        match self {
            Task::Dev => "Start dev server (http://localhost:4321)",
            Task::Build => "Build for production",
            Task::Preview => "Preview production build",
            Task::Format => "Format code (Prettier)",
            Task::FormatCheck => "Check code formatting",
            Task::Lint => "Lint code (ESLint)",
            Task::Sync => "Sync TypeScript types",
            Task::Install => "Install/update dependencies"
        }
    }

    fn npm_args(self) -> &'static [&'static str] {
        match self {
            Task::Dev => &["run", "dev"],
            Task::Build => &["run", "build"],
            Task::Preview => &["run", "preview"],
            Task::Format => &["run", "format"],
            Task::FormatCheck => &["run", "format:check"],
            Task::Lint => &["run", "lint"],
            Task::Sync => &["run", "sync"],
            Task::Install => &["install"]
        }
    }

    pub fn command(self, platform: Platform) -> CommandSpec {
        let program = match platform {
            Platform::Windows => "npm.cmd",
            Platform::Unix => "npm"
        };
        CommandSpec::new(program, self.npm_args().iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpenTarget {
    /// Blog post directory
    Blog,
    /// Site config module read by the site generator
    Config,
    /// About page
    About
}

impl OpenTarget {
    pub fn description(self) -> &'static str {
        match self {
            OpenTarget::Blog => "Open blog posts directory",
            OpenTarget::Config => "Open site config file",
            OpenTarget::About => "Open about page"
        }
    }

    pub fn relative_path(self) -> PathBuf {
        match self {
            OpenTarget::Blog => ["src", "data", "blog"].iter().collect(),
            OpenTarget::Config => ["src", "config.ts"].iter().collect(),
            OpenTarget::About => ["src", "pages", "about.md"].iter().collect()
        }
    }

    fn is_dir(self) -> bool {
        matches!(self, OpenTarget::Blog)
    }

    /// Candidate commands, tried in order until one succeeds.
    pub fn commands(self, root: &Path, platform: Platform) -> Vec<CommandSpec> {
        let path = root.join(self.relative_path()).display().to_string();

        match (platform, self.is_dir()) {
            (Platform::Windows, true) => vec![CommandSpec::new("explorer", [path])],
            (Platform::Windows, false) => vec![CommandSpec::new("notepad", [path])],
            (Platform::Unix, true) => vec![
                CommandSpec::new("open", [path.clone()]),
                CommandSpec::new("xdg-open", [path]),
            ],
            (Platform::Unix, false) => vec![
                CommandSpec::new("open", ["-e".to_string(), path.clone()]),
                CommandSpec::new("xdg-open", [path]),
            ]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect()
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Fails unless `root` looks like the site project.
pub fn ensure_project(root: &Path) -> Result<(), TaskError> {
    if root.join(PACKAGE_MANIFEST).is_file() {
        Ok(())
    } else {
        Err(TaskError::ProjectNotFound {
            path: root.display().to_string(),
            marker: PACKAGE_MANIFEST.to_string()
        })
    }
}

/// Fails unless the open target exists under `root`.
pub fn ensure_target(root: &Path, target: OpenTarget) -> Result<(), TaskError> {
    let relative = target.relative_path();
    if root.join(&relative).exists() {
        Ok(())
    } else {
        Err(TaskError::ProjectNotFound {
            path: root.display().to_string(),
            marker: relative.display().to_string()
        })
    }
}

/// Run `spec` in `cwd`, inheriting stdio.
///
/// Ctrl-C stops the child and returns `TaskError::Interrupted` instead of
/// terminating this process.
pub async fn run(spec: &CommandSpec, cwd: &Path) -> Result<(), TaskError> {
    debug!("Spawning '{}' in {}", spec, cwd.display());

    let mut child = tokio::process::Command::new(&spec.program)
        .args(&spec.args)
        .current_dir(cwd)
        .spawn()
        .map_err(|e| TaskError::Spawn {
            command: spec.to_string(),
            reason: e.to_string()
        })?;

    let outcome = tokio::select! {
        status = child.wait() => Some(status),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(status)) if status.success() => Ok(()),
        Some(Ok(status)) => Err(TaskError::CommandFailed {
            command: spec.to_string(),
            code: status.code()
        }),
        Some(Err(e)) => Err(TaskError::Spawn {
            command: spec.to_string(),
            reason: e.to_string()
        }),
        None => {
            let _ = child.kill().await;
            Err(TaskError::Interrupted)
        }
    }
}

/// Run the first candidate that succeeds; returns the last failure otherwise.
pub async fn run_first_available(specs: &[CommandSpec], cwd: &Path) -> Result<(), TaskError> {
    let mut last_error = None;

    for spec in specs {
        match run(spec, cwd).await {
            Ok(()) => return Ok(()),
            Err(TaskError::Interrupted) => return Err(TaskError::Interrupted),
            Err(e) => {
                debug!("'{}' failed: {}", spec, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(TaskError::Spawn {
        command: String::new(),
        reason: "no command to run".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_task_commands() {
        assert_eq!(Task::Dev.command(Platform::Unix).to_string(), "npm run dev");
        assert_eq!(
            Task::FormatCheck.command(Platform::Unix).to_string(),
            "npm run format:check"
        );
        assert_eq!(Task::Install.command(Platform::Unix).to_string(), "npm install");
        assert_eq!(Task::Build.command(Platform::Windows).program, "npm.cmd");
    }

    #[test]
    fn test_dev_description_mentions_server_url() {
        assert!(Task::Dev.description().contains(DEV_SERVER_URL));
    }

    #[test]
    fn test_open_commands_unix_fall_back_to_xdg_open() {
        let root = Path::new("/srv/site");
        let commands = OpenTarget::Config.commands(root, Platform::Unix);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].program, "open");
        assert_eq!(commands[0].args[0], "-e");
        assert!(commands[0].args[1].ends_with("config.ts"));
        assert_eq!(commands[1].program, "xdg-open");

        let blog = OpenTarget::Blog.commands(root, Platform::Unix);
        assert_eq!(blog[0].args.len(), 1);
        assert!(blog[0].args[0].ends_with("blog"));
    }

    #[test]
    fn test_open_commands_windows() {
        let root = Path::new("C:/site");
        assert_eq!(
            OpenTarget::Blog.commands(root, Platform::Windows)[0].program,
            "explorer"
        );
        assert_eq!(
            OpenTarget::About.commands(root, Platform::Windows)[0].program,
            "notepad"
        );
    }

    #[test]
    fn test_ensure_project() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ensure_project(dir.path()),
            Err(TaskError::ProjectNotFound { .. })
        ));

        std::fs::write(dir.path().join(PACKAGE_MANIFEST), "{}").unwrap();
        assert!(ensure_project(dir.path()).is_ok());
    }

    #[test]
    fn test_ensure_target() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_target(dir.path(), OpenTarget::Blog).is_err());

        std::fs::create_dir_all(dir.path().join("src/data/blog")).unwrap();
        assert!(ensure_target(dir.path(), OpenTarget::Blog).is_ok());
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("sitectl-no-such-program", Vec::<String>::new());
        let result = run(&spec, dir.path()).await;
        assert!(matches!(result, Err(TaskError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("sh", ["-c", "exit 3"]);
        match run(&spec, dir.path()).await {
            Err(TaskError::CommandFailed { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("expected CommandFailed, got {other:?}")
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_first_available_falls_back() {
        let dir = TempDir::new().unwrap();
        let specs = vec![
            CommandSpec::new("sitectl-no-such-program", Vec::<String>::new()),
            CommandSpec::new("sh", ["-c", "exit 0"]),
        ];
        assert!(run_first_available(&specs, dir.path()).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_first_available_returns_last_error() {
        let dir = TempDir::new().unwrap();
        let specs = vec![
            CommandSpec::new("sh", ["-c", "exit 1"]),
            CommandSpec::new("sh", ["-c", "exit 2"]),
        ];
        match run_first_available(&specs, dir.path()).await {
            Err(TaskError::CommandFailed { code, .. }) => assert_eq!(code, Some(2)),
            other => panic!("expected CommandFailed, got {other:?}")
        }
    }
}
