use colored::Colorize;
use errors::{ConfigError, TaskError};

use crate::tasks::PACKAGE_MANIFEST;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn project_not_found(path: &str, marker: &str) -> UxError {
    UxError::new(format!("No {} found in '{}'", marker, path))
        .why("sitectl must run against the site project directory")
        .fix("Change into the site project directory")
        .fix("Or point sitectl at it with --project <DIR>")
        .suggest("sitectl --project path/to/site menu")
}

pub fn program_not_found(command: &str, reason: &str) -> UxError {
    let program = command.split_whitespace().next().unwrap_or(command);
    let error = UxError::new(format!("Could not launch '{}'", command)).why(reason.to_string());

    if program.starts_with("npm") {
        error
            .fix("Install Node.js, which ships with npm")
            .fix("Make sure npm is on your PATH")
            .suggest("npm --version")
    } else {
        error.fix(format!("Make sure '{}' is installed and on your PATH", program))
    }
}

pub fn command_failed(command: &str, code: Option<i32>) -> UxError {
    let why = match code {
        Some(code) => format!("The command exited with code {}", code),
        None => "The command was terminated by a signal".to_string()
    };
    UxError::new(format!("Command failed: {}", command))
        .why(why)
        .fix("Read the command output above for details")
        .fix(format!("Reinstall dependencies if {} changed", PACKAGE_MANIFEST))
        .suggest("sitectl run install")
}

pub fn interrupted() -> UxError {
    UxError::new("Command interrupted").why("Ctrl-C was pressed while the command was running")
}

pub fn config_invalid(message: &str) -> UxError {
    UxError::new("Site configuration is invalid")
        .why(message.to_string())
        .fix("Fix the listed fields in site.toml or the SITE_* environment variables")
        .fix("Or start over from the defaults")
        .suggest("sitectl config init --force")
}

pub fn config_error(err: &ConfigError) -> UxError {
    match err {
        ConfigError::Validation { message } => config_invalid(message),
        ConfigError::InvalidEnv { key, value } => {
            UxError::new(format!("Invalid value for {}: '{}'", key, value))
                .why("SITE_* environment variables override site.toml")
                .fix(format!("Correct or unset {}", key))
        }
        other => UxError::new(format!("Configuration error: {}", other))
            .why("The configuration file may be unreadable or malformed")
            .fix("Check site.toml in the project directory")
            .fix("Re-initialize with defaults")
            .suggest("sitectl config init --force")
    }
}

pub fn task_error(err: &TaskError) -> UxError {
    match err {
        TaskError::ProjectNotFound { path, marker } => project_not_found(path, marker),
        TaskError::Spawn { command, reason } => program_not_found(command, reason),
        TaskError::CommandFailed { command, code } => command_failed(command, *code),
        TaskError::Interrupted => interrupted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let err = UxError::new("Something broke")
            .why("Because")
            .fix("Do this")
            .fix("Or that")
            .suggest("sitectl menu");
        assert_eq!(err.to_string(), "Something broke");
        assert_eq!(err.why.as_deref(), Some("Because"));
        assert_eq!(err.how_to_fix.len(), 2);
        assert_eq!(err.suggested_command.as_deref(), Some("sitectl menu"));
    }

    #[test]
    fn test_task_error_project_not_found() {
        let err = task_error(&TaskError::ProjectNotFound {
            path: "/tmp/site".to_string(),
            marker: "package.json".to_string()
        });
        assert_eq!(err.what, "No package.json found in '/tmp/site'");
        assert!(err.suggested_command.is_some());
    }

    #[test]
    fn test_task_error_npm_missing() {
        let err = task_error(&TaskError::Spawn {
            command: "npm run dev".to_string(),
            reason: "No such file or directory".to_string()
        });
        assert!(err.how_to_fix.iter().any(|fix| fix.contains("Node.js")));
        assert_eq!(err.suggested_command.as_deref(), Some("npm --version"));
    }

    #[test]
    fn test_task_error_other_program_missing() {
        let err = task_error(&TaskError::Spawn {
            command: "xdg-open src/data/blog".to_string(),
            reason: "No such file or directory".to_string()
        });
        assert!(err.how_to_fix[0].contains("xdg-open"));
        assert!(err.suggested_command.is_none());
    }

    #[test]
    fn test_command_failed_with_signal() {
        let err = command_failed("npm run build", None);
        assert_eq!(err.why.as_deref(), Some("The command was terminated by a signal"));
    }

    #[test]
    fn test_config_error_validation() {
        let err = config_error(&ConfigError::Validation {
            message: "post_per_page: range".to_string()
        });
        assert_eq!(err.what, "Site configuration is invalid");
        assert_eq!(err.why.as_deref(), Some("post_per_page: range"));
    }

    #[test]
    fn test_display_does_not_panic() {
        interrupted().display();
    }
}
