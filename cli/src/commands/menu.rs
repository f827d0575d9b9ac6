//! Menu command - interactive project menu
//!
//! Lists the project tasks and content shortcuts, runs the chosen one, and
//! returns to the menu. Failures are reported without leaving the menu.

use std::io;

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{Select, theme::ColorfulTheme};
use errors::TaskError;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::warn;

use super::{ProjectContext, open, run};
use crate::{output, ux_error};
use crate::tasks::{OpenTarget, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Task(Task),
    Open(OpenTarget),
    Exit
}

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub section: &'static str,
    pub action: MenuAction
}

impl MenuEntry {
    pub fn label(&self) -> String {
        let description = match self.action {
            MenuAction::Task(task) => task.description(),
            MenuAction::Open(target) => target.description(),
            MenuAction::Exit => "Exit"
        };
        format!("{:<13} {}", format!("[{}]", self.section), description)
    }
}

/// Menu entries in display order.
pub fn entries() -> Vec<MenuEntry> {
    let entry = |section, action| MenuEntry { section, action };
    vec![
        entry("Develop", MenuAction::Task(Task::Dev)),
        entry("Develop", MenuAction::Task(Task::Build)),
        entry("Develop", MenuAction::Task(Task::Preview)),
        entry("Quality", MenuAction::Task(Task::Format)),
        entry("Quality", MenuAction::Task(Task::FormatCheck)),
        entry("Quality", MenuAction::Task(Task::Lint)),
        entry("Content", MenuAction::Open(OpenTarget::Blog)),
        entry("Content", MenuAction::Open(OpenTarget::Config)),
        entry("Content", MenuAction::Open(OpenTarget::About)),
        entry("Other", MenuAction::Task(Task::Sync)),
        entry("Other", MenuAction::Task(Task::Install)),
        entry("", MenuAction::Exit),
    ]
}

pub async fn run(ctx: &ProjectContext) -> Result<()> {
    install_site(ctx)?;
    let title = &site_config::site().title;

    let term = Term::stderr();
    let theme = ColorfulTheme::default();
    let entries = entries();
    let labels: Vec<String> = entries.iter().map(MenuEntry::label).collect();
    let mut last = 0;

    loop {
        let _ = term.clear_screen();
        output::header(&format!("{title} - site management"));
        println!("{}", ctx.root.display().to_string().dimmed());
        println!();

        let selection = match Select::with_theme(&theme)
            .with_prompt("Choose an action")
            .items(&labels)
            .default(last)
            .interact_on_opt(&term)
        {
            Ok(selection) => selection,
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => None,
            Err(e) => return Err(e.into())
        };

        let Some(index) = selection else {
            println!("\n{}", "Exited".dimmed());
            return Ok(());
        };
        last = index;

        let outcome = match entries[index].action {
            MenuAction::Exit => {
                println!("\n{}", "Exited".dimmed());
                return Ok(());
            }
            MenuAction::Task(task) => run::execute(task, ctx).await,
            MenuAction::Open(target) => open::execute(target, ctx).await
        };

        match outcome {
            Ok(()) => {}
            Err(TaskError::Interrupted) => output::warn("Command interrupted"),
            Err(e) => ux_error::task_error(&e).display()
        }

        if pause(&term).await? == PauseOutcome::Exit {
            println!("\n{}", "Exited".dimmed());
            return Ok(());
        }
    }
}

/// Install the project's site configuration, or tell the user why the
/// built-in one is used instead. Returns whether the project's was installed.
fn install_site(ctx: &ProjectContext) -> Result<bool> {
    match super::config::load(ctx) {
        Ok(site) => {
            site_config::install(site)?;
            Ok(true)
        }
        Err(err) => {
            warn!("Using the built-in site configuration: {}", err);
            output::warn(&format!("Site configuration ignored: {err}"));
            output::info("Run 'sitectl config validate' for details");
            Ok(false)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseOutcome {
    Resume,
    Exit
}

/// Wait for Enter. Ctrl-C ends the menu.
///
/// Once a task has run, SIGINT is routed to tokio instead of interrupting
/// the read, so the signal is awaited alongside it. The reader runs on a
/// detached thread that must not hold up process exit.
async fn pause(term: &Term) -> Result<PauseOutcome> {
    eprint!("\n{}", "Press Enter to return to the menu...".dimmed());

    let (tx, rx) = oneshot::channel();
    let reader = term.clone();
    std::thread::spawn(move || {
        let _ = tx.send(reader.read_line());
    });

    tokio::select! {
        line = rx => match line {
            Ok(read) => pause_outcome(read),
            Err(_) => Ok(PauseOutcome::Exit)
        },
        _ = signal::ctrl_c() => Ok(PauseOutcome::Exit)
    }
}

fn pause_outcome(read: io::Result<String>) -> Result<PauseOutcome> {
    match read {
        Ok(_) => Ok(PauseOutcome::Resume),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(PauseOutcome::Exit),
        Err(e) => Err(e.into())
    }
}
