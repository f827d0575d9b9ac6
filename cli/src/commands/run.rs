use anyhow::Result;
use clap::Args;
use errors::TaskError;

use super::ProjectContext;
use crate::tasks::{self, Platform, Task};
use crate::{output, ux_error};

#[derive(Args)]
pub struct RunArgs {
    /// Task to run
    #[arg(value_enum)]
    pub task: Task
}

pub async fn run(args: RunArgs, ctx: &ProjectContext) -> Result<()> {
    execute(args.task, ctx)
        .await
        .map_err(|e| ux_error::task_error(&e).into())
}

pub async fn execute(task: Task, ctx: &ProjectContext) -> Result<(), TaskError> {
    tasks::ensure_project(&ctx.root)?;

    let spec = task.command(Platform::current());
    output::running(&spec);
    tasks::run(&spec, &ctx.root).await?;
    output::success(task.description());
    Ok(())
}
