use anyhow::Result;
use clap::Args;
use errors::TaskError;

use super::ProjectContext;
use crate::tasks::{self, OpenTarget, Platform};
use crate::{output, ux_error};

#[derive(Args)]
pub struct OpenArgs {
    /// What to open
    #[arg(value_enum)]
    pub target: OpenTarget
}

pub async fn run(args: OpenArgs, ctx: &ProjectContext) -> Result<()> {
    execute(args.target, ctx)
        .await
        .map_err(|e| ux_error::task_error(&e).into())
}

pub async fn execute(target: OpenTarget, ctx: &ProjectContext) -> Result<(), TaskError> {
    tasks::ensure_target(&ctx.root, target)?;

    let candidates = target.commands(&ctx.root, Platform::current());
    if let Some(first) = candidates.first() {
        output::running(first);
    }
    tasks::run_first_available(&candidates, &ctx.root).await
}
