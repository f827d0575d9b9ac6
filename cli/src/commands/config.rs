//! Config command - the typed site configuration
//!
//! - `show`: print the resolved configuration
//! - `validate`: report every validation problem
//! - `init`: write the defaults to site.toml
//! - `render`: write the src/config.ts module the site generator imports

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use site_config::{ConfigFormat, SiteConfig};

use super::ProjectContext;
use crate::tasks::OpenTarget;
use crate::{output, ux_error};

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Show the resolved site configuration")]
    Show(ShowArgs),

    #[command(about = "Validate the site configuration")]
    Validate,

    #[command(about = "Write the default site configuration to site.toml")]
    Init(InitArgs),

    #[command(about = "Render src/config.ts from the site configuration")]
    Render(RenderArgs)
}

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "toml")]
    pub format: FormatChoice
}

#[derive(Args)]
pub struct InitArgs {
    #[arg(long, help = "Force overwrite existing config file")]
    pub force: bool
}

#[derive(Args)]
pub struct RenderArgs {
    #[arg(short, long, help = "Output path (defaults to <project>/src/config.ts)")]
    pub output: Option<PathBuf>
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatChoice {
    Toml,
    Yaml,
    Json
}

impl From<FormatChoice> for ConfigFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Toml => ConfigFormat::Toml,
            FormatChoice::Yaml => ConfigFormat::Yaml,
            FormatChoice::Json => ConfigFormat::Json
        }
    }
}

pub fn run(cmd: ConfigCommand, ctx: &ProjectContext) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => show(args, ctx),
        ConfigCommand::Validate => validate(ctx),
        ConfigCommand::Init(args) => init(args, ctx),
        ConfigCommand::Render(args) => render(args, ctx)
    }
}

/// Resolve the site configuration, turning failures into user-facing errors.
pub fn load(ctx: &ProjectContext) -> Result<SiteConfig> {
    site_config::resolve(ctx.config_source().as_deref())
        .map_err(|e| ux_error::config_error(&e).into())
}

fn show(args: ShowArgs, ctx: &ProjectContext) -> Result<()> {
    let site = load(ctx)?;
    let rendered = site_config::to_string(&site, args.format.into())?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn validate(ctx: &ProjectContext) -> Result<()> {
    let source = ctx.config_source();
    let site = site_config::layer(source.as_deref()).map_err(|e| ux_error::config_error(&e))?;

    match site_config::validate(&site) {
        Ok(()) => {
            let origin = source
                .as_ref()
                .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
            output::success(&format!("Site configuration is valid ({origin})"));
            Ok(())
        }
        Err(errors) => {
            output::subheader("Problems");
            for line in errors.to_string().lines() {
                println!("  {} {}", "✗".red().bold(), line);
            }
            println!();
            Err(ux_error::config_invalid("One or more fields failed validation").into())
        }
    }
}

fn init(args: InitArgs, ctx: &ProjectContext) -> Result<()> {
    let target = ctx.config_target();

    if target.exists() && !args.force {
        output::warn(&format!("Config already exists at {}", target.display()));
        output::info("Use --force to overwrite");
        return Ok(());
    }

    let format = target
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None
        })
        .unwrap_or(ConfigFormat::Toml);

    let contents = site_config::to_string(&SiteConfig::default(), format)?;

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(&target, contents)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    output::success(&format!("Initialized site config at {}", target.display()));
    output::hint("Edit it, then run 'sitectl config render' to update src/config.ts");
    Ok(())
}

fn render(args: RenderArgs, ctx: &ProjectContext) -> Result<()> {
    let site = load(ctx)?;
    let target = args
        .output
        .unwrap_or_else(|| ctx.root.join(OpenTarget::Config.relative_path()));

    site_config::write_typescript(&site, &target)?;
    output::success(&format!("Rendered {}", target.display()));
    Ok(())
}
