//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the working directory and loads configuration
//! 2. Calls into the library to do the work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `plan` drives the async router. It builds a tokio runtime and blocks on
//! it, so the rest of the CLI stays synchronous.

mod completion;
mod config_cmd;
mod embed;
mod init;
mod new;
mod plan;
mod test_cmd;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use embed::embed;
pub use init::{collect_answers, init};
pub use new::new_script;
pub use plan::{build_page_config, plan, run_router, PlanReport, PlannedRequest};
pub use test_cmd::test;

use anyhow::{bail, Context as _, Result};
use std::path::Path;

use super::args::{Cli, Command, ConfigAction};
use super::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Dispatch a parsed command line to its handler.
pub fn dispatch(cli: Cli, ctx: &Context) -> Result<()> {
    match (cli.command, cli.project_name) {
        (Some(_), Some(name)) => {
            bail!("Unexpected argument '{}' before the command", name)
        }
        // Create mode: `webflow-scripts my-site`
        (None, Some(name)) => init::init(ctx, Some(&name), &cli.answers),
        (None, None) => {
            bail!("No command given. Run `webflow-scripts init` or `webflow-scripts <PROJECT_NAME>`; see --help")
        }
        (Some(command), None) => match command {
            Command::Init { name, answers } => init::init(ctx, name.as_deref(), &answers),
            Command::New { name } => new::new_script(ctx, &name),
            Command::Embed => embed::embed(ctx),
            Command::Test => test_cmd::test(ctx),
            Command::Plan(args) => plan::plan(ctx, &args),
            Command::Config { action } => match action {
                ConfigAction::Get { key } => config_cmd::get(ctx, &key),
                ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
                ConfigAction::List => config_cmd::list(ctx),
            },
            Command::Completion { shell } => completion::completion(shell),
        },
    }
}

/// Load configuration and surface load warnings.
fn load_config(ctx: &Context, project_root: Option<&Path>) -> Result<Config> {
    let loaded = Config::load(project_root).context("Failed to load configuration")?;
    if let Some(path) = loaded.config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), ctx.verbosity());
    }
    if let Some(path) = loaded.config.project_config_loaded_from() {
        output::debug(format!("project config: {}", path.display()), ctx.verbosity());
    }
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(loaded.config)
}

/// Message shown when a command needs an initialized project.
const NOT_INITIALIZED: &str = "Project not initialized! Run `webflow-scripts init` first.";
