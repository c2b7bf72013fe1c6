//! init command - Scaffold a Webflow scripts project

use anyhow::{bail, Context as _, Result};
use chrono::Utc;
use std::io::{BufRead, Write};
use std::path::Path;

use super::load_config;
use crate::cli::args::AnswerArgs;
use crate::cli::Context;
use crate::core::paths::{ProjectPaths, EMBED_CODE_FILE};
use crate::scaffold::{self, ProjectAnswers, ScaffoldError};
use crate::ui::output;
use crate::ui::prompts::Prompter;

/// Initialize a project.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `name` - Directory to create under the working directory; `None` initializes the working directory itself
/// * `args` - Answers given as flags
pub fn init(ctx: &Context, name: Option<&str>, args: &AnswerArgs) -> Result<()> {
    let cwd = ctx.cwd()?;
    let target = match name {
        Some(name) => cwd.join(name),
        None => cwd,
    };
    let verbosity = ctx.verbosity();

    if name.is_some() {
        scaffold::ensure_empty_target(&target)?;
    } else if ProjectPaths::new(&target).is_initialized() {
        bail!(
            "Project already initialized in '{}'. Edit .webflow-scripts.json or run `webflow-scripts embed`.",
            target.display()
        );
    }

    let config = load_config(ctx, None)?;
    let interactive = ctx.interactive && config.interactive();

    output::print("\nWelcome to Webflow Scripts!\n", verbosity);
    output::print(
        "This tool will set up a development environment for your Webflow scripts.\n",
        verbosity,
    );

    let default_repo = directory_name(&target);
    let mut prompter = Prompter::stdio(interactive);
    let answers = collect_answers(args, default_repo.as_deref(), &mut prompter)?;

    if name.is_some() {
        std::fs::create_dir_all(&target)
            .with_context(|| format!("Failed to create directory '{}'", target.display()))?;
    }

    let created = scaffold::create_project(&target, answers, Utc::now(), &config)?;

    output::print("\nCreating your project...\n", verbosity);
    if let Some(name) = name {
        output::success(format!("Created directory: {}", name), verbosity);
    }
    for file in &created.files {
        let shown = file.strip_prefix(&target).unwrap_or(file);
        output::success(format!("Created {}", shown.display()), verbosity);
    }

    output::print("\nProject created successfully!\n", verbosity);
    if let Some(name) = name {
        output::print(format!("  cd {}", name), verbosity);
    }
    output::print("\nNext Steps:\n", verbosity);
    output::print(
        output::format_numbered(&[
            format!("Copy the embed code from {}", EMBED_CODE_FILE),
            "Paste it in Webflow Site Settings → Custom Code → Head".to_string(),
            "Publish your Webflow site".to_string(),
            "Start your dev server and open the staging site".to_string(),
        ]),
        verbosity,
    );
    output::print(
        "\nCheck README.md for detailed instructions specific to your project!",
        verbosity,
    );

    Ok(())
}

/// Merge flag answers with prompted ones.
///
/// Answers given as flags are never prompted for. Without prompts, the
/// GitHub username and Webflow domain are required flags.
pub fn collect_answers<R: BufRead, W: Write>(
    args: &AnswerArgs,
    default_repo: Option<&str>,
    prompter: &mut Prompter<R, W>,
) -> Result<ProjectAnswers> {
    let interactive = prompter.is_interactive();

    let github_username = match &args.github_user {
        Some(user) => user.clone(),
        None if interactive => prompter.input_with(
            "What is your GitHub username?",
            None,
            reason_of(scaffold::validate_github_username),
        )?,
        None => bail!("--github-user is required when prompts are disabled"),
    };

    let repo_name = match (&args.repo, default_repo) {
        (Some(repo), _) => repo.clone(),
        (None, default) if interactive => prompter.input_with(
            "What will be your GitHub repository name?",
            default,
            reason_of(scaffold::validate_repo_name),
        )?,
        (None, Some(default)) => default.to_string(),
        (None, None) => bail!("--repo is required when prompts are disabled"),
    };

    let webflow_domain = match &args.webflow_domain {
        Some(domain) => domain.clone(),
        None if interactive => prompter.input_with(
            "What is your Webflow staging domain? (e.g., your-site.webflow.io)",
            None,
            reason_of(scaffold::validate_webflow_domain),
        )?,
        None => bail!("--webflow-domain is required when prompts are disabled"),
    };

    let custom_domain = match &args.custom_domain {
        Some(domain) => domain.clone(),
        None if interactive => prompter.input(
            "What is your production domain? (optional, press Enter to skip)",
            Some(""),
        )?,
        None => String::new(),
    };

    let use_github_pages = if args.no_github_pages {
        false
    } else if interactive {
        prompter.confirm("Do you want to use GitHub Pages for hosting?", true)?
    } else {
        true
    };

    let answers = ProjectAnswers {
        github_username,
        repo_name,
        webflow_domain,
        custom_domain,
        use_github_pages,
    };
    answers.validate()?;
    Ok(answers)
}

/// Adapt a scaffold validator to a prompt validator that reports only the reason.
fn reason_of(
    validate: fn(&str) -> Result<(), ScaffoldError>,
) -> impl Fn(&str) -> Result<(), String> {
    move |value: &str| {
        validate(value).map_err(|e| match e {
            ScaffoldError::InvalidAnswer { reason, .. } => reason,
            other => other.to_string(),
        })
    }
}

fn directory_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
