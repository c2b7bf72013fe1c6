//! test command - Show the project configuration

use anyhow::{bail, Result};

use super::{load_config, NOT_INITIALIZED};
use crate::cli::Context;
use crate::core::paths::ProjectPaths;
use crate::ui::output::{self, format_field};

const LABEL_WIDTH: usize = 20;

/// Print the configuration summary.
pub fn test(ctx: &Context) -> Result<()> {
    let root = ctx.cwd()?;
    if !ProjectPaths::new(&root).is_initialized() {
        bail!(NOT_INITIALIZED);
    }

    let config = load_config(ctx, Some(&root))?;
    let Some(project) = config.project.as_ref() else {
        bail!(NOT_INITIALIZED);
    };
    let verbosity = ctx.verbosity();

    output::print("\nTesting configuration...\n", verbosity);

    let mut fields = vec![
        format_field("GitHub Username", &project.github_username, LABEL_WIDTH),
        format_field("Repository", &project.repo_name, LABEL_WIDTH),
        format_field("Webflow Domain", &project.webflow_domain, LABEL_WIDTH),
    ];
    if !project.custom_domain.is_empty() {
        fields.push(format_field("Production Domain", &project.custom_domain, LABEL_WIDTH));
    }
    if project.use_github_pages {
        fields.push(format_field("GitHub Pages URL", project.github_pages_url(), LABEL_WIDTH));
    }
    fields.push(format_field("Production Scripts", project.production_script_url(), LABEL_WIDTH));
    fields.push(format_field("Dev Server", config.dev_server_url(), LABEL_WIDTH));
    fields.push(format_field(
        "Set Up",
        project.setup_date.format("%Y-%m-%d %H:%M UTC"),
        LABEL_WIDTH,
    ));
    if let Some(path) = config.global_config_loaded_from() {
        fields.push(format_field("Global Config", path.display(), LABEL_WIDTH));
    }

    output::print(fields.join("\n"), verbosity);

    output::success("Configuration looks good!", verbosity);
    output::print("\nMake sure to:", verbosity);
    output::print(
        output::format_numbered(&[
            "Start the development server",
            "Add the embed code to your Webflow site settings",
            "Publish your Webflow site",
        ]),
        verbosity,
    );
    Ok(())
}
