//! new command - Create a script from the template

use anyhow::Result;

use crate::cli::Context;
use crate::scaffold;
use crate::ui::output;

/// Create `src/scripts/<name>.js`.
pub fn new_script(ctx: &Context, name: &str) -> Result<()> {
    let root = ctx.cwd()?;
    let path = scaffold::new_script(&root, name)?;
    let name = name.trim().trim_end_matches(".js");
    let verbosity = ctx.verbosity();

    let shown = path.strip_prefix(&root).unwrap_or(&path);
    output::success(format!("Created new script: {}", shown.display()), verbosity);
    output::print("\nTo use this script:", verbosity);
    output::print(
        output::format_list(
            &[
                format!("Global: add '{}' to ScriptConfig.global in the Webflow embed code", name),
                format!(
                    "Page-specific: add <script>window.pageScript = '{}';</script> to page settings",
                    name
                ),
            ],
            "- ",
        ),
        verbosity,
    );
    Ok(())
}
