//! embed command - Generate the Webflow embed code

use anyhow::{bail, Result};

use super::{load_config, NOT_INITIALIZED};
use crate::cli::Context;
use crate::core::paths::{ProjectPaths, EMBED_CODE_FILE};
use crate::scaffold;
use crate::ui::output;

/// Print the embed code and save it to `webflow-embed-code.html`.
///
/// The code itself always goes to stdout, even with `--quiet`, so it can be
/// piped.
pub fn embed(ctx: &Context) -> Result<()> {
    let root = ctx.cwd()?;
    if !ProjectPaths::new(&root).is_initialized() {
        bail!(NOT_INITIALIZED);
    }

    let config = load_config(ctx, Some(&root))?;
    let verbosity = ctx.verbosity();

    let (code, _path) = scaffold::write_embed_code(&root, &config)?;

    output::print(
        "Copy this code to your Webflow Site Settings → Custom Code → Head:\n",
        verbosity,
    );
    print!("{}", code);
    output::success(format!("Embed code saved to {}", EMBED_CODE_FILE), verbosity);
    Ok(())
}
