//! config command - Get, set, or list global configuration values

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::cli::Context;
use crate::core::config::{Config, GlobalConfig};
use crate::ui::output;

const KEYS: [&str; 4] = ["dev_server_url", "staging_marker", "load_timeout_ms", "interactive"];

/// Get a configuration value.
///
/// Prints the effective value, falling back to the default.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx, None)?;
    println!("{}", effective_value(&config, key)?);
    Ok(())
}

/// Set a configuration value in the global config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let config = load_config(ctx, None)?;
    let path = match config.global_config_loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::global_config_path()?,
    };

    let mut global = config.global.clone();
    apply(&mut global, key, value)?;
    Config::write_global(&path, &global)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity());
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx, None)?;

    match config.global_config_loaded_from() {
        Some(path) => println!("# Global Configuration ({})", path.display()),
        None => println!("# Global Configuration (defaults)"),
    }
    for key in KEYS {
        println!("{} = {}", key, effective_value(&config, key)?);
    }
    Ok(())
}

fn effective_value(config: &Config, key: &str) -> Result<String> {
    Ok(match key {
        "dev_server_url" => config.dev_server_url().to_string(),
        "staging_marker" => config.staging_marker().to_string(),
        "load_timeout_ms" => config
            .global
            .load_timeout_ms
            .map_or_else(|| "(none)".to_string(), |ms| ms.to_string()),
        "interactive" => config.interactive().to_string(),
        _ => bail!("Unknown configuration key: {} (known: {})", key, KEYS.join(", ")),
    })
}

fn apply(global: &mut GlobalConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "dev_server_url" => global.dev_server_url = Some(value.trim_end_matches('/').to_string()),
        "staging_marker" => global.staging_marker = Some(value.to_string()),
        "load_timeout_ms" => {
            let ms = value
                .parse::<u64>()
                .with_context(|| format!("Invalid timeout '{}': expected milliseconds", value))?;
            global.load_timeout_ms = Some(ms);
        }
        "interactive" => {
            let flag = value
                .parse::<bool>()
                .with_context(|| format!("Invalid value '{}': expected true or false", value))?;
            global.interactive = Some(flag);
        }
        _ => bail!("Unknown configuration key: {} (known: {})", key, KEYS.join(", ")),
    }
    global.validate()?;
    Ok(())
}
