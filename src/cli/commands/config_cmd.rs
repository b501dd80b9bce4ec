//! config command - Inspect effective configuration values

use super::load_config;
use crate::core::config::Config;
use crate::engine::Context;
use anyhow::{Context as _, Result};

/// Print the effective value of one key.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = load_config(ctx)?;
    let value = config
        .get(key)
        .with_context(|| format!("Valid keys: {}", crate::core::config::KEYS.join(", ")))?;
    println!("{}", value);
    Ok(())
}

/// Print every key with its effective value.
pub fn list(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }
    Ok(())
}

/// Print the config file in use, or where one would be created.
pub fn path(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    match config.loaded_from() {
        Some(path) => println!("{}", path.display()),
        None => {
            let canonical = Config::canonical_path().context("Failed to locate config")?;
            println!("{} (not present)", canonical.display());
        }
    }
    Ok(())
}
