//! Configuration management commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShelfConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => {
            let path = path.unwrap_or_else(|| ctx.cwd.join("shelf.toml"));
            init_config(&path, force, ctx)
        }
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.line("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());

    ctx.output.line("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", config.store.currency.code());
    ctx.output.kv("shipping", &config.shipping().to_string());

    ctx.output.line("");
    ctx.output.info("[session]");
    ctx.output
        .kv("token_path", &config.token_path().display().to_string());

    ctx.output.line("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(path: &Path, force: bool, ctx: &Context) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_default_config(path)?;
    ctx.output.success(&format!("Created: {}", path.display()));
    Ok(())
}

/// Write the default template, or its JSON equivalent for `.json` paths.
fn write_default_config(path: &Path) -> Result<PathBuf> {
    if path.extension().is_some_and(|ext| ext == "json") {
        ShelfConfig::default().save(path)?;
    } else {
        std::fs::write(path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    }
    Ok(path.to_path_buf())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let report = ctx.config.check();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": report.is_ok(),
            "errors": report.errors,
            "warnings": report.warnings,
        }));
    } else {
        ctx.output.header("Validating configuration");
        for warning in &report.warnings {
            ctx.output.warn(warning);
        }
        for error in &report.errors {
            ctx.output.error(error);
        }
    }

    if !report.is_ok() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }
    if !ctx.output.is_json() {
        ctx.output.success("Configuration is valid");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_config_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = write_default_config(&dir.path().join("shelf.toml")).unwrap();
        assert_eq!(ShelfConfig::load(&toml_path).unwrap(), ShelfConfig::default());

        let json_path = write_default_config(&dir.path().join("shelf.json")).unwrap();
        assert_eq!(ShelfConfig::load(&json_path).unwrap(), ShelfConfig::default());
    }
}
