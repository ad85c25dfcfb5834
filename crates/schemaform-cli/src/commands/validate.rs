use super::{catalog, print_json, render_result, resolve};
use crate::FormArgs;
use anyhow::{Context, Result};
use colored::Colorize;
use schemaform::{Config, Record};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn execute(
    config: &Config,
    args: &FormArgs,
    input: Option<&Path>,
    locale: Option<&str>,
) -> Result<()> {
    let resolved = resolve(args)?;
    let catalog = catalog(config, locale)?;

    let content = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read record: {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read record from stdin")?;
            buf
        }
    };

    let record: Record = if content.trim().is_empty() {
        resolved.showcase.defaults()
    } else {
        serde_json::from_str(&content).context("Record must be a JSON object of primitive values")?
    };

    let result = resolved.schema.validate(&record);
    tracing::info!(form = %resolved.showcase, valid = result.is_valid(), "validated record");

    if result.is_valid() {
        eprintln!("{}", "✓ Valid".green().bold());
    } else {
        eprintln!("{}", "✗ Invalid".red().bold());
    }
    print_json(config, &render_result(&result, &catalog))
}
