//! `cfzone config` subcommands. These operate on the stored file, never on
//! the env-overridden view, so `config set` cannot leak environment
//! credentials into the file.

use std::io::Write;

use clap::ValueEnum;

use crate::cli::{ConfigCommand, ConfigKey};
use crate::config::Config;
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

pub fn run<W: Write>(command: ConfigCommand, ctx: &mut Context<W>) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => set(ctx, key, &value),
        ConfigCommand::Get { key } => get(ctx, key),
        ConfigCommand::List => list(ctx),
    }
}

fn set<W: Write>(ctx: &mut Context<W>, key: ConfigKey, value: &str) -> Result<()> {
    let path = ctx.config_file()?;
    let mut config = Config::from_file(Some(&path));

    match key {
        ConfigKey::OutputFormat => {
            let format = OutputFormat::from_str(value, true).map_err(|_| {
                CliError::Validation(format!(
                    "invalid output_format: {value} (must be 'table' or 'json')"
                ))
            })?;
            config.output_format = Some(format);
        }
    }

    config.save(&path)?;
    ctx.writer
        .write_success(&format!("Set {} = {value}", key.as_str()))
}

fn get<W: Write>(ctx: &mut Context<W>, key: ConfigKey) -> Result<()> {
    match key {
        ConfigKey::OutputFormat => {
            let format = ctx.config.output_format.unwrap_or_default();
            writeln!(ctx.writer.get_mut(), "{format}")?;
        }
    }
    Ok(())
}

fn list<W: Write>(ctx: &mut Context<W>) -> Result<()> {
    let value = ctx
        .config
        .output_format
        .map_or_else(|| "table (default)".to_string(), |format| format.to_string());

    ctx.writer
        .write_table(&["Key", "Value"], &[vec!["output_format".to_string(), value]])
}
