//! `cfzone auth` subcommands.

use std::io::Write;

use cfzone_api::{Client, Credentials};

use crate::cli::AuthCommand;
use crate::config::Config;
use crate::context::Context;
use crate::error::{CliError, Result};

pub async fn run<W: Write>(command: AuthCommand, ctx: &mut Context<W>) -> Result<()> {
    match command {
        AuthCommand::Verify => verify(ctx).await,
        AuthCommand::Save { token } => save(ctx, token).await,
    }
}

async fn verify<W: Write>(ctx: &mut Context<W>) -> Result<()> {
    let credentials = ctx.config.credentials().ok_or(CliError::Credentials)?;
    let method = credentials.method_name();

    let client = Client::new(credentials)?;
    client.verify_token().await?;

    ctx.writer
        .write_success(&format!("Authentication successful (using {method})"))
}

/// Verify the token against the live API before it is written anywhere.
/// The write starts from the stored file rather than the env-overridden
/// view, so environment credentials never end up on disk, and settings
/// already in the file survive.
async fn save<W: Write>(ctx: &mut Context<W>, token: String) -> Result<()> {
    let client = Client::new(Credentials::Token(token.clone()))?;
    client.verify_token().await?;

    let path = ctx.config_file()?;
    let mut config = Config::from_file(Some(&path));
    config.api_token = Some(token);
    config.save(&path)?;

    ctx.writer
        .write_success(&format!("Token saved to {}", path.display()))
}
