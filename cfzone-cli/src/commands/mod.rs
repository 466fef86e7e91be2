//! Command handlers. Each receives its parsed arguments plus the shared
//! [`Context`] and writes through the context's writer, never to stdout
//! directly.

use std::io::Write;

use crate::cli::{Cli, Command};
use crate::context::Context;
use crate::error::Result;

mod auth;
mod config;
mod dns;
mod zones;

pub async fn dispatch<W: Write>(command: Command, ctx: &mut Context<W>) -> Result<()> {
    match command {
        Command::Auth(command) => auth::run(command, ctx).await,
        Command::Config(command) => config::run(command, ctx),
        Command::Zones(command) => zones::run(command, ctx).await,
        Command::Dns(command) => dns::run(command, ctx).await,
        Command::Version => version(ctx),
        Command::Update => crate::update::run(ctx).await,
        Command::Completions { shell } => completions(shell, ctx),
    }
}

// Identical in both output formats.
fn version<W: Write>(ctx: &mut Context<W>) -> Result<()> {
    writeln!(
        ctx.writer.get_mut(),
        "cfzone version {}",
        env!("CARGO_PKG_VERSION")
    )?;
    Ok(())
}

fn completions<W: Write>(shell: clap_complete::Shell, ctx: &mut Context<W>) -> Result<()> {
    use clap::CommandFactory;

    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "cfzone", ctx.writer.get_mut());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::{OutputFormat, Writer};

    fn test_context() -> Context<Vec<u8>> {
        Context {
            config: Config::default(),
            config_path: None,
            api_base: None,
            writer: Writer::new(OutputFormat::Table, Vec::new()),
        }
    }

    #[tokio::test]
    async fn version_prints_the_package_version() {
        let mut ctx = test_context();
        dispatch(Command::Version, &mut ctx).await.unwrap();

        let out = String::from_utf8(ctx.writer.into_inner()).unwrap();
        assert_eq!(out, format!("cfzone version {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn completions_emit_the_binary_name() {
        let mut ctx = test_context();
        dispatch(
            Command::Completions {
                shell: clap_complete::Shell::Bash,
            },
            &mut ctx,
        )
        .await
        .unwrap();

        let out = String::from_utf8(ctx.writer.into_inner()).unwrap();
        assert!(out.contains("cfzone"));
    }
}
