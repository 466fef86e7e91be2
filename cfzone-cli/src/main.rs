//! `cfzone`: manage Cloudflare DNS zones and records from the command
//! line.
//!
//! The flow is parse, load config, run the command, then surface the
//! background update notice. All failures funnel through one place so the
//! error format matches the selected output format.

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod output;
mod update;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::Context;
use crate::output::{OutputFormat, Writer};
use crate::update::UpdateCheck;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let Cli {
        config: config_path,
        output,
        command,
    } = Cli::parse();

    let update_check = UpdateCheck::spawn();

    let config = Config::load(config_path.as_deref());
    let format = OutputFormat::resolve(output, config.output_format);

    let mut ctx = Context {
        config,
        config_path,
        api_base: None,
        writer: Writer::new(format, io::stdout()),
    };
    let result = commands::dispatch(command, &mut ctx).await;

    // Notice last, so it never interleaves with command output.
    update_check.finish().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Expected failures already reach the user via write_error.
            if e.is_expected() {
                tracing::debug!("{e}");
            } else {
                tracing::error!("{e}");
            }
            output::write_error(format, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}
