//! Shared state handed to every command handler.

use std::io::Write;
use std::path::PathBuf;

use cfzone_api::Client;

use crate::config::{self, Config};
use crate::error::{CliError, Result};
use crate::output::Writer;

/// Everything a command needs: the effective config, the config path from
/// `--config` (if any), and the output writer. Generic over the sink so
/// tests can capture output in a buffer, with an endpoint override so they
/// can point commands at a local mock server.
pub struct Context<W: Write> {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub api_base: Option<String>,
    pub writer: Writer<W>,
}

impl<W: Write> Context<W> {
    /// Build an API client from the effective credentials.
    ///
    /// Fails fast with the full "how to configure credentials" message
    /// before any network traffic happens.
    pub fn client(&self) -> Result<Client> {
        let credentials = self.config.credentials().ok_or(CliError::Credentials)?;
        let client = match &self.api_base {
            Some(base) => Client::with_base_url(credentials, base),
            None => Client::new(credentials),
        };
        Ok(client?)
    }

    /// The config file commands read from and write to: `--config` when
    /// given, the default location otherwise.
    pub fn config_file(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => config::default_config_path(),
        }
    }
}
