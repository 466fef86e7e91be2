//! Configuration. A YAML file at `~/.cloudflare/config.yaml` holds
//! credentials and the preferred output format; environment variables
//! override the file at load time and are never written back to it.

use std::path::{Path, PathBuf};

use cfzone_api::Credentials;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};
use crate::output::OutputFormat;

const TOKEN_VARS: [&str; 2] = ["CLOUDFLARE_API_TOKEN", "CF_API_TOKEN"];
const KEY_VARS: [&str; 2] = ["CLOUDFLARE_API_KEY", "CF_API_KEY"];
const EMAIL_VARS: [&str; 2] = ["CLOUDFLARE_API_EMAIL", "CF_API_EMAIL"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective configuration: the file (explicit path or default
    /// location), with environment overrides applied on top.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = Self::from_file(path);
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Configuration exactly as stored on disk, without environment
    /// overrides. Writers start from this so overrides never leak into the
    /// file.
    ///
    /// A missing file is an empty config. A malformed file is logged and
    /// treated as empty rather than aborting every command.
    pub fn from_file(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Ok(path) => path,
                Err(_) => return Self::default(),
            },
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_yaml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring malformed config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply environment overrides. For each setting the `CLOUDFLARE_`
    /// variable is consulted first, then the `CF_` alias; empty values are
    /// ignored. The lookup is injected so tests stay off the process
    /// environment.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = first_non_empty(&lookup, &TOKEN_VARS) {
            self.api_token = Some(token);
        }
        if let Some(key) = first_non_empty(&lookup, &KEY_VARS) {
            self.api_key = Some(key);
        }
        if let Some(email) = first_non_empty(&lookup, &EMAIL_VARS) {
            self.api_email = Some(email);
        }
    }

    /// Usable credentials, if any. A non-empty token always wins; the
    /// key+email pair only counts when both halves are present.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(token) = non_empty(&self.api_token) {
            return Some(Credentials::Token(token));
        }
        match (non_empty(&self.api_key), non_empty(&self.api_email)) {
            (Some(key), Some(email)) => Some(Credentials::KeyEmail { key, email }),
            _ => None,
        }
    }

    /// Write the config to `path`, creating the parent directory if needed.
    /// The file holds credentials, so both get owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_private_dir(parent)?;
            }
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;
        write_private_file(path, yaml.as_bytes())?;
        Ok(())
    }
}

fn first_non_empty(lookup: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.is_empty()))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// `~/.cloudflare/config.yaml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
    Ok(home.join(".cloudflare").join("config.yaml"))
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

// Permissions are set at creation only; a pre-existing file keeps whatever
// mode the user gave it.
#[cfg(unix)]
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
