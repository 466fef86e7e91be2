//! Command-line definition. Parsing and validation of flag values happen
//! here; the handlers in `commands` receive typed arguments only.

use std::path::PathBuf;

use cfzone_api::RecordType;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "cfzone",
    version,
    about = "Manage Cloudflare DNS zones and records",
    long_about = "cfzone manages Cloudflare DNS zones and records from the command line.\n\n\
                  Credentials come from the CLOUDFLARE_API_TOKEN environment variable (or\n\
                  CLOUDFLARE_API_KEY plus CLOUDFLARE_API_EMAIL), falling back to the config\n\
                  file at ~/.cloudflare/config.yaml. Zones can be referenced by name or by\n\
                  their 32-character hex ID everywhere."
)]
pub struct Cli {
    /// Path to the config file (default: ~/.cloudflare/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify and store credentials
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Read and write CLI settings
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Inspect zones
    #[command(subcommand)]
    Zones(ZonesCommand),

    /// Manage DNS records
    #[command(subcommand)]
    Dns(DnsCommand),

    /// Print the version
    Version,

    /// Check whether a newer release is available
    Update,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Check that the configured credentials can reach the API
    Verify,

    /// Verify an API token and store it in the config file
    Save {
        /// API token to store
        token: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Set a config value
    Set {
        key: ConfigKey,
        value: String,
    },

    /// Print a config value
    Get { key: ConfigKey },

    /// List all config values
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigKey {
    /// Default output format (table or json)
    #[value(name = "output_format")]
    OutputFormat,
}

impl ConfigKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutputFormat => "output_format",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommand {
    /// List zones visible to the credentials
    List,

    /// Show one zone
    Get {
        /// Zone name or ID
        zone: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List DNS records in a zone
    List {
        /// Zone name or ID
        zone: String,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one DNS record
    Get {
        /// Zone name or ID
        zone: String,
        /// Record ID
        record_id: String,
    },

    /// Create a DNS record
    Create {
        /// Zone name or ID
        zone: String,
        #[command(flatten)]
        record: CreateArgs,
    },

    /// Update fields of an existing DNS record
    Update {
        /// Zone name or ID
        zone: String,
        /// Record ID
        record_id: String,
        #[command(flatten)]
        changes: UpdateArgs,
    },

    /// Delete a DNS record
    Delete {
        /// Zone name or ID
        zone: String,
        /// Record ID
        record_id: String,
    },

    /// Find records matching a type and/or name
    Find {
        /// Zone name or ID
        zone: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Filter by record type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub record_type: Option<RecordType>,

    /// Filter by fully qualified record name
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Record type (A, AAAA, CNAME, TXT, MX, NS, SRV, CAA)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub record_type: RecordType,

    /// Fully qualified record name
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: String,

    /// Record content
    #[arg(short = 'c', long, value_name = "CONTENT")]
    pub content: String,

    /// TTL in seconds (1 = automatic)
    #[arg(long, value_name = "TTL", default_value_t = 1)]
    pub ttl: u32,

    /// Proxy through Cloudflare (--proxied or --proxied=false)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub proxied: Option<bool>,

    /// Priority, for record types that use one (MX, SRV)
    #[arg(long, value_name = "PRIORITY")]
    pub priority: Option<u16>,

    /// Comment stored alongside the record
    #[arg(long, value_name = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct UpdateArgs {
    /// New record type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub record_type: Option<RecordType>,

    /// New record name
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// New record content
    #[arg(short = 'c', long, value_name = "CONTENT")]
    pub content: Option<String>,

    /// New TTL in seconds (1 = automatic)
    #[arg(long, value_name = "TTL")]
    pub ttl: Option<u32>,

    /// Proxy through Cloudflare (--proxied or --proxied=false)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub proxied: Option<bool>,

    /// New priority
    #[arg(long, value_name = "PRIORITY")]
    pub priority: Option<u16>,

    /// New comment (pass an empty string to clear the stored one)
    #[arg(long, value_name = "COMMENT")]
    pub comment: Option<String>,
}
