//! Dual-format rendering. Every command writes through [`Writer`], which
//! emits either aligned text columns or pretty-printed JSON, so scripts can
//! flip `-o json` without any command-level changes.

use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output format selected by `-o/--output`, falling back to the config
/// file, then to `table`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Effective format for this invocation: the `-o` flag when given, the
    /// config file's `output_format` otherwise, `table` when neither is set.
    #[must_use]
    pub fn resolve(flag: Option<Self>, configured: Option<Self>) -> Self {
        flag.or(configured).unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct StatusEnvelope<'a> {
    status: &'a str,
    message: &'a str,
}

/// Format-aware sink for command output.
pub struct Writer<W: Write> {
    format: OutputFormat,
    out: W,
}

impl<W: Write> Writer<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Direct access to the sink, for output that is identical in both
    /// formats (version line, shell completions).
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render tabular data.
    ///
    /// Text mode sizes each column to its longest value (header included)
    /// and joins cells with two spaces. JSON mode emits an array of objects
    /// keyed by header. Rows shorter than the header set render only the
    /// cells they have; surplus cells are dropped.
    pub fn write_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_table_json(headers, rows),
            OutputFormat::Table => self.write_table_text(headers, rows),
        }
    }

    fn write_table_text(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.len());
            }
        }

        self.write_row(headers.iter().copied(), &widths)?;
        for row in rows {
            self.write_row(row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }

    fn write_row<'a>(
        &mut self,
        cells: impl Iterator<Item = &'a str>,
        widths: &[usize],
    ) -> Result<()> {
        let parts: Vec<String> = cells
            .zip(widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        writeln!(self.out, "{}", parts.join("  "))?;
        Ok(())
    }

    fn write_table_json(&mut self, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let list: Vec<serde_json::Map<String, serde_json::Value>> = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(header, cell)| {
                        ((*header).to_string(), serde_json::Value::String(cell.clone()))
                    })
                    .collect()
            })
            .collect();
        let json = serde_json::to_string_pretty(&list)?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }

    /// Confirm an action. Text mode prints the message as-is; JSON mode
    /// wraps it in a `{"status": "success"}` envelope.
    pub fn write_success(&mut self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&StatusEnvelope {
                    status: "success",
                    message,
                })?;
                writeln!(self.out, "{json}")?;
            }
            OutputFormat::Table => writeln!(self.out, "{message}")?,
        }
        Ok(())
    }

    /// Emit a value as pretty-printed JSON, whatever the format. Single-item
    /// `get`/`create`/`update` use this in JSON mode so the full object
    /// (timestamps, comment) is available to scripts.
    pub fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }
}

/// Report a failure on stderr, honoring the output format so JSON consumers
/// never see free-form text.
pub fn write_error(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(&StatusEnvelope {
                status: "error",
                message,
            }) {
                eprintln!("{json}");
            }
        }
        OutputFormat::Table => eprintln!("Error: {message}"),
    }
}

/// Render a TTL for tables. Cloudflare uses 1 as the "automatic" sentinel.
#[must_use]
pub fn format_ttl(ttl: u32) -> String {
    if ttl == 1 {
        "Auto".to_string()
    } else {
        ttl.to_string()
    }
}
