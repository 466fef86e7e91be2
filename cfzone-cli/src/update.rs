//! Release update checks: a best-effort background advisory that runs
//! alongside every command, and the foreground `cfzone update` command.

use std::io::Write;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::oneshot;
use version_compare::Version;

use crate::context::Context;
use crate::error::{CliError, Result};

const RELEASES_URL: &str = "https://api.github.com/repos/cfzone/cfzone/releases/latest";
const RELEASES_PAGE: &str = "https://github.com/cfzone/cfzone/releases/latest";
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle for the background advisory check.
///
/// The check must never slow a command down or fail it: it runs
/// concurrently with the command, any failure is silently dropped, and the
/// notice goes to stderr only after the command's own output is done.
pub struct UpdateCheck {
    rx: Option<oneshot::Receiver<String>>,
}

impl UpdateCheck {
    /// Start the check. Debug builds skip it entirely.
    pub fn spawn() -> Self {
        if cfg!(debug_assertions) {
            return Self { rx: None };
        }

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            if let Ok(Ok(Some(version))) =
                tokio::time::timeout(CHECK_TIMEOUT, newer_release()).await
            {
                let _ = tx.send(format!(
                    "A new version ({version}) is available. Update with: cfzone update"
                ));
            }
        });

        Self { rx: Some(rx) }
    }

    /// Print the notice if one arrived. The sender is dropped when the
    /// check finds nothing, so this never blocks past the check itself.
    pub async fn finish(self) {
        let Some(rx) = self.rx else { return };
        if let Ok(Ok(notice)) = tokio::time::timeout(CHECK_TIMEOUT, rx).await {
            eprintln!("\n{notice}");
        }
    }
}

/// Foreground check for `cfzone update`. Unlike the advisory, failures
/// here are reported: the user explicitly asked.
pub async fn run<W: Write>(ctx: &mut Context<W>) -> Result<()> {
    writeln!(ctx.writer.get_mut(), "Current version: {CURRENT_VERSION}")?;
    writeln!(ctx.writer.get_mut(), "Checking for updates...")?;

    let latest = fetch_latest_version()
        .await
        .map_err(|e| CliError::Update(e.to_string()))?;

    let out = ctx.writer.get_mut();
    if is_newer(&latest, CURRENT_VERSION) {
        writeln!(out, "A new version is available: {latest}")?;
        writeln!(out, "Download it from {RELEASES_PAGE}")?;
    } else {
        writeln!(out, "You are already on the latest version ({CURRENT_VERSION})")?;
    }
    Ok(())
}

async fn newer_release() -> std::result::Result<Option<String>, reqwest::Error> {
    let latest = fetch_latest_version().await?;
    if is_newer(&latest, CURRENT_VERSION) {
        Ok(Some(latest))
    } else {
        Ok(None)
    }
}

async fn fetch_latest_version() -> std::result::Result<String, reqwest::Error> {
    #[derive(Deserialize)]
    struct Release {
        tag_name: String,
    }

    let client = reqwest::Client::builder().timeout(CHECK_TIMEOUT).build()?;
    let release: Release = client
        .get(RELEASES_URL)
        // GitHub's API rejects requests without a User-Agent.
        .header("User-Agent", concat!("cfzone/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(release.tag_name.trim_start_matches('v').to_string())
}

/// Strictly newer, per release-version ordering. Anything that does not
/// parse compares as not-newer so garbage tags never produce a notice.
fn is_newer(candidate: &str, current: &str) -> bool {
    match (Version::from(candidate), Version::from(current)) {
        (Some(candidate), Some(current)) => candidate > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_versions_are_detected() {
        assert!(is_newer("1.2.0", "1.1.9"));
        assert!(is_newer("2.0.0", "1.9.9"));
        // Numeric ordering, not lexical.
        assert!(is_newer("1.2.10", "1.2.9"));
    }

    #[test]
    fn equal_versions_are_not_newer() {
        assert!(!is_newer("1.2.0", "1.2.0"));
    }

    #[test]
    fn older_versions_are_not_newer() {
        assert!(!is_newer("1.1.9", "1.2.0"));
        assert!(!is_newer("0.9.0", "1.0.0"));
    }

    #[test]
    fn unparseable_versions_never_trigger_a_notice() {
        assert!(!is_newer("", "1.2.0"));
        assert!(!is_newer("1.2.0", ""));
    }
}
