//! Zone listing and resolution. Commands accept either a zone name or a
//! zone ID everywhere, and resolution decides which lookup to run.

use crate::client::Client;
use crate::error::{ApiError, Result};
use crate::types::Zone;

/// The zones endpoint caps `per_page` at 50.
const ZONES_PER_PAGE: u32 = 50;

/// Whether `input` has the shape of a Cloudflare zone ID: exactly 32
/// lowercase hex characters.
///
/// Shape is the only thing checkable locally. An ID-shaped input that turns
/// out not to exist still gets a name lookup afterwards.
#[must_use]
pub fn looks_like_zone_id(input: &str) -> bool {
    input.len() == 32 && input.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl Client {
    /// List every zone the credentials can see, walking pages until the
    /// reported total is covered.
    ///
    /// # Errors
    ///
    /// Permission failures come back as [`ApiError::ZoneListDenied`], which
    /// names the `Zone:Read` scope the token is missing.
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut zones = Vec::new();
        let mut page: u32 = 1;

        loop {
            let path = format!("/zones?page={page}&per_page={ZONES_PER_PAGE}");
            let (mut batch, info) =
                self.get_with_info::<Zone>(&path).await.map_err(|e| match e {
                    ApiError::PermissionDenied { message } => ApiError::ZoneListDenied { message },
                    other => other,
                })?;

            let total = info.map_or(0, |i| i.total_count);
            let exhausted = batch.is_empty();
            zones.append(&mut batch);

            if exhausted || page.saturating_mul(ZONES_PER_PAGE) >= total {
                break;
            }
            page += 1;
        }

        Ok(zones)
    }

    /// Resolve a zone name or ID to the full zone.
    ///
    /// ID-shaped inputs try `GET /zones/{id}` first; any failure there
    /// falls through to the name lookup. When a name matches several zones
    /// (multi-account tokens), the first match wins.
    ///
    /// # Errors
    ///
    /// [`ApiError::ZoneNotFound`] when nothing matches. Permission failures
    /// on the name lookup come back as [`ApiError::ZoneLookupDenied`],
    /// which explains the zone-scoped-token workaround.
    pub async fn get_zone(&self, name_or_id: &str) -> Result<Zone> {
        if looks_like_zone_id(name_or_id) {
            match self.get::<Zone>(&format!("/zones/{name_or_id}")).await {
                Ok(zone) => return Ok(zone),
                Err(e) => log::debug!("zone lookup by ID failed ({e}), retrying as a name"),
            }
        }

        let path = format!("/zones?name={}", urlencoding::encode(name_or_id));
        let (zones, _) = self.get_with_info::<Zone>(&path).await.map_err(|e| match e {
            ApiError::PermissionDenied { message } => ApiError::ZoneLookupDenied { message },
            other => other,
        })?;

        if zones.len() > 1 {
            log::debug!(
                "zone name '{name_or_id}' matched {} zones, taking the first",
                zones.len()
            );
        }

        zones.into_iter().next().ok_or_else(|| ApiError::ZoneNotFound {
            zone: name_or_id.to_string(),
        })
    }

    /// Resolve a zone name or ID to just the zone ID.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Client::get_zone`].
    pub async fn resolve_zone_id(&self, name_or_id: &str) -> Result<String> {
        Ok(self.get_zone(name_or_id).await?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_shape_accepts_32_lowercase_hex() {
        assert!(looks_like_zone_id("023e105f4ecef8ad9ca31a8372d0c353"));
        assert!(looks_like_zone_id("00000000000000000000000000000000"));
    }

    #[test]
    fn zone_id_shape_rejects_wrong_length() {
        assert!(!looks_like_zone_id(""));
        assert!(!looks_like_zone_id("023e105f4ecef8ad9ca31a8372d0c35"));
        assert!(!looks_like_zone_id("023e105f4ecef8ad9ca31a8372d0c3530"));
    }

    #[test]
    fn zone_id_shape_rejects_uppercase_hex() {
        assert!(!looks_like_zone_id("023E105F4ECEF8AD9CA31A8372D0C353"));
    }

    #[test]
    fn zone_id_shape_rejects_non_hex() {
        assert!(!looks_like_zone_id("023e105f4ecef8ad9ca31a8372d0c35g"));
        assert!(!looks_like_zone_id("example.com"));
        // Dotted input of exactly 32 bytes stays a name.
        assert!(!looks_like_zone_id("very-long-domain-name.example.ab"));
    }
}
