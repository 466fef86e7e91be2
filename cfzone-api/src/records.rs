//! DNS record operations. Every call takes the owning zone ID; record IDs
//! mean nothing on their own.

use crate::client::Client;
use crate::error::Result;
use crate::types::{CreateRecordParams, DnsRecord, RecordType, UpdateRecordParams};

/// The record endpoints cap `per_page` at 100.
const RECORDS_PER_PAGE: u32 = 100;

impl Client {
    /// List records in a zone, walking pages until the reported total is
    /// covered. `record_type` and `name` filter server-side; `name` must be
    /// the fully qualified record name.
    ///
    /// # Errors
    ///
    /// Fails if the zone is inaccessible or a page request fails.
    pub async fn list_records(
        &self,
        zone_id: &str,
        record_type: Option<RecordType>,
        name: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        let mut filter = String::new();
        if let Some(record_type) = record_type {
            filter.push_str(&format!("&type={record_type}"));
        }
        if let Some(name) = name {
            filter.push_str(&format!("&name={}", urlencoding::encode(name)));
        }

        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let path = format!(
                "/zones/{zone_id}/dns_records?page={page}&per_page={RECORDS_PER_PAGE}{filter}"
            );
            let (mut batch, info) = self
                .get_with_info::<DnsRecord>(&path)
                .await
                .map_err(|e| e.with_zone_context(zone_id))?;

            let total = info.map_or(0, |i| i.total_count);
            let exhausted = batch.is_empty();
            records.append(&mut batch);

            if exhausted || page.saturating_mul(RECORDS_PER_PAGE) >= total {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    /// Fetch one record by ID.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::RecordNotFound`] when the ID does not exist in
    /// this zone.
    pub async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        self.get(&format!("/zones/{zone_id}/dns_records/{record_id}"))
            .await
            .map_err(|e| e.with_record_context(record_id).with_zone_context(zone_id))
    }

    /// Create a record and return it as stored, IDs and timestamps filled
    /// in.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::RecordExists`] when an identical record is
    /// already present.
    pub async fn create_record(
        &self,
        zone_id: &str,
        params: &CreateRecordParams,
    ) -> Result<DnsRecord> {
        self.post(&format!("/zones/{zone_id}/dns_records"), params)
            .await
            .map_err(|e| e.with_record_name(&params.name).with_zone_context(zone_id))
    }

    /// Rewrite a record in place via `PATCH` and return the stored result.
    /// Callers send the full merged state; see the CLI's fetch-then-merge.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::RecordNotFound`] when the ID does not exist in
    /// this zone.
    pub async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        params: &UpdateRecordParams,
    ) -> Result<DnsRecord> {
        self.patch(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            params,
        )
        .await
        .map_err(|e| {
            e.with_record_context(record_id)
                .with_record_name(&params.name)
                .with_zone_context(zone_id)
        })
    }

    /// Delete a record. Deleting an ID that is already gone is an error,
    /// not a no-op.
    ///
    /// # Errors
    ///
    /// [`crate::ApiError::RecordNotFound`] when the ID does not exist in
    /// this zone.
    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.delete(&format!("/zones/{zone_id}/dns_records/{record_id}"))
            .await
            .map_err(|e| e.with_record_context(record_id).with_zone_context(zone_id))
    }
}
