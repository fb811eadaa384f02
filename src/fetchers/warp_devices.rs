use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::WarpDevice;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

/// WARP physical devices; the only cursor-paginated listing.
pub struct WarpDevicesFetcher;

#[async_trait]
impl Fetcher for WarpDevicesFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::WarpDevices
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let devices: Vec<WarpDevice> = ctx
            .client
            .get_cursor_paged(
                &ctx.policy,
                &format!("/accounts/{}/devices/physical-devices", account_id),
            )
            .await?;

        let mut records = vec![MetricRecord::count(
            &[],
            "devices_total",
            devices.len() as u64,
        )];

        for device in &devices {
            let Some(id) = device.id.as_deref() else {
                continue;
            };
            let path = ["device", id];

            let name = device
                .name
                .as_deref()
                .unwrap_or("unknown")
                .replace(' ', "_");
            records.push(MetricRecord::text(&path, "name", name));
            records.push(MetricRecord::text(
                &path,
                "platform",
                device.device_type.as_deref().unwrap_or("unknown"),
            ));
            records.push(MetricRecord::text(
                &path,
                "version",
                device.os_version.as_deref().unwrap_or("unknown"),
            ));
            // deleted means revoked from the account's fleet
            let status = if device.deleted { "revoked" } else { "active" };
            records.push(MetricRecord::text(&path, "status", status));
            if let Some(last_seen) = device.last_seen_at.as_deref().filter(|s| !s.is_empty()) {
                records.push(MetricRecord::text(&path, "last_seen", last_seen));
            }
        }

        Ok(records)
    }
}
