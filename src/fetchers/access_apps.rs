use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::AccessApp;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct AccessAppsFetcher;

#[async_trait]
impl Fetcher for AccessAppsFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::AccessApps
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let apps: Vec<AccessApp> = ctx
            .client
            .get_paged(&ctx.policy, &format!("/accounts/{}/access/apps", account_id))
            .await?;

        let mut records = vec![MetricRecord::count(&[], "apps_total", apps.len() as u64)];

        for app in &apps {
            let Some(id) = app.id.as_deref() else {
                continue;
            };
            let path = ["app", id];

            let name = app.name.as_deref().unwrap_or("unknown").replace(' ', "_");
            records.push(MetricRecord::text(&path, "name", name));
            records.push(MetricRecord::text(
                &path,
                "domain",
                app.domain.as_deref().unwrap_or("unknown"),
            ));
            records.push(MetricRecord::text(
                &path,
                "type",
                app.app_type.as_deref().unwrap_or("unknown"),
            ));
            if let Some(updated_at) = app.updated_at.as_deref().filter(|s| !s.is_empty()) {
                records.push(MetricRecord::text(&path, "updated_at", updated_at));
            }

            records.push(MetricRecord::count(
                &path,
                "policies_count",
                app.policies.len() as u64,
            ));
            records.push(MetricRecord::count(
                &path,
                "destinations_count",
                app.destinations.len() as u64,
            ));
            records.push(MetricRecord::count(
                &path,
                "idps_count",
                app.allowed_idps.len() as u64,
            ));

            if !app.tags.is_empty() {
                records.push(MetricRecord::text(&path, "tags", app.tags.join(",")));
            }
        }

        Ok(records)
    }
}
