use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::WorkerScript;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct WorkersFetcher;

#[async_trait]
impl Fetcher for WorkersFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Workers
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let scripts: Vec<WorkerScript> = ctx
            .client
            .get_json(
                &ctx.policy,
                &format!("/accounts/{}/workers/scripts", account_id),
            )
            .await?
            .unwrap_or_default();

        let mut records = vec![MetricRecord::count(
            &[],
            "scripts_total",
            scripts.len() as u64,
        )];

        for script in &scripts {
            let Some(id) = script.id.as_deref() else {
                continue;
            };
            records.push(MetricRecord::text(&[id], "id", id));
            if let Some(created_on) = &script.created_on {
                records.push(MetricRecord::text(&[id], "created_on", created_on));
            }
            if let Some(modified_on) = &script.modified_on {
                records.push(MetricRecord::text(&[id], "modified_on", modified_on));
            }
            if let Some(usage_model) = &script.usage_model {
                records.push(MetricRecord::text(&[id], "usage_model", usage_model));
            }
            if let Some(etag) = &script.etag {
                records.push(MetricRecord::text(&[id], "etag", etag));
            }
        }

        Ok(records)
    }
}
