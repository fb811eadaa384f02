use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::D1Database;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct D1Fetcher;

#[async_trait]
impl Fetcher for D1Fetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::D1
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let databases: Vec<D1Database> = ctx
            .client
            .get_json(&ctx.policy, &format!("/accounts/{}/d1/database", account_id))
            .await?
            .unwrap_or_default();

        let mut records = vec![MetricRecord::count(
            &[],
            "databases_total",
            databases.len() as u64,
        )];

        for database in &databases {
            let name = database.name.as_deref().unwrap_or("unknown");
            let path = ["db", name];

            if let Some(uuid) = &database.uuid {
                records.push(MetricRecord::text(&path, "uuid", uuid));
            }
            records.push(MetricRecord::count(
                &path,
                "size",
                database.file_size.unwrap_or(0),
            ));
            if let Some(created_at) = &database.created_at {
                records.push(MetricRecord::text(&path, "created_at", created_at));
            }
            if let Some(version) = &database.version {
                records.push(MetricRecord::text(&path, "version", version));
            }
        }

        Ok(records)
    }
}
