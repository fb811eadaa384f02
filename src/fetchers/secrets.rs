use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::SecretsStore;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

/// Lists secrets stores, then counts the secrets inside each one.
pub struct SecretsFetcher;

#[async_trait]
impl Fetcher for SecretsFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Secrets
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let stores: Vec<SecretsStore> = ctx
            .client
            .get_paged(
                &ctx.policy,
                &format!("/accounts/{}/secrets_store/stores", account_id),
            )
            .await?;

        let mut records = vec![MetricRecord::count(
            &[],
            "stores_total",
            stores.len() as u64,
        )];

        for store in &stores {
            let Some(id) = store.id.as_deref() else {
                continue;
            };
            let name = store.name.as_deref().unwrap_or(id);

            let secrets: Vec<serde_json::Value> = ctx
                .client
                .get_paged(
                    &ctx.policy,
                    &format!(
                        "/accounts/{}/secrets_store/stores/{}/secrets",
                        account_id, id
                    ),
                )
                .await?;

            let path = ["store", name];
            records.push(MetricRecord::text(&path, "id", id));
            records.push(MetricRecord::count(
                &path,
                "secrets_count",
                secrets.len() as u64,
            ));
        }

        Ok(records)
    }
}
