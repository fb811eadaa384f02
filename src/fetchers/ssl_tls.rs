use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::ZoneSetting;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct SslTlsFetcher;

#[async_trait]
impl Fetcher for SslTlsFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::SslTls
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let zone = ctx.job.zone()?;
        let setting: Option<ZoneSetting> = ctx
            .client
            .get_json(&ctx.policy, &format!("/zones/{}/settings/ssl", zone.id))
            .await?;

        let mut records = Vec::new();
        if let Some(ssl_status) = setting.and_then(|s| s.value) {
            records.push(MetricRecord::text(&[&zone.name], "ssl_status", ssl_status));
        }
        Ok(records)
    }
}
