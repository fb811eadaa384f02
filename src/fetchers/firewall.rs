use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::SecurityEvents;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher, SINCE_MINUTES};

/// Aggregates the recent security events of a zone by action.
pub struct FirewallFetcher;

#[async_trait]
impl Fetcher for FirewallFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Firewall
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let zone = ctx.job.zone()?;
        let events = ctx
            .client
            .get_json::<SecurityEvents>(
                &ctx.policy,
                &format!("/zones/{}/security/events?since={}", zone.id, SINCE_MINUTES),
            )
            .await?
            .unwrap_or_default()
            .events;

        let mut blocked_total = 0u64;
        let mut challenged_total = 0u64;
        let mut allowed_total = 0u64;
        for event in &events {
            match event.action.as_deref() {
                Some("block") => blocked_total += 1,
                Some("challenge") => challenged_total += 1,
                Some("allow") => allowed_total += 1,
                _ => {}
            }
        }

        let path = [zone.name.as_str(), "firewall"];
        Ok(vec![
            MetricRecord::count(&path, "blocked_total", blocked_total),
            MetricRecord::count(&path, "challenged_total", challenged_total),
            MetricRecord::count(&path, "allowed_total", allowed_total),
            MetricRecord::count(&path, "events_total", events.len() as u64),
        ])
    }
}
