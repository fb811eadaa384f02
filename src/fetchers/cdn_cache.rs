use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::{DashboardData, ZoneSetting};
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher, SINCE_MINUTES};

/// Cache level plus the analytics dashboard counters. The counters are
/// emitted even when analytics returns nothing, so a consumer can tell
/// "measured zero" from "not collected".
pub struct CdnCacheFetcher;

#[async_trait]
impl Fetcher for CdnCacheFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::CdnCache
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let zone = ctx.job.zone()?;
        let mut records = Vec::new();

        let setting: Option<ZoneSetting> = ctx
            .client
            .get_json(
                &ctx.policy,
                &format!("/zones/{}/settings/cache_level", zone.id),
            )
            .await?;
        if let Some(cache_level) = setting.and_then(|s| s.value) {
            records.push(MetricRecord::text(&[&zone.name], "cache_level", cache_level));
        }

        let dashboard: Option<DashboardData> = ctx
            .client
            .get_json(
                &ctx.policy,
                &format!(
                    "/zones/{}/analytics/dashboard?since={}",
                    zone.id, SINCE_MINUTES
                ),
            )
            .await?;

        let (requests_total, cached_requests, bandwidth_total) = dashboard
            .and_then(DashboardData::latest)
            .map(|totals| (totals.requests.all, totals.requests.cached, totals.bandwidth.all))
            .unwrap_or_default();

        records.push(MetricRecord::count(
            &[&zone.name],
            "requests_total",
            requests_total,
        ));
        records.push(MetricRecord::count(
            &[&zone.name],
            "bandwidth_total",
            bandwidth_total,
        ));
        records.push(MetricRecord::count(
            &[&zone.name],
            "cached_requests",
            cached_requests,
        ));

        // Guard the hit rate against zero-request zones.
        let cache_hit_rate = if requests_total > 0 {
            cached_requests as f64 / requests_total as f64 * 100.0
        } else {
            0.0
        };
        records.push(MetricRecord::percent(
            &[&zone.name],
            "cache_hit_rate",
            cache_hit_rate,
        ));

        Ok(records)
    }
}
