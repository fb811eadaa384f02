use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::DnsRecord;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct DnsFetcher;

#[async_trait]
impl Fetcher for DnsFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Dns
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let zone = ctx.job.zone()?;
        let dns_records: Vec<DnsRecord> = ctx
            .client
            .get_paged(&ctx.policy, &format!("/zones/{}/dns_records", zone.id))
            .await?;

        let mut records = vec![MetricRecord::count(
            &[&zone.name],
            "dns_records_total",
            dns_records.len() as u64,
        )];

        // Type counts keyed by first appearance, so output follows the
        // order the API returned the records in.
        let mut type_counts: Vec<(&str, u64)> = Vec::new();
        for record in &dns_records {
            let record_type = record.record_type.as_deref().unwrap_or("unknown");
            match type_counts.iter_mut().find(|(name, _)| *name == record_type) {
                Some((_, count)) => *count += 1,
                None => type_counts.push((record_type, 1)),
            }
        }
        for (record_type, count) in type_counts {
            records.push(MetricRecord::count(
                &[&zone.name, "dns_records_type"],
                record_type,
                count,
            ));
        }

        Ok(records)
    }
}
