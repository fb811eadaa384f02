use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::{GatewayAccount, GatewayRule};
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

/// Zero Trust gateway account configuration plus rule aggregates.
pub struct GatewayFetcher;

#[async_trait]
impl Fetcher for GatewayFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Gateway
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let mut records = Vec::new();

        let gateway_account: Option<GatewayAccount> = ctx
            .client
            .get_json(&ctx.policy, &format!("/accounts/{}/gateway", account_id))
            .await?;
        if let Some(account) = gateway_account {
            records.push(MetricRecord::text(
                &["account"],
                "provider",
                account.provider_name.as_deref().unwrap_or("unknown"),
            ));
            // The gateway tag is distinct from the general account id.
            if let Some(tag) = account.id.as_deref().filter(|s| !s.is_empty()) {
                records.push(MetricRecord::text(&["account"], "tag", tag));
            }
        }

        let rules: Vec<GatewayRule> = ctx
            .client
            .get_paged(
                &ctx.policy,
                &format!("/accounts/{}/gateway/rules", account_id),
            )
            .await?;

        records.push(MetricRecord::count(&[], "rules_total", rules.len() as u64));

        let mut action_counts: Vec<(&str, u64)> = Vec::new();
        for rule in &rules {
            let action = rule.action.as_deref().unwrap_or("unknown");
            match action_counts.iter_mut().find(|(name, _)| *name == action) {
                Some((_, count)) => *count += 1,
                None => action_counts.push((action, 1)),
            }
        }
        for (action, count) in action_counts {
            records.push(MetricRecord::count(&["rules_action"], action, count));
        }

        Ok(records)
    }
}
