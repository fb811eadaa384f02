use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};

use crate::api::{ApiClient, FetchError};
use crate::config::AgentConfig;
use crate::discovery::Discoverer;
use crate::error::AgentError;
use crate::fetchers::{FetchContext, fetcher_for};
use crate::record::{
    CollectionResult, JobResult, JobStatus, ResourceJob, ResourceKind, Scope,
};

/// Runs the whole collection: discovery, concurrent dispatch of one job
/// per (kind, scope instance), and the single-writer fold of completed
/// jobs into the result.
pub async fn collect(config: &AgentConfig) -> Result<CollectionResult, AgentError> {
    let client = Arc::new(ApiClient::with_base_url(
        &config.credentials,
        config.api_base.clone(),
    )?);
    let policy = Arc::new(config.retry.clone());
    let deadline = Instant::now() + config.timeout;

    let needs_zones = config.kinds.iter().any(|kind| !kind.account_scoped());
    let needs_account = config
        .kinds
        .iter()
        .any(|kind| kind.account_scoped() && *kind != ResourceKind::Analytics);

    let discoverer = Discoverer::new(&client, &policy);
    let zones = if needs_zones {
        discoverer.zones().await?
    } else {
        Vec::new()
    };
    let account_id = if needs_account {
        Some(discoverer.account_id(config.account_id.as_deref()).await?)
    } else {
        None
    };

    // Job list: enabled kinds in priority order, fanned out over their
    // scope instances. Slot indexes fix the output order up front.
    let mut slots: Vec<Option<JobResult>> = Vec::new();
    let mut slot_kinds: Vec<ResourceKind> = Vec::new();
    let mut pending: Vec<ResourceJob> = Vec::new();

    for &kind in &config.kinds {
        if kind == ResourceKind::Analytics {
            slot_kinds.push(kind);
            slots.push(Some(JobResult::skipped(
                kind,
                "analytics are not exposed by the REST API",
            )));
            continue;
        }
        if kind.account_scoped() {
            if let Some(account_id) = &account_id {
                let index = slots.len();
                slot_kinds.push(kind);
                slots.push(None);
                pending.push(ResourceJob {
                    kind,
                    scope: Scope::Account(account_id.clone()),
                    index,
                });
            }
        } else {
            for zone in &zones {
                let index = slots.len();
                slot_kinds.push(kind);
                slots.push(None);
                pending.push(ResourceJob {
                    kind,
                    scope: Scope::Zone(zone.clone()),
                    index,
                });
            }
        }
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let mut tasks = JoinSet::new();

    for job in pending {
        let semaphore = Arc::clone(&semaphore);
        let client = Arc::clone(&client);
        let policy = Arc::clone(&policy);

        tasks.spawn(async move {
            let index = job.index;
            let kind = job.kind;

            let outcome = timeout_at(deadline, async {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return Err(FetchError::Timeout);
                };
                let Some(fetcher) = fetcher_for(job.kind) else {
                    return Err(FetchError::Unavailable { status: 0 });
                };
                let ctx = FetchContext {
                    client,
                    policy,
                    job,
                };
                fetcher.fetch(&ctx).await
            })
            .await;

            let result = match outcome {
                Ok(Ok(records)) => Ok(JobResult::ok(kind, records)),
                Ok(Err(err)) if err.is_fatal() => Err(err),
                Ok(Err(err @ FetchError::Unavailable { .. })) => {
                    Ok(JobResult::skipped(kind, err.to_string()))
                }
                Ok(Err(err)) => Ok(JobResult::failed(kind, err.to_string())),
                Err(_elapsed) => Ok(JobResult::failed(kind, "timeout")),
            };
            (index, result)
        });
    }

    // Completion fold: the one place results are written, one job at a
    // time, regardless of how many fetchers run concurrently.
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(outcome))) => {
                match &outcome.status {
                    JobStatus::Skipped(reason) => {
                        tracing::debug!(kind = %outcome.kind, %reason, "resource skipped");
                    }
                    JobStatus::Failed(reason) => {
                        tracing::debug!(kind = %outcome.kind, %reason, "resource failed");
                    }
                    JobStatus::Ok => {}
                }
                slots[index] = Some(outcome);
            }
            Ok((_, Err(err))) => {
                // Credentials are shared; one rejection dooms the run.
                tasks.abort_all();
                return Err(AgentError::AuthRejected(err.to_string()));
            }
            Err(join_err) => {
                tracing::warn!(error = %join_err, "fetch task aborted");
            }
        }
    }

    let jobs = slots
        .into_iter()
        .zip(slot_kinds)
        .map(|(slot, kind)| slot.unwrap_or_else(|| JobResult::failed(kind, "task aborted")))
        .collect();

    Ok(CollectionResult::new(jobs))
}
