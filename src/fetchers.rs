mod access_apps;
mod cdn_cache;
mod d1;
mod dns;
mod firewall;
mod gateway;
mod pages;
mod secrets;
mod ssl_tls;
mod warp_devices;
mod workers;

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiClient, FetchError};
use crate::record::{MetricRecord, ResourceJob, ResourceKind};
use crate::retry::RetryPolicy;

/// Everything a fetcher needs for one job. The client and policy are
/// shared read-only across all concurrent fetchers.
pub struct FetchContext {
    pub client: Arc<ApiClient>,
    pub policy: Arc<RetryPolicy>,
    pub job: ResourceJob,
}

/// One fetcher per resource kind. Implementations differ only in which
/// endpoints they call and how the payload flattens into records; a
/// failure in one must never leak into another.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError>;
}

/// `None` for kinds with no live endpoint (analytics); the orchestrator
/// records those as permanently skipped without dispatching a job.
pub fn fetcher_for(kind: ResourceKind) -> Option<Box<dyn Fetcher>> {
    match kind {
        ResourceKind::CdnCache => Some(Box::new(cdn_cache::CdnCacheFetcher)),
        ResourceKind::Dns => Some(Box::new(dns::DnsFetcher)),
        ResourceKind::SslTls => Some(Box::new(ssl_tls::SslTlsFetcher)),
        ResourceKind::Firewall => Some(Box::new(firewall::FirewallFetcher)),
        ResourceKind::Workers => Some(Box::new(workers::WorkersFetcher)),
        ResourceKind::Pages => Some(Box::new(pages::PagesFetcher)),
        ResourceKind::D1 => Some(Box::new(d1::D1Fetcher)),
        ResourceKind::Secrets => Some(Box::new(secrets::SecretsFetcher)),
        ResourceKind::WarpDevices => Some(Box::new(warp_devices::WarpDevicesFetcher)),
        ResourceKind::AccessApps => Some(Box::new(access_apps::AccessAppsFetcher)),
        ResourceKind::Gateway => Some(Box::new(gateway::GatewayFetcher)),
        ResourceKind::Analytics => None,
    }
}

/// Relative `since` window for event/analytics queries, in minutes.
pub(crate) const SINCE_MINUTES: i32 = -1440;
