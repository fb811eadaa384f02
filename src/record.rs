use crate::api::FetchError;
use crate::api::types::Zone;

/// The monitored resource categories. Order of `SECTION_ORDER` is the fixed
/// output priority, independent of job completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    CdnCache,
    Dns,
    SslTls,
    Firewall,
    Workers,
    Pages,
    D1,
    Secrets,
    WarpDevices,
    AccessApps,
    Gateway,
    /// Cloudflare One analytics are not exposed by the REST API; the kind
    /// exists only to carry a permanent Skipped status.
    Analytics,
}

impl ResourceKind {
    pub const SECTION_ORDER: [ResourceKind; 12] = [
        ResourceKind::CdnCache,
        ResourceKind::Dns,
        ResourceKind::SslTls,
        ResourceKind::Firewall,
        ResourceKind::Workers,
        ResourceKind::Pages,
        ResourceKind::D1,
        ResourceKind::Secrets,
        ResourceKind::WarpDevices,
        ResourceKind::AccessApps,
        ResourceKind::Gateway,
        ResourceKind::Analytics,
    ];

    pub const fn section(self) -> &'static str {
        match self {
            ResourceKind::CdnCache => "cdn_cache",
            ResourceKind::Dns => "dns",
            ResourceKind::SslTls => "ssl_tls",
            ResourceKind::Firewall => "firewall",
            ResourceKind::Workers => "workers",
            ResourceKind::Pages => "pages",
            ResourceKind::D1 => "d1",
            ResourceKind::Secrets => "secrets",
            ResourceKind::WarpDevices => "warp_devices",
            ResourceKind::AccessApps => "access_apps",
            ResourceKind::Gateway => "gateway",
            ResourceKind::Analytics => "analytics",
        }
    }

    /// Account-scoped kinds run once per account; the rest once per zone.
    pub const fn account_scoped(self) -> bool {
        !matches!(
            self,
            ResourceKind::CdnCache
                | ResourceKind::Dns
                | ResourceKind::SslTls
                | ResourceKind::Firewall
        )
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Text(String),
    Count(u64),
    /// Rendered with two decimal places and a trailing percent sign.
    Percent(f64),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Text(text) => f.write_str(text),
            MetricValue::Count(count) => write!(f, "{}", count),
            MetricValue::Percent(pct) => write!(f, "{:.2}%", pct),
        }
    }
}

/// One output line: `path.segments.field=value`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub path: Vec<String>,
    pub field: String,
    pub value: MetricValue,
}

impl MetricRecord {
    pub fn text(path: &[&str], field: &str, value: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            field: field.to_string(),
            value: MetricValue::Text(value.into()),
        }
    }

    pub fn count(path: &[&str], field: &str, value: u64) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            field: field.to_string(),
            value: MetricValue::Count(value),
        }
    }

    pub fn percent(path: &[&str], field: &str, value: f64) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
            field: field.to_string(),
            value: MetricValue::Percent(value),
        }
    }
}

impl std::fmt::Display for MetricRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.path {
            write!(f, "{}.", segment)?;
        }
        write!(f, "{}={}", self.field, self.value)
    }
}

/// Scope instance a job runs against.
#[derive(Debug, Clone)]
pub enum Scope {
    Zone(Zone),
    Account(String),
}

/// One unit of work: (resource kind, scope instance). Created by the
/// orchestrator before dispatch, consumed exactly once by a fetcher.
#[derive(Debug, Clone)]
pub struct ResourceJob {
    pub kind: ResourceKind,
    pub scope: Scope,
    pub index: usize,
}

impl ResourceJob {
    pub fn zone(&self) -> Result<&Zone, FetchError> {
        match &self.scope {
            Scope::Zone(zone) => Ok(zone),
            Scope::Account(_) => Err(FetchError::Scope { kind: self.kind }),
        }
    }

    pub fn account(&self) -> Result<&str, FetchError> {
        match &self.scope {
            Scope::Account(account_id) => Ok(account_id),
            Scope::Zone(_) => Err(FetchError::Scope { kind: self.kind }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Ok,
    Skipped(String),
    Failed(String),
}

/// Outcome of a single job after the fetcher boundary has absorbed
/// non-fatal errors.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub kind: ResourceKind,
    pub records: Vec<MetricRecord>,
    pub status: JobStatus,
}

impl JobResult {
    pub fn ok(kind: ResourceKind, records: Vec<MetricRecord>) -> Self {
        Self {
            kind,
            records,
            status: JobStatus::Ok,
        }
    }

    pub fn skipped(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            records: Vec::new(),
            status: JobStatus::Skipped(reason.into()),
        }
    }

    pub fn failed(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            records: Vec::new(),
            status: JobStatus::Failed(reason.into()),
        }
    }
}

/// All job outcomes in job-creation order. Written through a single fold in
/// the orchestrator; read once by the serializer.
#[derive(Debug, Default)]
pub struct CollectionResult {
    jobs: Vec<JobResult>,
}

impl CollectionResult {
    pub fn new(jobs: Vec<JobResult>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[JobResult] {
        &self.jobs
    }

    pub fn records_for(&self, kind: ResourceKind) -> impl Iterator<Item = &MetricRecord> {
        self.jobs
            .iter()
            .filter(move |job| job.kind == kind)
            .flat_map(|job| job.records.iter())
    }

    pub fn has_ok(&self, kind: ResourceKind) -> bool {
        self.jobs
            .iter()
            .any(|job| job.kind == kind && job.status == JobStatus::Ok)
    }
}
