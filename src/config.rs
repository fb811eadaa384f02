use std::time::Duration;

use crate::api::API_BASE;
use crate::cli::Cli;
use crate::credentials::CredentialSet;
use crate::error::AgentError;
use crate::record::ResourceKind;
use crate::retry::RetryPolicy;

/// Concurrency cap for in-flight fetch jobs. Fixed and independent of zone
/// count to stay under the provider's rate limits.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Immutable run configuration, constructed once at startup and passed
/// explicitly to the discoverer and orchestrator.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub credentials: CredentialSet,
    pub account_id: Option<String>,
    /// Enabled kinds, already in section-priority order.
    pub kinds: Vec<ResourceKind>,
    /// Overall wall-clock deadline for the whole collection run.
    pub timeout: Duration,
    pub concurrency: usize,
    pub retry: RetryPolicy,
    pub verbose: bool,
    pub api_base: String,
}

impl AgentConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, AgentError> {
        let credentials = CredentialSet::resolve(cli.email.clone(), cli.api_key.clone(), cli.api_token.clone())?;

        Ok(Self {
            credentials,
            account_id: cli.account_id.clone(),
            kinds: selected_kinds(&cli),
            timeout: Duration::from_secs(cli.timeout),
            concurrency: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
            verbose: cli.verbose,
            api_base: API_BASE.to_string(),
        })
    }
}

/// Resolve the resource-selection flags. No flag at all means everything;
/// `--all` is the same set. `--analytics` is only ever explicit since its
/// endpoints are permanently unavailable.
fn selected_kinds(cli: &Cli) -> Vec<ResourceKind> {
    let explicit = cli.cdn_cache
        || cli.dns
        || cli.ssl_tls
        || cli.firewall
        || cli.workers_pages
        || cli.d1
        || cli.secrets
        || cli.devices
        || cli.apps
        || cli.gateway
        || cli.analytics;
    let all = cli.all || !explicit;

    let mut kinds = Vec::new();
    if all || cli.cdn_cache {
        kinds.push(ResourceKind::CdnCache);
    }
    if all || cli.dns {
        kinds.push(ResourceKind::Dns);
    }
    if all || cli.ssl_tls {
        kinds.push(ResourceKind::SslTls);
    }
    if all || cli.firewall {
        kinds.push(ResourceKind::Firewall);
    }
    if all || cli.workers_pages {
        kinds.push(ResourceKind::Workers);
        kinds.push(ResourceKind::Pages);
    }
    if all || cli.d1 {
        kinds.push(ResourceKind::D1);
    }
    if all || cli.secrets {
        kinds.push(ResourceKind::Secrets);
    }
    if all || cli.devices {
        kinds.push(ResourceKind::WarpDevices);
    }
    if all || cli.apps {
        kinds.push(ResourceKind::AccessApps);
    }
    if all || cli.gateway {
        kinds.push(ResourceKind::Gateway);
    }
    if cli.analytics {
        kinds.push(ResourceKind::Analytics);
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["cfagent", "--api-token=tok"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    const ALL_ELEVEN: [ResourceKind; 11] = [
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
    ];

    #[test]
    fn test_no_flags_enables_all_eleven_kinds() {
        let config = AgentConfig::from_cli(parse(&[])).unwrap();
        assert_eq!(config.kinds, ALL_ELEVEN);
    }

    #[test]
    fn test_all_flag_equals_no_flags() {
        let explicit_all = AgentConfig::from_cli(parse(&["--all"])).unwrap();
        let implied_all = AgentConfig::from_cli(parse(&[])).unwrap();
        assert_eq!(explicit_all.kinds, implied_all.kinds);
    }

    #[test]
    fn test_single_flag_selects_one_kind() {
        let config = AgentConfig::from_cli(parse(&["--dns"])).unwrap();
        assert_eq!(config.kinds, vec![ResourceKind::Dns]);
    }

    #[test]
    fn test_workers_pages_flag_selects_both_kinds() {
        let config = AgentConfig::from_cli(parse(&["--workers-pages"])).unwrap();
        assert_eq!(
            config.kinds,
            vec![ResourceKind::Workers, ResourceKind::Pages]
        );
    }

    #[test]
    fn test_kinds_follow_section_priority_order() {
        let config = AgentConfig::from_cli(parse(&["--gateway", "--dns", "--d1"])).unwrap();
        assert_eq!(
            config.kinds,
            vec![ResourceKind::Dns, ResourceKind::D1, ResourceKind::Gateway]
        );
    }

    #[test]
    fn test_analytics_needs_explicit_flag() {
        let config = AgentConfig::from_cli(parse(&["--all"])).unwrap();
        assert!(!config.kinds.contains(&ResourceKind::Analytics));

        let config = AgentConfig::from_cli(parse(&["--analytics"])).unwrap();
        assert_eq!(config.kinds, vec![ResourceKind::Analytics]);
    }

    #[test]
    fn test_timeout_becomes_deadline_duration() {
        let config = AgentConfig::from_cli(parse(&["-t", "5"])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_credentials_fail_before_any_network_use() {
        let cli = Cli::parse_from(["cfagent", "--dns"]);
        // No token, no key pair: must fail during config construction.
        let result = AgentConfig::from_cli(Cli {
            api_token: None,
            api_key: None,
            email: None,
            ..cli
        });
        assert!(matches!(result, Err(AgentError::AuthConfig(_))));
    }
}
