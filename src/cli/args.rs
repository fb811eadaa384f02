use clap::Parser;

/// Collect Cloudflare resource metrics and emit monitoring sections on stdout.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Account email (API key mode)
    #[arg(long, env = "CLOUDFLARE_EMAIL")]
    pub email: Option<String>,

    /// Global API key (requires --email)
    #[arg(long, env = "CLOUDFLARE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API token (alternative to --email/--api-key)
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Account ID for account-scoped resources; auto-detected when omitted
    #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Overall collection deadline in seconds
    #[arg(long, short = 't', default_value_t = 30)]
    pub timeout: u64,

    /// Fetch CDN/Cache settings and analytics
    #[arg(long)]
    pub cdn_cache: bool,

    /// Fetch DNS records
    #[arg(long)]
    pub dns: bool,

    /// Fetch SSL/TLS settings
    #[arg(long)]
    pub ssl_tls: bool,

    /// Fetch firewall/WAF events
    #[arg(long)]
    pub firewall: bool,

    /// Fetch Worker scripts and Pages projects
    #[arg(long)]
    pub workers_pages: bool,

    /// Fetch D1 databases
    #[arg(long)]
    pub d1: bool,

    /// Fetch secrets stores
    #[arg(long)]
    pub secrets: bool,

    /// List WARP devices
    #[arg(long)]
    pub devices: bool,

    /// List Access applications
    #[arg(long)]
    pub apps: bool,

    /// Fetch Zero Trust gateway configuration and rules
    #[arg(long)]
    pub gateway: bool,

    /// Fetch Cloudflare One analytics (not exposed by the REST API)
    #[arg(long)]
    pub analytics: bool,

    /// Fetch all resource kinds
    #[arg(long)]
    pub all: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
