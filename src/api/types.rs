use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Standard v4 API envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorBody>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl<T> ApiResponse<T> {
    pub fn error_message(&self) -> String {
        self.errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "unknown API error".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[allow(dead_code)] // NOTE: Used for error logging
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResultInfo {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_count: Option<u32>,
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Cursors {
    pub after: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub id: String,
}

/// `/zones/{id}/settings/{setting}` result; only the value matters here.
#[derive(Debug, Deserialize)]
pub struct ZoneSetting {
    pub value: Option<String>,
}

/// `/zones/{id}/analytics/dashboard` result. Older responses carry a
/// `timeseries` array, newer ones aggregate under `totals`.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub totals: Option<DashboardTotals>,
    #[serde(default)]
    pub timeseries: Vec<DashboardTotals>,
}

impl DashboardData {
    /// The latest data point: first timeseries entry, else the totals.
    pub fn latest(self) -> Option<DashboardTotals> {
        let DashboardData {
            totals,
            mut timeseries,
        } = self;
        if timeseries.is_empty() {
            totals
        } else {
            Some(timeseries.remove(0))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardTotals {
    #[serde(default)]
    pub requests: RequestCounts,
    #[serde(default)]
    pub bandwidth: BandwidthCounts,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestCounts {
    #[serde(default)]
    pub all: u64,
    #[serde(default)]
    pub cached: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct BandwidthCounts {
    #[serde(default)]
    pub all: u64,
}

#[derive(Debug, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

/// `/zones/{id}/security/events` result.
#[derive(Debug, Default, Deserialize)]
pub struct SecurityEvents {
    #[serde(default)]
    pub events: Vec<SecurityEvent>,
}

#[derive(Debug, Deserialize)]
pub struct SecurityEvent {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkerScript {
    pub id: Option<String>,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
    pub usage_model: Option<String>,
    pub etag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PagesProject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub created_on: Option<String>,
    pub production_branch: Option<String>,
    pub latest_deployment: Option<PagesDeployment>,
    pub domains: Option<Vec<String>>,
    pub build_config: Option<PagesBuildConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PagesDeployment {
    pub id: Option<String>,
    pub latest_stage: Option<PagesDeploymentStage>,
}

#[derive(Debug, Deserialize)]
pub struct PagesDeploymentStage {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct D1Database {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub file_size: Option<u64>,
    pub created_at: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PagesBuildConfig {
    pub build_command: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SecretsStore {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WarpDevice {
    pub id: Option<String>,
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub os_version: Option<String>,
    pub last_seen_at: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct AccessApp {
    pub id: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub policies: Vec<serde_json::Value>,
    #[serde(default)]
    pub destinations: Vec<serde_json::Value>,
    #[serde(default)]
    pub allowed_idps: Vec<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GatewayAccount {
    pub id: Option<String>,
    pub provider_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GatewayRule {
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "success": true,
            "errors": [],
            "result": [{"id": "zone123", "name": "example.com"}],
            "result_info": {"page": 1, "per_page": 50, "total_count": 1}
        }"#;

        let response: ApiResponse<Vec<Zone>> = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let result = response.result.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "zone123");
        assert_eq!(result[0].name, "example.com");
        assert_eq!(response.result_info.unwrap().total_count, Some(1));
    }

    #[test]
    fn test_envelope_with_errors() {
        let json = r#"{
            "success": false,
            "errors": [{"code": 10000, "message": "Authentication error"}],
            "result": null
        }"#;

        let response: ApiResponse<Vec<Zone>> = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.result.is_none());
        assert_eq!(response.error_message(), "Authentication error");
    }

    #[test]
    fn test_envelope_error_message_fallback() {
        let json = r#"{"success": false, "errors": [], "result": null}"#;
        let response: ApiResponse<Vec<Zone>> = serde_json::from_str(json).unwrap();
        assert_eq!(response.error_message(), "unknown API error");
    }

    #[test]
    fn test_cursor_deserialization() {
        let json = r#"{
            "success": true,
            "errors": [],
            "result": [],
            "result_info": {"cursors": {"after": "next_cursor"}}
        }"#;

        let response: ApiResponse<Vec<WarpDevice>> = serde_json::from_str(json).unwrap();
        let cursors = response.result_info.unwrap().cursors.unwrap();
        assert_eq!(cursors.after, Some("next_cursor".to_string()));
    }

    #[test]
    fn test_dns_record_type_rename() {
        let json = r#"{
            "id": "rec1",
            "name": "api.example.com",
            "type": "A",
            "content": "198.51.100.4",
            "ttl": 3600
        }"#;

        let record: DnsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_type, Some("A".to_string()));
    }

    #[test]
    fn test_dns_record_missing_type() {
        let record: DnsRecord = serde_json::from_str(r#"{"id": "rec1"}"#).unwrap();
        assert_eq!(record.record_type, None);
    }

    #[test]
    fn test_dashboard_latest_prefers_timeseries() {
        let json = r#"{
            "totals": {"requests": {"all": 100, "cached": 10}, "bandwidth": {"all": 1000}},
            "timeseries": [{"requests": {"all": 40, "cached": 20}, "bandwidth": {"all": 400}}]
        }"#;

        let data: DashboardData = serde_json::from_str(json).unwrap();
        let latest = data.latest().unwrap();
        assert_eq!(latest.requests.all, 40);
        assert_eq!(latest.requests.cached, 20);
        assert_eq!(latest.bandwidth.all, 400);
    }

    #[test]
    fn test_dashboard_latest_falls_back_to_totals() {
        let json = r#"{"totals": {"requests": {"all": 7, "cached": 3}}}"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        let latest = data.latest().unwrap();
        assert_eq!(latest.requests.all, 7);
        assert_eq!(latest.bandwidth.all, 0);
    }

    #[test]
    fn test_warp_device_deleted_defaults_false() {
        let device: WarpDevice =
            serde_json::from_str(r#"{"id": "dev1", "name": "laptop"}"#).unwrap();
        assert!(!device.deleted);
        assert_eq!(device.last_seen_at, None);
    }

    #[test]
    fn test_access_app_count_fields_default_empty() {
        let app: AccessApp = serde_json::from_str(r#"{"id": "app1"}"#).unwrap();
        assert!(app.policies.is_empty());
        assert!(app.destinations.is_empty());
        assert!(app.allowed_idps.is_empty());
        assert!(app.tags.is_empty());
    }

    #[test]
    fn test_security_events_default_empty() {
        let events: SecurityEvents = serde_json::from_str(r#"{}"#).unwrap();
        assert!(events.events.is_empty());
    }

    #[test]
    fn test_pages_project_nested_deployment() {
        let json = r#"{
            "id": "proj1",
            "name": "marketing-site",
            "production_branch": "main",
            "latest_deployment": {"id": "dep9", "latest_stage": {"status": "success"}},
            "domains": ["www.example.com", "example.com"]
        }"#;

        let project: PagesProject = serde_json::from_str(json).unwrap();
        let deployment = project.latest_deployment.unwrap();
        assert_eq!(deployment.id, Some("dep9".to_string()));
        assert_eq!(
            deployment.latest_stage.unwrap().status,
            Some("success".to_string())
        );
        assert_eq!(project.domains.unwrap().len(), 2);
    }
}
