use async_trait::async_trait;

use crate::api::FetchError;
use crate::api::types::PagesProject;
use crate::record::{MetricRecord, ResourceKind};

use super::{FetchContext, Fetcher};

pub struct PagesFetcher;

#[async_trait]
impl Fetcher for PagesFetcher {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Pages
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<MetricRecord>, FetchError> {
        let account_id = ctx.job.account()?;
        let projects: Vec<PagesProject> = ctx
            .client
            .get_json(
                &ctx.policy,
                &format!("/accounts/{}/pages/projects", account_id),
            )
            .await?
            .unwrap_or_default();

        let mut records = vec![MetricRecord::count(
            &[],
            "projects_total",
            projects.len() as u64,
        )];

        for project in &projects {
            let name = project.name.as_deref().unwrap_or("unknown");
            let path = ["project", name];

            if let Some(id) = &project.id {
                records.push(MetricRecord::text(&path, "id", id));
            }
            if let Some(created_on) = &project.created_on {
                records.push(MetricRecord::text(&path, "created_on", created_on));
            }
            if let Some(production_branch) = &project.production_branch {
                records.push(MetricRecord::text(&path, "production_branch", production_branch));
            }
            if let Some(deployment) = &project.latest_deployment {
                if let Some(id) = &deployment.id {
                    records.push(MetricRecord::text(&path, "latest_deployment_id", id));
                }
                if let Some(status) = deployment
                    .latest_stage
                    .as_ref()
                    .and_then(|stage| stage.status.as_deref())
                {
                    records.push(MetricRecord::text(&path, "latest_deployment_status", status));
                }
            }
            if let Some(domains) = &project.domains {
                records.push(MetricRecord::count(
                    &path,
                    "domains_count",
                    domains.len() as u64,
                ));
            }
            if let Some(build_command) = project
                .build_config
                .as_ref()
                .and_then(|config| config.build_command.as_deref())
                .filter(|command| !command.is_empty())
            {
                records.push(MetricRecord::text(&path, "build_command", build_command));
            }
        }

        Ok(records)
    }
}
