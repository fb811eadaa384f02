use crate::api::types::{Account, Zone};
use crate::api::{ApiClient, FetchError};
use crate::error::AgentError;
use crate::retry::RetryPolicy;

/// Lists the zones visible to the credential and resolves the account id
/// before any fetcher runs. Results are cached by the caller for the rest
/// of the run; discovery failures are run-fatal once the retry policy is
/// exhausted.
pub struct Discoverer<'a> {
    client: &'a ApiClient,
    policy: &'a RetryPolicy,
}

impl<'a> Discoverer<'a> {
    pub fn new(client: &'a ApiClient, policy: &'a RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub async fn zones(&self) -> Result<Vec<Zone>, AgentError> {
        let zones: Vec<Zone> = self
            .client
            .get_paged(self.policy, "/zones")
            .await
            .map_err(fatal)?;
        tracing::debug!(count = zones.len(), "discovered zones");
        Ok(zones)
    }

    /// Explicit account id wins; otherwise the first account visible to
    /// the credential.
    pub async fn account_id(&self, explicit: Option<&str>) -> Result<String, AgentError> {
        if let Some(account_id) = explicit {
            return Ok(account_id.to_string());
        }

        let accounts: Vec<Account> = self
            .client
            .get_paged(self.policy, "/accounts")
            .await
            .map_err(fatal)?;

        match accounts.into_iter().next() {
            Some(account) => {
                tracing::debug!(account_id = %account.id, "auto-detected account");
                Ok(account.id)
            }
            None => Err(AgentError::Discovery(
                "no account visible to credential".to_string(),
            )),
        }
    }
}

fn fatal(err: FetchError) -> AgentError {
    match err {
        FetchError::AuthRejected { .. } => AgentError::AuthRejected(err.to_string()),
        other => AgentError::Discovery(other.to_string()),
    }
}
