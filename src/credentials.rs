use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::error::AgentError;

/// The two supported authentication modes, normalized into a single value.
/// Exactly one mode is ever active; API token wins when both are complete.
#[derive(Clone)]
pub enum CredentialSet {
    ApiToken { token: String },
    ApiKey { email: String, key: String },
}

impl CredentialSet {
    /// Pure validation of the raw CLI strings. No network access.
    pub fn resolve(
        email: Option<String>,
        key: Option<String>,
        token: Option<String>,
    ) -> Result<Self, AgentError> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            return Ok(Self::ApiToken { token });
        }

        match (email, key) {
            (Some(email), Some(key)) if !email.is_empty() && !key.is_empty() => {
                Ok(Self::ApiKey { email, key })
            }
            (Some(_), None) | (None, Some(_)) => Err(AgentError::AuthConfig(
                "API key mode requires both --email and --api-key".to_string(),
            )),
            _ => Err(AgentError::AuthConfig(
                "either --api-token or --email plus --api-key must be provided".to_string(),
            )),
        }
    }

    /// Header set sent with every outbound call.
    pub fn header_map(&self) -> Result<HeaderMap, AgentError> {
        let mut headers = HeaderMap::new();
        match self {
            Self::ApiToken { token } => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| AgentError::AuthConfig("invalid token format".to_string()))?;
                headers.insert(AUTHORIZATION, value);
            }
            Self::ApiKey { email, key } => {
                let email = HeaderValue::from_str(email)
                    .map_err(|_| AgentError::AuthConfig("invalid email format".to_string()))?;
                let key = HeaderValue::from_str(key)
                    .map_err(|_| AgentError::AuthConfig("invalid API key format".to_string()))?;
                headers.insert(HeaderName::from_static("x-auth-email"), email);
                headers.insert(HeaderName::from_static("x-auth-key"), key);
            }
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiToken { .. } => f
                .debug_struct("ApiToken")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::ApiKey { email, .. } => f
                .debug_struct("ApiKey")
                .field("email", email)
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_mode() {
        let creds = CredentialSet::resolve(None, None, Some("tok123".to_string())).unwrap();
        assert!(matches!(creds, CredentialSet::ApiToken { ref token } if token == "tok123"));
    }

    #[test]
    fn test_resolve_api_key_mode() {
        let creds = CredentialSet::resolve(
            Some("ops@example.com".to_string()),
            Some("key456".to_string()),
            None,
        )
        .unwrap();
        match creds {
            CredentialSet::ApiKey { email, key } => {
                assert_eq!(email, "ops@example.com");
                assert_eq!(key, "key456");
            }
            _ => panic!("expected ApiKey mode"),
        }
    }

    #[test]
    fn test_resolve_token_wins_over_complete_key_pair() {
        let creds = CredentialSet::resolve(
            Some("ops@example.com".to_string()),
            Some("key456".to_string()),
            Some("tok123".to_string()),
        )
        .unwrap();
        assert!(matches!(creds, CredentialSet::ApiToken { .. }));
    }

    #[test]
    fn test_resolve_nothing_given_is_error() {
        let result = CredentialSet::resolve(None, None, None);
        assert!(matches!(result, Err(AgentError::AuthConfig(_))));
    }

    #[test]
    fn test_resolve_email_without_key_is_error() {
        let result = CredentialSet::resolve(Some("ops@example.com".to_string()), None, None);
        assert!(matches!(result, Err(AgentError::AuthConfig(_))));
    }

    #[test]
    fn test_resolve_key_without_email_is_error() {
        let result = CredentialSet::resolve(None, Some("key456".to_string()), None);
        assert!(matches!(result, Err(AgentError::AuthConfig(_))));
    }

    #[test]
    fn test_resolve_empty_token_falls_through() {
        let result = CredentialSet::resolve(None, None, Some(String::new()));
        assert!(matches!(result, Err(AgentError::AuthConfig(_))));
    }

    #[test]
    fn test_token_header_map() {
        let creds = CredentialSet::ApiToken {
            token: "tok123".to_string(),
        };
        let headers = creds.header_map().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok123");
    }

    #[test]
    fn test_api_key_header_map() {
        let creds = CredentialSet::ApiKey {
            email: "ops@example.com".to_string(),
            key: "key456".to_string(),
        };
        let headers = creds.header_map().unwrap();
        assert_eq!(headers.get("x-auth-email").unwrap(), "ops@example.com");
        assert_eq!(headers.get("x-auth-key").unwrap(), "key456");
    }

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let creds = CredentialSet::ApiToken {
            token: "super_secret_token_12345".to_string(),
        };
        let debug_output = format!("{:?}", creds);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_12345"));

        let creds = CredentialSet::ApiKey {
            email: "ops@example.com".to_string(),
            key: "super_secret_key_67890".to_string(),
        };
        let debug_output = format!("{:?}", creds);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key_67890"));
    }
}
