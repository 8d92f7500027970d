use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

/// PhantomBuster API key, also sent on every lifecycle request.
pub const ENV_API_KEY: &str = "PHANTOMBUSTER_API_KEY";
/// LinkedIn `li_at` session cookie forwarded to the scraping scripts.
pub const ENV_SESSION_COOKIE: &str = "LINKEDIN_COOKIE_LI";
/// Browser identity string matching the session the cookie came from.
pub const ENV_BROWSER_AGENT: &str = "LINKEDIN_BROWSER_AGENT";

const ENV_MAX_RETRIES: &str = "PHANTOMLINK_MAX_RETRIES";
const ENV_RETRY_DELAY_SECS: &str = "PHANTOMLINK_RETRY_DELAY_SECS";

fn default_max_retries() -> u32 {
    20
}

fn default_retry_delay_secs() -> u64 {
    10
}

/// Credential set required by every scraping operation.
///
/// Kept separate from [`Config`] so that callers holding a `Credentials`
/// have already passed the missing-variable check.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub session_cookie: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub phantombuster_api_key: Option<String>,
    pub linkedin_session_cookie: Option<String>,
    pub linkedin_browser_agent: Option<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phantombuster_api_key: None,
            linkedin_session_cookie: None,
            linkedin_browser_agent: None,
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Build a config from the process environment. Empty values count as absent.
    pub fn from_env() -> Self {
        let max_retries = non_empty_var(ENV_MAX_RETRIES)
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_retries);
        let retry_delay_secs = non_empty_var(ENV_RETRY_DELAY_SECS)
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_retry_delay_secs);

        Self {
            phantombuster_api_key: non_empty_var(ENV_API_KEY),
            linkedin_session_cookie: non_empty_var(ENV_SESSION_COOKIE),
            linkedin_browser_agent: non_empty_var(ENV_BROWSER_AGENT),
            max_retries,
            retry_delay_secs,
        }
    }

    /// Resolve the credential set, naming every missing variable at once so the
    /// user can fix their environment in one pass.
    pub fn credentials(&self) -> Result<Credentials> {
        let mut missing = Vec::new();
        if self.phantombuster_api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.linkedin_session_cookie.is_none() {
            missing.push(ENV_SESSION_COOKIE);
        }
        if self.linkedin_browser_agent.is_none() {
            missing.push(ENV_BROWSER_AGENT);
        }
        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Credentials {
            api_key: self.phantombuster_api_key.clone().unwrap_or_default(),
            session_cookie: self.linkedin_session_cookie.clone().unwrap_or_default(),
            user_agent: self.linkedin_browser_agent.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_reports_all_missing_vars() {
        let config = Config::default();
        let err = config.credentials().unwrap_err();
        let message = err.to_string();
        assert!(message.contains(ENV_API_KEY));
        assert!(message.contains(ENV_SESSION_COOKIE));
        assert!(message.contains(ENV_BROWSER_AGENT));
    }

    #[test]
    fn test_credentials_resolved_when_all_present() {
        let config = Config {
            phantombuster_api_key: Some("pb-key".to_string()),
            linkedin_session_cookie: Some("li_at=abc".to_string()),
            linkedin_browser_agent: Some("Mozilla/5.0".to_string()),
            ..Config::default()
        };
        let creds = config.credentials().unwrap();
        assert_eq!(creds.api_key, "pb-key");
        assert_eq!(creds.session_cookie, "li_at=abc");
        assert_eq!(creds.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_default_retry_policy() {
        let config = Config::default();
        assert_eq!(config.max_retries, 20);
        assert_eq!(config.retry_delay_secs, 10);
    }
}
