//! Callable tool surface over the scraping operations.
//!
//! Each tool validates its JSON parameters, resolves credentials from the
//! [`ToolContext`], and drives one agent lifecycle. Missing credentials are a
//! user-facing condition, reported as an `{error, message}` dictionary rather
//! than an `Err`, so hosts can relay them verbatim.

pub mod activities;
pub mod company;
pub mod connections;
pub mod messages;
pub mod profile;
pub mod registry;

use std::time::Duration;

use async_trait::async_trait;
use phantomlink_core::record::Record;
use phantomlink_core::{render, Config, Credentials, Error, Result};
use phantomlink_agents::{PhantomAgent, RetryPolicy};
use serde_json::{json, Value};

pub use registry::ToolRegistry;

#[derive(Clone, Default)]
pub struct ToolContext {
    pub config: Config,
}

pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn schema(&self) -> ToolSchema;
    fn validate(&self, params: &Value) -> Result<()>;
    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value>;
}

pub(crate) fn error_reply(message: &str) -> Value {
    json!({ "error": true, "message": message })
}

/// Resolve the credential set or produce the error dictionary the tool
/// returns instead of failing.
pub(crate) fn credentials_or_reply(ctx: &ToolContext) -> std::result::Result<Credentials, Value> {
    ctx.config
        .credentials()
        .map_err(|err| error_reply(&err.to_string()))
}

pub(crate) fn agent_for(ctx: &ToolContext, credentials: Credentials) -> PhantomAgent {
    PhantomAgent::new(credentials).with_policy(RetryPolicy::new(
        ctx.config.max_retries,
        Duration::from_secs(ctx.config.retry_delay_secs),
    ))
}

pub(crate) fn require_str<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Validation(format!("Missing required parameter: {key}")))
}

pub(crate) fn require_url<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    let url = require_str(params, key)?;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::Validation(format!(
            "{key} must start with http:// or https://"
        )));
    }
    Ok(url)
}

pub(crate) fn opt_u32(params: &Value, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n as u32)
        .unwrap_or(default)
}

pub(crate) fn project_all<R: Record>(records: &[R]) -> Vec<Value> {
    records
        .iter()
        .map(|record| render::to_projection(record, false))
        .collect()
}

pub(crate) fn markdown_all<R: Record>(records: &[R]) -> String {
    records
        .iter()
        .map(|record| render::to_markdown(record, 0, false))
        .collect::<Vec<_>>()
        .join("\n\n")
}
