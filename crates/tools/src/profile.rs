use async_trait::async_trait;
use phantomlink_core::{render, Result};
use phantomlink_agents::profile::{ProfileScraper, SalesNavigatorSearch};
use serde_json::{json, Value};

use crate::{
    agent_for, credentials_or_reply, markdown_all, opt_u32, project_all, require_url, Tool,
    ToolContext, ToolSchema,
};

/// Scrape one LinkedIn profile page.
pub struct ScrapeProfileTool;

#[async_trait]
impl Tool for ScrapeProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_profile",
            description: "Scrape a LinkedIn profile (name, headline, location, experience, skills). Takes the profile URL as input.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "linkedin_url": {
                        "type": "string",
                        "description": "Profile URL, e.g. https://www.linkedin.com/in/someone/"
                    }
                },
                "required": ["linkedin_url"]
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        require_url(params, "linkedin_url").map(|_| ())
    }

    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value> {
        let credentials = match credentials_or_reply(&ctx) {
            Ok(credentials) => credentials,
            Err(reply) => return Ok(reply),
        };
        let linkedin_url = require_url(&params, "linkedin_url")?.to_string();

        let mut agent = agent_for(&ctx, credentials);
        let (profile, success) = agent.run(&ProfileScraper, linkedin_url).await?;

        match profile.flatten() {
            Some(profile) => Ok(json!({
                "success": success,
                "profile": render::to_projection(&profile, false),
                "markdown": render::to_markdown(&profile, 0, false),
            })),
            None => Ok(json!({ "success": success, "profile": Value::Null })),
        }
    }
}

/// Export profiles matching a Sales Navigator search.
pub struct SearchSalesNavigatorTool;

#[async_trait]
impl Tool for SearchSalesNavigatorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_sales_navigator",
            description: "Export profiles matching a Sales Navigator search URL. Returns thin profile rows (no skills or job history).",
            parameters: json!({
                "type": "object",
                "properties": {
                    "search_url": {
                        "type": "string",
                        "description": "Sales Navigator search URL"
                    },
                    "nb_results": {
                        "type": "integer",
                        "description": "Results to export per search, default 20"
                    }
                },
                "required": ["search_url"]
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        require_url(params, "search_url").map(|_| ())
    }

    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value> {
        let credentials = match credentials_or_reply(&ctx) {
            Ok(credentials) => credentials,
            Err(reply) => return Ok(reply),
        };
        let search_url = require_url(&params, "search_url")?.to_string();
        let search = SalesNavigatorSearch {
            nb_results: opt_u32(&params, "nb_results", 20),
        };

        let mut agent = agent_for(&ctx, credentials);
        let (profiles, success) = agent.run(&search, search_url).await?;
        let profiles = profiles.unwrap_or_default();

        Ok(json!({
            "success": success,
            "count": profiles.len(),
            "profiles": project_all(&profiles),
            "markdown": markdown_all(&profiles),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_error_reply, ctx_without_credentials};

    #[test]
    fn test_validate_requires_http_url() {
        let tool = ScrapeProfileTool;
        assert!(tool
            .validate(&json!({"linkedin_url": "https://www.linkedin.com/in/ann/"}))
            .is_ok());
        assert!(tool.validate(&json!({"linkedin_url": "ann"})).is_err());
        assert!(tool.validate(&json!({})).is_err());
        assert!(tool.validate(&json!({"linkedin_url": ""})).is_err());
    }

    #[tokio::test]
    async fn test_missing_credentials_yield_error_dictionary() {
        let reply = ScrapeProfileTool
            .execute(
                ctx_without_credentials(),
                json!({"linkedin_url": "https://www.linkedin.com/in/ann/"}),
            )
            .await
            .unwrap();
        assert_error_reply(&reply);
    }

    #[test]
    fn test_search_validate() {
        let tool = SearchSalesNavigatorTool;
        assert!(tool
            .validate(&json!({"search_url": "https://www.linkedin.com/sales/search/people"}))
            .is_ok());
        assert!(tool.validate(&json!({"nb_results": 5})).is_err());
    }
}
