use async_trait::async_trait;
use phantomlink_core::{render, Result};
use phantomlink_agents::company::CompanyScraper;
use serde_json::{json, Value};

use crate::{agent_for, credentials_or_reply, require_url, Tool, ToolContext, ToolSchema};

/// Scrape one LinkedIn company page.
pub struct ScrapeCompanyTool;

#[async_trait]
impl Tool for ScrapeCompanyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_company",
            description: "Scrape a LinkedIn company page (name, industry, size, revenue bands, growth). Takes the company URL as input.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "linkedin_url": {
                        "type": "string",
                        "description": "Company URL, e.g. https://www.linkedin.com/company/initech/"
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
        let (company, success) = agent.run(&CompanyScraper, linkedin_url).await?;

        match company.flatten() {
            Some(company) => Ok(json!({
                "success": success,
                "company": render::to_projection(&company, false),
                "markdown": render::to_markdown(&company, 0, false),
            })),
            None => Ok(json!({ "success": success, "company": Value::Null })),
        }
    }
}
