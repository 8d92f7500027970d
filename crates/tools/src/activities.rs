use async_trait::async_trait;
use phantomlink_core::{Error, Result};
use phantomlink_agents::activities::ActivityExtractor;
use serde_json::{json, Value};

use crate::{
    agent_for, credentials_or_reply, markdown_all, opt_u32, project_all, require_url, Tool,
    ToolContext, ToolSchema,
};

/// Scrape recent posts and articles from a profile.
pub struct ScrapeActivitiesTool;

#[async_trait]
impl Tool for ScrapeActivitiesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_activities",
            description: "Scrape recent activities (posts, articles) from a LinkedIn profile, with like/comment/repost counts.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "linkedin_url": {
                        "type": "string",
                        "description": "Profile URL whose activity feed to scrape"
                    },
                    "max_posts": {
                        "type": "integer",
                        "description": "Maximum number of activities to fetch, default 20"
                    },
                    "kinds": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Activity kinds to scrape, default [\"Post\", \"Article\"]"
                    },
                    "date_after_days": {
                        "type": "integer",
                        "description": "Only keep activities newer than this many days"
                    }
                },
                "required": ["linkedin_url"]
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        require_url(params, "linkedin_url")?;
        if let Some(days) = params.get("date_after_days").and_then(Value::as_i64) {
            if days < 1 {
                return Err(Error::Validation(
                    "date_after_days must be at least 1".to_string(),
                ));
            }
        }
        if let Some(kinds) = params.get("kinds") {
            let all_strings = kinds
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false);
            if !all_strings {
                return Err(Error::Validation(
                    "kinds must be an array of strings".to_string(),
                ));
            }
        }
        Ok(())
    }

    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value> {
        let credentials = match credentials_or_reply(&ctx) {
            Ok(credentials) => credentials,
            Err(reply) => return Ok(reply),
        };
        let linkedin_url = require_url(&params, "linkedin_url")?.to_string();

        let mut extractor = ActivityExtractor {
            max_posts: opt_u32(&params, "max_posts", 20),
            date_after_days: params.get("date_after_days").and_then(Value::as_i64),
            ..ActivityExtractor::default()
        };
        if let Some(kinds) = params.get("kinds").and_then(Value::as_array) {
            extractor.kinds = kinds
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }

        let mut agent = agent_for(&ctx, credentials);
        let (activities, success) = agent.run(&extractor, linkedin_url).await?;
        let activities = activities.unwrap_or_default();

        Ok(json!({
            "success": success,
            "count": activities.len(),
            "activities": project_all(&activities),
            "markdown": markdown_all(&activities),
        }))
    }
}
