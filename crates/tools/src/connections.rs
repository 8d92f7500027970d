use async_trait::async_trait;
use phantomlink_core::{Error, Result};
use phantomlink_agents::connections::{ConnectionsExport, ConnectionsQuery};
use serde_json::{json, Value};

use crate::{
    agent_for, credentials_or_reply, markdown_all, opt_u32, project_all, Tool, ToolContext,
    ToolSchema,
};

/// Export first-degree connections.
pub struct ExportConnectionsTool;

#[async_trait]
impl Tool for ExportConnectionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "export_connections",
            description: "Export first-degree LinkedIn connections with name, title and connection date.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "count_to_scrape": {
                        "type": "integer",
                        "description": "Number of connections to export, default 100"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort order, default 'Recently added'"
                    }
                }
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        if let Some(count) = params.get("count_to_scrape").and_then(Value::as_i64) {
            if count < 1 {
                return Err(Error::Validation(
                    "count_to_scrape must be at least 1".to_string(),
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
        let query = ConnectionsQuery {
            count: opt_u32(&params, "count_to_scrape", 100),
            sort: params
                .get("sort")
                .and_then(Value::as_str)
                .unwrap_or("Recently added")
                .to_string(),
        };

        let mut agent = agent_for(&ctx, credentials);
        let (connections, success) = agent.run(&ConnectionsExport, query).await?;
        let connections = connections.unwrap_or_default();

        Ok(json!({
            "success": success,
            "count": connections.len(),
            "connections": project_all(&connections),
            "markdown": markdown_all(&connections),
        }))
    }
}
