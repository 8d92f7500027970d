use async_trait::async_trait;
use phantomlink_core::{Error, Result};
use phantomlink_agents::messages::{
    InboxQuery, InboxScraper, MessageSender, OutboundMessage, ThreadScraper, INBOX_FILTERS,
    MESSAGE_CONTROLS,
};
use serde_json::{json, Value};

use crate::{
    agent_for, credentials_or_reply, markdown_all, opt_u32, project_all, require_str, require_url,
    Tool, ToolContext, ToolSchema,
};

/// Scrape the latest inbox threads.
pub struct ScrapeInboxTool;

#[async_trait]
impl Tool for ScrapeInboxTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_inbox",
            description: "Scrape LinkedIn inbox threads. Returns one row per conversation with the last message and its author.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "count_to_scrape": {
                        "type": "integer",
                        "description": "Number of threads to fetch, default 10"
                    },
                    "inbox_filter": {
                        "type": "string",
                        "enum": INBOX_FILTERS,
                        "description": "Thread filter, default 'all'"
                    }
                }
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        if let Some(filter) = params.get("inbox_filter").and_then(Value::as_str) {
            if !INBOX_FILTERS.contains(&filter) {
                return Err(Error::Validation(format!(
                    "Invalid inbox_filter: {filter}"
                )));
            }
        }
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
        let query = InboxQuery {
            count: opt_u32(&params, "count_to_scrape", 10),
            filter: params
                .get("inbox_filter")
                .and_then(Value::as_str)
                .unwrap_or("all")
                .to_string(),
        };

        let mut agent = agent_for(&ctx, credentials);
        let (threads, success) = agent.run(&InboxScraper, query).await?;
        let threads = threads.unwrap_or_default();

        Ok(json!({
            "success": success,
            "count": threads.len(),
            "threads": project_all(&threads),
            "markdown": markdown_all(&threads),
        }))
    }
}

/// Scrape all messages from one conversation thread.
pub struct ScrapeThreadTool;

#[async_trait]
impl Tool for ScrapeThreadTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "scrape_thread",
            description: "Scrape all messages from a LinkedIn conversation thread. Takes the thread URL as input.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "thread_url": {
                        "type": "string",
                        "description": "Thread URL from the inbox"
                    }
                },
                "required": ["thread_url"]
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        require_url(params, "thread_url").map(|_| ())
    }

    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value> {
        let credentials = match credentials_or_reply(&ctx) {
            Ok(credentials) => credentials,
            Err(reply) => return Ok(reply),
        };
        let thread_url = require_url(&params, "thread_url")?.to_string();

        let mut agent = agent_for(&ctx, credentials);
        let (messages, success) = agent.run(&ThreadScraper, thread_url).await?;
        let messages = messages.unwrap_or_default();

        Ok(json!({
            "success": success,
            "count": messages.len(),
            "messages": project_all(&messages),
            "markdown": markdown_all(&messages),
        }))
    }
}

/// Send a message to a profile.
pub struct SendMessageTool;

#[async_trait]
impl Tool for SendMessageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "send_message",
            description: "Send a LinkedIn message to a profile. message_control gates sending on the conversation state (e.g. only if the last message was theirs).",
            parameters: json!({
                "type": "object",
                "properties": {
                    "linkedin_url": {
                        "type": "string",
                        "description": "Recipient profile URL"
                    },
                    "message": {
                        "type": "string",
                        "description": "Message text to send"
                    },
                    "message_control": {
                        "type": "string",
                        "enum": MESSAGE_CONTROLS,
                        "description": "Sending guard, default 'none'"
                    }
                },
                "required": ["linkedin_url", "message"]
            }),
        }
    }

    fn validate(&self, params: &Value) -> Result<()> {
        require_url(params, "linkedin_url")?;
        require_str(params, "message")?;
        if let Some(control) = params.get("message_control").and_then(Value::as_str) {
            if !MESSAGE_CONTROLS.contains(&control) {
                return Err(Error::Validation(format!(
                    "Invalid message_control: {control}"
                )));
            }
        }
        Ok(())
    }

    async fn execute(&self, ctx: ToolContext, params: Value) -> Result<Value> {
        let credentials = match credentials_or_reply(&ctx) {
            Ok(credentials) => credentials,
            Err(reply) => return Ok(reply),
        };
        let mut outbound = OutboundMessage::new(
            require_url(&params, "linkedin_url")?,
            require_str(&params, "message")?,
        );
        if let Some(control) = params.get("message_control").and_then(Value::as_str) {
            outbound.message_control = control.to_string();
        }

        let mut agent = agent_for(&ctx, credentials);
        let (status, success) = agent.run(&MessageSender, outbound).await?;

        Ok(json!({
            "success": success,
            "status": status.flatten(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_error_reply, ctx_without_credentials};

    #[test]
    fn test_inbox_validate_filter_and_count() {
        let tool = ScrapeInboxTool;
        assert!(tool.validate(&json!({})).is_ok());
        assert!(tool.validate(&json!({"inbox_filter": "unread"})).is_ok());
        assert!(tool.validate(&json!({"inbox_filter": "starred"})).is_err());
        assert!(tool.validate(&json!({"count_to_scrape": 0})).is_err());
        assert!(tool.validate(&json!({"count_to_scrape": 25})).is_ok());
    }

    #[test]
    fn test_thread_validate() {
        let tool = ScrapeThreadTool;
        assert!(tool
            .validate(&json!({"thread_url": "https://www.linkedin.com/messaging/thread/1/"}))
            .is_ok());
        assert!(tool.validate(&json!({})).is_err());
    }

    #[test]
    fn test_send_message_validate() {
        let tool = SendMessageTool;
        let good = json!({
            "linkedin_url": "https://www.linkedin.com/in/ann/",
            "message": "Hi Ann"
        });
        assert!(tool.validate(&good).is_ok());
        assert!(tool
            .validate(&json!({"linkedin_url": "https://www.linkedin.com/in/ann/"}))
            .is_err());
        assert!(tool
            .validate(&json!({
                "linkedin_url": "https://www.linkedin.com/in/ann/",
                "message": "Hi",
                "message_control": "whenever"
            }))
            .is_err());
    }

    #[tokio::test]
    async fn test_missing_credentials_yield_error_dictionary() {
        let reply = ScrapeInboxTool
            .execute(ctx_without_credentials(), json!({}))
            .await
            .unwrap();
        assert_error_reply(&reply);
    }
}
