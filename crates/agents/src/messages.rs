//! Inbox, thread and outbound-message scripts.

use std::collections::HashSet;

use phantomlink_core::{Credentials, Result};
use serde_json::{json, Value};

use crate::agent::{AgentDefinition, PhantomScript, RawOutput};
use crate::models::{Message, Thread};
use crate::wire;

/// Accepted inbox filters, as understood by the inbox scraping script.
pub const INBOX_FILTERS: &[&str] = &[
    "all",
    "archived",
    "myconnections",
    "unread",
    "inmail",
    "spam",
];

/// Message-control modes understood by the message sender script.
pub const MESSAGE_CONTROLS: &[&str] = &[
    "none",
    "sendOnlyIfLastWasRecipient",
    "dontSendIfLastWasRecipient",
    "sendOnlyIfLastWasRecipientOrNoMessage",
    "sendOnlyIfLastWasMeOrNoMessage",
    "sendOnlyIfNoMessage",
    "sendOnlyIfNoReply",
];

#[derive(Debug, Clone)]
pub struct InboxQuery {
    pub count: u32,
    pub filter: String,
}

impl Default for InboxQuery {
    fn default() -> Self {
        Self {
            count: 100,
            filter: "all".to_string(),
        }
    }
}

/// Scrapes the latest inbox threads.
pub struct InboxScraper;

impl PhantomScript for InboxScraper {
    type Input = InboxQuery;
    type Output = Vec<Thread>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "532696507966746",
            script: "LinkedIn Inbox Scraper.js",
            name: "LinkedIn Inbox Scraper (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, query: &InboxQuery) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "inboxFilter": query.filter,
            "numberOfThreadsToScrape": query.count
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Vec<Thread>> {
        let Some(rows) = output.result_value()? else {
            return Ok(Vec::new());
        };
        let Some(rows) = rows.as_array() else {
            return Ok(Vec::new());
        };

        let mut threads = Vec::new();
        for row in rows {
            let thread_url = wire::text(row, "threadUrl");
            let linkedin_urls: Vec<String> = row
                .get("linkedInUrls")
                .and_then(Value::as_array)
                .map(|urls| {
                    urls.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            // Rows without a thread link or counterpart profile are chatter
            // (sponsored slots, empty states) and carry nothing actionable.
            if thread_url.is_empty() || linkedin_urls.is_empty() {
                continue;
            }

            let author = format!(
                "{} {}",
                wire::text(row, "firstnameFrom"),
                wire::text(row, "lastnameFrom")
            );
            threads.push(Thread {
                thread_id: thread_url,
                participants: vec![author.clone()],
                last_message: wire::text(row, "message"),
                last_message_date: wire::text(row, "lastMessageDate"),
                last_message_author_name: author,
                timestamp: wire::text(row, "timestamp"),
                is_last_message_from_me: wire::flag(row, "isLastMessageFromMe"),
                read_status: wire::flag(row, "readStatus"),
                linkedin_url: linkedin_urls[0].clone(),
            });
        }
        Ok(threads)
    }
}

/// Scrapes every message in one conversation thread.
pub struct ThreadScraper;

impl PhantomScript for ThreadScraper {
    type Input = String;
    type Output = Vec<Message>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "9387",
            script: "LinkedIn Message Thread Scraper.js",
            name: "LinkedIn Message Thread Scraper (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, thread_url: &String) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "spreadsheetUrl": thread_url
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Vec<Message>> {
        let Some(rows) = output.result_value()? else {
            return Ok(Vec::new());
        };
        let Some(rows) = rows.as_array() else {
            return Ok(Vec::new());
        };

        // The script re-emits overlapping windows of the conversation.
        let mut seen = HashSet::new();
        let mut messages = Vec::new();
        for row in rows {
            let Some(thread_messages) = row.get("messages").and_then(Value::as_array) else {
                continue;
            };
            for msg in thread_messages {
                let message = Message {
                    date: wire::text(msg, "date"),
                    author: wire::text(msg, "author"),
                    message: wire::text(msg, "message"),
                    connection_degree: wire::opt_text(msg, "connectionDegree"),
                };
                let key = (
                    message.date.clone(),
                    message.author.clone(),
                    message.message.clone(),
                );
                if seen.insert(key) {
                    messages.push(message);
                }
            }
        }
        Ok(messages)
    }
}

#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub linkedin_url: String,
    pub message: String,
    pub message_control: String,
}

impl OutboundMessage {
    pub fn new(linkedin_url: &str, message: &str) -> Self {
        Self {
            linkedin_url: linkedin_url.to_string(),
            message: message.to_string(),
            message_control: "none".to_string(),
        }
    }
}

/// Sends one message to a profile. The result is only the final container
/// status; the script produces no result rows.
pub struct MessageSender;

impl PhantomScript for MessageSender {
    type Input = OutboundMessage;
    type Output = Option<String>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "9227",
            script: "LinkedIn Message Sender.js",
            name: "LinkedIn Message Sender (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, outbound: &OutboundMessage) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "spreadsheetUrl": outbound.linkedin_url,
            "message": outbound.message,
            "messageControl": outbound.message_control
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Option<String>> {
        Ok(output.status.clone())
    }
}
