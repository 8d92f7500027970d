//! Activity (posts and articles) extractor.

use chrono::{Duration, Utc};
use phantomlink_core::{Credentials, Result};
use serde_json::{json, Value};

use crate::agent::{AgentDefinition, PhantomScript, RawOutput};
use crate::models::Activity;
use crate::wire;

pub struct ActivityExtractor {
    pub max_posts: u32,
    pub kinds: Vec<String>,
    /// Only fetch activities newer than this many days, when set.
    pub date_after_days: Option<i64>,
}

impl Default for ActivityExtractor {
    fn default() -> Self {
        Self {
            max_posts: 20,
            kinds: vec!["Post".to_string(), "Article".to_string()],
            date_after_days: None,
        }
    }
}

impl PhantomScript for ActivityExtractor {
    type Input = String;
    type Output = Vec<Activity>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "9136",
            script: "LinkedIn Activity Extractor.js",
            name: "LinkedIn Activity Extractor (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, linkedin_url: &String) -> Value {
        let mut argument = json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "spreadsheetUrl": linkedin_url,
            "numberMaxOfPosts": self.max_posts,
            "activitiesToScrape": self.kinds
        });

        if let Some(days) = self.date_after_days {
            // The script expects a US-ordered date string, not a timestamp.
            let cutoff = Utc::now() - Duration::days(days);
            argument["dateAfter"] = json!(cutoff.format("%m-%d-%Y").to_string());
            argument["onlyRetrieveActivitiesAfterDate"] = json!(true);
        }

        argument
    }

    fn decode(&self, output: &RawOutput) -> Result<Vec<Activity>> {
        let Some(rows) = output.result_value()? else {
            return Ok(Vec::new());
        };
        let Some(rows) = rows.as_array() else {
            return Ok(Vec::new());
        };

        let activities = rows
            .iter()
            .map(|row| Activity {
                url: wire::opt_text(row, "postUrl"),
                attached_url: wire::opt_text(row, "imgUrl"),
                kind: wire::opt_text(row, "type"),
                text: wire::opt_text(row, "postContent"),
                like_count: wire::opt_int(row, "likeCount"),
                comment_count: wire::opt_int(row, "commentCount"),
                repost_count: wire::opt_int(row, "repostCount"),
                date: wire::opt_text(row, "postDate"),
                profile_url: wire::opt_text(row, "profileUrl"),
                timestamp: wire::opt_text(row, "timestamp"),
                comment: wire::opt_text(row, "commentContent"),
                ..Activity::default()
            })
            .collect();
        Ok(activities)
    }
}
