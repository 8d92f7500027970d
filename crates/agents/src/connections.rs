//! First-degree connections export.

use phantomlink_core::{Credentials, Result};
use serde_json::{json, Value};

use crate::agent::{AgentDefinition, PhantomScript, RawOutput};
use crate::models::Connection;
use crate::wire;

#[derive(Debug, Clone)]
pub struct ConnectionsQuery {
    pub count: u32,
    pub sort: String,
}

impl Default for ConnectionsQuery {
    fn default() -> Self {
        Self {
            count: 100,
            sort: "Recently added".to_string(),
        }
    }
}

pub struct ConnectionsExport;

impl PhantomScript for ConnectionsExport {
    type Input = ConnectionsQuery;
    type Output = Vec<Connection>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "12670",
            script: "LinkedIn Connections Export.js",
            name: "LinkedIn Connections Export (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, query: &ConnectionsQuery) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "sortBy": query.sort,
            "numberOfProfiles": query.count
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Vec<Connection>> {
        let Some(rows) = output.result_value()? else {
            return Ok(Vec::new());
        };
        let Some(rows) = rows.as_array() else {
            return Ok(Vec::new());
        };

        let connections = rows
            .iter()
            .map(|row| Connection {
                linkedin_url: wire::text(row, "profileUrl"),
                first_name: wire::text(row, "firstName"),
                last_name: wire::text(row, "lastName"),
                full_name: wire::text(row, "fullName"),
                job_title: wire::opt_text(row, "title"),
                date_connected: wire::opt_text(row, "connectionSince"),
            })
            .collect();
        Ok(connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_connection_rows() {
        let output = RawOutput {
            status: Some("finished".to_string()),
            result_object: Some(
                r#"[
                    {
                        "profileUrl": "https://www.linkedin.com/in/ann/",
                        "firstName": "Ann",
                        "lastName": "Lee",
                        "fullName": "Ann Lee",
                        "title": "Engineer",
                        "connectionSince": "2023-11-20"
                    },
                    { "profileUrl": "https://www.linkedin.com/in/max/", "fullName": "Max" }
                ]"#
                .to_string(),
            ),
            output: None,
        };
        let connections = ConnectionsExport.decode(&output).unwrap();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].full_name, "Ann Lee");
        assert_eq!(connections[0].job_title.as_deref(), Some("Engineer"));
        assert!(connections[1].job_title.is_none());
    }

    #[test]
    fn test_default_query_sorts_by_recency() {
        let query = ConnectionsQuery::default();
        assert_eq!(query.count, 100);
        assert_eq!(query.sort, "Recently added");
    }
}
