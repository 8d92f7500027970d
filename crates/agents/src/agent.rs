//! PhantomBuster agent lifecycle: save → launch → poll → fetch → delete.
//!
//! A [`PhantomAgent`] owns one remote job at a time. [`PhantomAgent::run`]
//! drives the whole lifecycle for a [`PhantomScript`] and always attempts to
//! delete the saved agent afterwards, so instances never leak on the service
//! even when a step fails partway.

use phantomlink_core::{Credentials, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::retry::RetryPolicy;

pub const DEFAULT_API_BASE: &str = "https://api.phantombuster.com/api/v2";

/// Identity of the script template a job is instantiated from.
#[derive(Debug, Clone, Copy)]
pub struct AgentDefinition {
    pub script_id: &'static str,
    pub script: &'static str,
    pub name: &'static str,
}

/// Body of `containers/fetch` for a finished execution. `result_object` is a
/// JSON-encoded string on the wire; `result_value` performs the second decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutput {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result_object: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl RawOutput {
    pub fn result_value(&self) -> Result<Option<Value>> {
        match self.result_object.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => {
                let value = serde_json::from_str(raw).map_err(|err| {
                    Error::Decode(format!("resultObject is not valid JSON: {err}"))
                })?;
                Ok(Some(value))
            }
        }
    }
}

/// One scraping operation: which script to instantiate, how to build its
/// launch argument, and how to decode its raw output. Pure data transcription;
/// the lifecycle manager consumes implementations generically.
pub trait PhantomScript: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    fn definition(&self) -> AgentDefinition;
    fn launch_argument(&self, credentials: &Credentials, input: &Self::Input) -> Value;
    fn decode(&self, output: &RawOutput) -> Result<Self::Output>;
}

/// Local handle for one in-flight remote job.
///
/// `agent_id` is assigned by registration, `container_id` by launch; both are
/// scoped to a single [`run`](PhantomAgent::run) and never persisted.
pub struct PhantomAgent {
    client: Client,
    credentials: Credentials,
    api_base: String,
    agent_id: Option<String>,
    container_id: Option<String>,
    policy: RetryPolicy,
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl PhantomAgent {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            agent_id: None,
            container_id: None,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    /// Save a new agent instance for `definition` on the service.
    ///
    /// All definition fields must be non-empty; an empty field is a
    /// construction-time defect and fails before any network call.
    pub async fn register(&mut self, definition: &AgentDefinition) -> Result<String> {
        if definition.script_id.is_empty()
            || definition.script.is_empty()
            || definition.name.is_empty()
        {
            return Err(Error::Validation(
                "script_id, script and name must all be set before registering an agent"
                    .to_string(),
            ));
        }

        let body = json!({
            "scriptId": definition.script_id,
            "script": definition.script,
            "branch": "master",
            "environment": "release",
            "org": "phantombuster",
            "name": definition.name,
            "fileMgmt": "mix",
            "launchType": "manually",
            "maxParallelism": 1
        });

        let response = self
            .client
            .post(format!("{}/agents/save", self.api_base))
            .header("X-Phantombuster-Key", &self.credentials.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| Error::Transport(format!("agents/save request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(Error::Registration(format!(
                "agents/save returned {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| Error::Transport(format!("agents/save returned malformed JSON: {err}")))?;

        let agent_id = payload
            .get("id")
            .and_then(id_string)
            .ok_or_else(|| Error::Registration("agents/save response carried no agent id".to_string()))?;

        debug!(agent_id = %agent_id, name = definition.name, "agent registered");
        self.agent_id = Some(agent_id.clone());
        Ok(agent_id)
    }

    /// Launch the registered agent with `argument`. Returns true only when the
    /// service acknowledges with a container id; every other outcome is a soft
    /// failure so the surrounding lifecycle can still clean up.
    pub async fn start(&mut self, argument: Value) -> bool {
        let Some(agent_id) = self.agent_id.clone() else {
            warn!("launch requested before registration");
            return false;
        };

        let body = json!({ "id": agent_id, "argument": argument });
        let response = match self
            .client
            .post(format!("{}/agents/launch", self.api_base))
            .header("X-Phantombuster-Key", &self.credentials.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "agents/launch request failed");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "agents/launch rejected");
            return false;
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "agents/launch returned malformed JSON");
                return false;
            }
        };

        match payload.get("containerId").and_then(id_string) {
            Some(container_id) => {
                debug!(container_id = %container_id, "agent launched");
                self.container_id = Some(container_id);
                true
            }
            None => {
                warn!("agents/launch response carried no container id");
                false
            }
        }
    }

    /// One status probe. Transport and decode problems count as "not finished
    /// yet"; the bounded poll loop decides when to give up.
    pub async fn is_finished(&self) -> bool {
        let Some(agent_id) = self.agent_id.as_deref() else {
            return false;
        };

        let response = match self
            .client
            .get(format!("{}/agents/fetch-output", self.api_base))
            .query(&[("id", agent_id)])
            .header("X-Phantombuster-Key", &self.credentials.api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "status poll failed");
                return false;
            }
        };

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(_) => return false,
        };

        payload.get("status").and_then(Value::as_str) == Some("finished")
    }

    /// Poll at the configured fixed interval until the job reports finished,
    /// or until the attempt budget is spent.
    pub async fn wait_until_finished(&self) -> bool {
        self.policy.run_async(|| self.is_finished()).await
    }

    /// Fetch the raw output of the execution. `None` when the job never
    /// launched. This is a terminal step, so failures propagate instead of
    /// degrading to "not finished".
    pub async fn fetch_result(&self) -> Result<Option<RawOutput>> {
        let Some(container_id) = self.container_id.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(format!("{}/containers/fetch", self.api_base))
            .query(&[
                ("id", container_id),
                ("withResultObject", "1"),
                ("withOutput", "1"),
            ])
            .header("X-Phantombuster-Key", &self.credentials.api_key)
            .send()
            .await
            .map_err(|err| Error::Transport(format!("containers/fetch request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "containers/fetch returned {}",
                response.status()
            )));
        }

        let output: RawOutput = response.json().await.map_err(|err| {
            Error::Transport(format!("containers/fetch returned malformed JSON: {err}"))
        })?;
        Ok(Some(output))
    }

    /// Delete the saved agent instance, if one exists. Invalidates the local
    /// id either way; a second call is a no-op returning `Ok(false)`.
    pub async fn deregister(&mut self) -> Result<bool> {
        let Some(agent_id) = self.agent_id.take() else {
            return Ok(false);
        };

        let response = self
            .client
            .post(format!("{}/agents/delete", self.api_base))
            .header("X-Phantombuster-Key", &self.credentials.api_key)
            .json(&json!({ "id": agent_id }))
            .send()
            .await
            .map_err(|err| Error::Transport(format!("agents/delete request failed: {err}")))?;

        debug!(agent_id = %agent_id, ok = response.status().is_success(), "agent deleted");
        Ok(response.status().is_success())
    }

    /// Full lifecycle for one script invocation: register → start → poll →
    /// fetch → decode, short-circuiting to `(None, false)` on the first soft
    /// failure. Deletion runs exactly once afterwards whenever registration
    /// assigned an id, and its own failure never masks the primary outcome.
    ///
    /// Only construction-time validation errors and terminal fetch/decode
    /// errors surface as `Err`.
    pub async fn run<S: PhantomScript>(
        &mut self,
        script: &S,
        input: S::Input,
    ) -> Result<(Option<S::Output>, bool)> {
        let outcome = self.drive(script, input).await;

        if self.agent_id.is_some() {
            if let Err(err) = self.deregister().await {
                warn!(error = %err, "failed to delete agent after run");
            }
        }

        match outcome {
            Ok(Some(data)) => Ok((Some(data), true)),
            Ok(None) => Ok((None, false)),
            Err(err) => Err(err),
        }
    }

    async fn drive<S: PhantomScript>(
        &mut self,
        script: &S,
        input: S::Input,
    ) -> Result<Option<S::Output>> {
        let definition = script.definition();
        match self.register(&definition).await {
            Ok(_) => {}
            Err(err @ Error::Validation(_)) => return Err(err),
            Err(err) => {
                warn!(name = definition.name, error = %err, "agent registration failed");
                return Ok(None);
            }
        }

        let argument = script.launch_argument(&self.credentials, &input);
        if !self.start(argument).await {
            return Ok(None);
        }

        if !self.wait_until_finished().await {
            warn!(name = definition.name, "agent did not finish within the polling budget");
            return Ok(None);
        }

        let Some(raw) = self.fetch_result().await? else {
            return Ok(None);
        };
        script.decode(&raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn credentials() -> Credentials {
        Credentials {
            api_key: "test-key".to_string(),
            session_cookie: "li_at=test".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    fn fast_agent(api_base: &str) -> PhantomAgent {
        PhantomAgent::new(credentials())
            .with_api_base(api_base)
            .with_policy(RetryPolicy::new(3, Duration::from_millis(1)))
    }

    struct EchoScript;

    impl PhantomScript for EchoScript {
        type Input = String;
        type Output = Option<Value>;

        fn definition(&self) -> AgentDefinition {
            AgentDefinition {
                script_id: "9999",
                script: "Echo.js",
                name: "Echo (test)",
            }
        }

        fn launch_argument(&self, credentials: &Credentials, input: &String) -> Value {
            json!({
                "userAgent": credentials.user_agent,
                "sessionCookie": credentials.session_cookie,
                "spreadsheetUrl": input,
            })
        }

        fn decode(&self, output: &RawOutput) -> Result<Option<Value>> {
            output.result_value()
        }
    }

    struct BlankScript;

    impl PhantomScript for BlankScript {
        type Input = ();
        type Output = Option<Value>;

        fn definition(&self) -> AgentDefinition {
            AgentDefinition {
                script_id: "9999",
                script: "",
                name: "Blank (test)",
            }
        }

        fn launch_argument(&self, _credentials: &Credentials, _input: &()) -> Value {
            json!({})
        }

        fn decode(&self, output: &RawOutput) -> Result<Option<Value>> {
            output.result_value()
        }
    }

    #[tokio::test]
    async fn test_register_assigns_agent_id() {
        let mut server = mockito::Server::new_async().await;
        let save = server
            .mock("POST", "/agents/save")
            .match_header("x-phantombuster-key", "test-key")
            .with_body(r#"{"id": 4242}"#)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let id = agent.register(&EchoScript.definition()).await.unwrap();
        assert_eq!(id, "4242");
        assert_eq!(agent.agent_id(), Some("4242"));
        save.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_without_id_is_a_registration_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let err = agent.register(&EchoScript.definition()).await.unwrap_err();
        assert!(matches!(err, Error::Registration(_)));
        assert!(agent.agent_id().is_none());
    }

    #[tokio::test]
    async fn test_register_empty_script_is_a_usage_error_with_no_network_call() {
        let mut server = mockito::Server::new_async().await;
        let save = server
            .mock("POST", "/agents/save")
            .expect(0)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let err = agent.register(&BlankScript.definition()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        save.assert_async().await;
    }

    #[tokio::test]
    async fn test_start_soft_fails_without_container_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/agents/launch")
            .with_body(r#"{"status": "error"}"#)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        agent.register(&EchoScript.definition()).await.unwrap();
        assert!(!agent.start(json!({})).await);
        assert!(agent.container_id().is_none());
    }

    #[tokio::test]
    async fn test_poll_stops_after_exact_attempt_budget() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        let status = server
            .mock("GET", "/agents/fetch-output")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "7".into()))
            .with_body(r#"{"status": "running"}"#)
            .expect(3)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        agent.register(&EchoScript.definition()).await.unwrap();
        assert!(!agent.wait_until_finished().await);
        status.assert_async().await;
    }

    #[tokio::test]
    async fn test_poll_treats_transport_errors_as_not_finished() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/agents/fetch-output")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "7".into()))
            .with_status(500)
            .with_body("gateway exploded")
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        agent.register(&EchoScript.definition()).await.unwrap();
        assert!(!agent.wait_until_finished().await);
    }

    #[tokio::test]
    async fn test_fetch_result_without_launch_is_none() {
        let mut server = mockito::Server::new_async().await;
        let fetch = server
            .mock("GET", "/containers/fetch")
            .expect(0)
            .create_async()
            .await;

        let agent = fast_agent(&server.url());
        assert!(agent.fetch_result().await.unwrap().is_none());
        fetch.assert_async().await;
    }

    #[tokio::test]
    async fn test_deregister_invalidates_the_agent_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/agents/delete")
            .expect(1)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        agent.register(&EchoScript.definition()).await.unwrap();
        assert!(agent.deregister().await.unwrap());
        assert!(agent.agent_id().is_none());
        assert!(!agent.deregister().await.unwrap());
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_deletes_exactly_once_when_launch_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/agents/launch")
            .with_status(403)
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/agents/delete")
            .expect(1)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let (data, success) = agent
            .run(&EchoScript, "https://www.linkedin.com/in/someone/".to_string())
            .await
            .unwrap();
        assert!(data.is_none());
        assert!(!success);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_skips_deletion_when_registration_was_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_status(401)
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/agents/delete")
            .expect(0)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let (data, success) = agent
            .run(&EchoScript, "https://www.linkedin.com/in/someone/".to_string())
            .await
            .unwrap();
        assert!(data.is_none());
        assert!(!success);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_full_lifecycle_decodes_the_result_object() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents/save")
            .with_body(r#"{"id": "7"}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/agents/launch")
            .with_body(r#"{"containerId": "c-1"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/agents/fetch-output")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "7".into()))
            .with_body(r#"{"status": "finished"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/containers/fetch")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "c-1".into()))
            .with_body(r#"{"status": "finished", "resultObject": "[{\"firstName\": \"Ann\"}]"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/agents/delete")
            .expect(1)
            .create_async()
            .await;

        let mut agent = fast_agent(&server.url());
        let (data, success) = agent
            .run(&EchoScript, "https://www.linkedin.com/in/ann/".to_string())
            .await
            .unwrap();
        assert!(success);
        let rows = data.flatten().unwrap();
        assert_eq!(rows[0]["firstName"], "Ann");
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_propagates_usage_errors() {
        let server = mockito::Server::new_async().await;
        let mut agent = fast_agent(&server.url());
        let err = agent.run(&BlankScript, ()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_result_value_second_decode() {
        let output = RawOutput {
            status: Some("finished".to_string()),
            result_object: Some(r#"[{"name": "x"}]"#.to_string()),
            output: None,
        };
        let value = output.result_value().unwrap().unwrap();
        assert_eq!(value[0]["name"], "x");

        let empty = RawOutput::default();
        assert!(empty.result_value().unwrap().is_none());

        let broken = RawOutput {
            result_object: Some("not-json".to_string()),
            ..RawOutput::default()
        };
        assert!(matches!(
            broken.result_value().unwrap_err(),
            Error::Decode(_)
        ));
    }
}
