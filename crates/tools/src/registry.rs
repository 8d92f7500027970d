use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::activities::ScrapeActivitiesTool;
use crate::company::ScrapeCompanyTool;
use crate::connections::ExportConnectionsTool;
use crate::messages::{ScrapeInboxTool, ScrapeThreadTool, SendMessageTool};
use crate::profile::{ScrapeProfileTool, SearchSalesNavigatorTool};
use crate::Tool;

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Profile tools
        registry.register(Arc::new(ScrapeProfileTool));
        registry.register(Arc::new(SearchSalesNavigatorTool));

        // Company tool
        registry.register(Arc::new(ScrapeCompanyTool));

        // Messaging tools
        registry.register(Arc::new(ScrapeInboxTool));
        registry.register(Arc::new(ScrapeThreadTool));
        registry.register(Arc::new(SendMessageTool));

        // Activity and network tools
        registry.register(Arc::new(ScrapeActivitiesTool));
        registry.register(Arc::new(ExportConnectionsTool));

        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        debug!(name = schema.name, "Registering tool");
        self.tools.insert(schema.name.to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Tool schemas sorted by name, ready for a host's tool listing.
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        let mut schemas: Vec<Value> = self
            .tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                json!({
                    "name": schema.name,
                    "description": schema.description,
                    "parameters": schema.parameters
                })
            })
            .collect();
        schemas.sort_by(|a, b| {
            a["name"]
                .as_str()
                .unwrap_or_default()
                .cmp(b["name"].as_str().unwrap_or_default())
        });
        schemas
    }
}
