use phantomlink_core::Config;
use phantomlink_tools::{ToolContext, ToolRegistry};
use serde_json::Value;

/// Run a tool directly against the live service.
pub async fn tool(tool_name: &str, params_json: &str, text_only: bool) -> anyhow::Result<()> {
    let registry = ToolRegistry::with_defaults();

    let tool = registry.get(tool_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Tool '{}' not found. Use `phantomlink tools list` to see available tools.",
            tool_name
        )
    })?;

    let params: Value = serde_json::from_str(params_json).map_err(|e| {
        anyhow::anyhow!("Failed to parse JSON params: {}\nInput: {}", e, params_json)
    })?;

    if let Err(e) = tool.validate(&params) {
        anyhow::bail!(
            "Parameter validation failed: {}\nUse `phantomlink tools info {}` for parameter details.",
            e,
            tool_name
        );
    }

    let ctx = ToolContext {
        config: Config::from_env(),
    };

    let result = tool.execute(ctx, params).await?;

    if text_only {
        match result.get("markdown").and_then(Value::as_str) {
            Some(markdown) if !markdown.is_empty() => println!("{markdown}"),
            _ => println!("{}", serde_json::to_string_pretty(&result)?),
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
