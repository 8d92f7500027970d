use phantomlink_tools::ToolRegistry;

/// List all registered tools.
pub async fn list() -> anyhow::Result<()> {
    let registry = ToolRegistry::with_defaults();
    let schemas = registry.get_tool_schemas();

    println!();
    println!("Registered tools ({} total)", schemas.len());
    println!();

    for schema in &schemas {
        let name = schema["name"].as_str().unwrap_or("");
        let desc = schema["description"].as_str().unwrap_or("");
        let short_desc: String = desc.chars().take(72).collect();
        let ellipsis = if desc.chars().count() > 72 { "..." } else { "" };
        println!("  {:<24} {}{}", name, short_desc, ellipsis);
    }
    println!();

    Ok(())
}

/// Show detailed info for a specific tool.
pub async fn info(tool_name: &str) -> anyhow::Result<()> {
    let registry = ToolRegistry::with_defaults();
    let schemas = registry.get_tool_schemas();

    let schema = schemas
        .iter()
        .find(|schema| schema["name"].as_str() == Some(tool_name))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Tool '{}' not found. Use `phantomlink tools list` to see available tools.",
                tool_name
            )
        })?;

    println!();
    println!("{}", schema["name"].as_str().unwrap_or(""));
    println!("{}", schema["description"].as_str().unwrap_or(""));
    println!();
    println!("Parameters:");
    println!("{}", serde_json::to_string_pretty(&schema["parameters"])?);

    Ok(())
}
