use phantomlink_agents::models;
use phantomlink_core::render;

/// Print the schema outline of one record type, or of all of them.
pub fn show(name: Option<&str>) -> anyhow::Result<()> {
    let schemas = models::schemas();

    if let Some(name) = name {
        let schema = schemas
            .iter()
            .find(|schema| schema.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("Unknown record type: {}", name))?;
        println!("{}", render::schema_text(schema, 0, true));
        return Ok(());
    }

    for schema in schemas {
        println!("# {}", schema.name);
        println!("{}", render::schema_text(schema, 0, true));
        println!();
    }
    Ok(())
}
